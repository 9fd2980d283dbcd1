//! Sequence-level feature extraction from per-residue prediction files.
//!
//! Two inputs are read: a PSIPRED stage 2 secondary structure prediction
//! (`.ss2`) and a solvpred-style solvent accessibility prediction (`.solv`).
//! Lines that do not match the expected record layout (headers, blanks) are
//! skipped without diagnostics.

use crate::model::Feature;
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;
use tracing::{debug, error};

/// Sequence-level feature accumulators.
///
/// `bias` is always 1; the remaining fields are sums over the residues of
/// the input files.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    /// Helix probability sum, or helix residue count in indicator mode
    pub helix: f64,
    /// Strand probability sum, or strand residue count in indicator mode
    pub strand: f64,
    /// Coil probability sum, or coil residue count in indicator mode
    pub coil: f64,
    /// Non-helix probability sum, or non-helix residue count
    pub other: f64,
    /// Number of residues in the secondary structure file
    pub length: f64,
    /// Solvent accessibility score sum
    pub acc: f64,
    /// Constant intercept feature, always 1
    pub bias: f64,
}

impl Default for Features {
    fn default() -> Self {
        Features {
            helix: 0.0,
            strand: 0.0,
            coil: 0.0,
            other: 0.0,
            length: 0.0,
            acc: 0.0,
            bias: 1.0,
        }
    }
}

impl Features {
    /// Look up an accumulator by feature name.
    pub fn value(&self, feat: Feature) -> f64 {
        match feat {
            Feature::Helix => self.helix,
            Feature::Strand => self.strand,
            Feature::Coil => self.coil,
            Feature::Other => self.other,
            Feature::Length => self.length,
            Feature::Acc => self.acc,
            Feature::Bias => self.bias,
        }
    }
}

/// Aggregate sequence-level features from the two prediction files.
///
/// # Arguments
///
/// * `ss2_file` - PSIPRED stage 2 secondary structure prediction
/// * `solv_file` - Solvent accessibility prediction
/// * `use_prob` - Accumulate class probabilities when true, one-hot
///   predicted classes when false
///
/// # Returns
///
/// The accumulated [`Features`]. A residue-count mismatch between the two
/// files is reported as a diagnostic but is not fatal; only unreadable
/// files produce an `Err`.
pub fn extract_features(ss2_file: &Path, solv_file: &Path, use_prob: bool) -> Result<Features> {
    // resi resn class p_coil p_helix p_strand
    let ss2_pat = Regex::new(r"^\s*\d+\s+[A-Z]\s+([A-Z])\s+([.\d]+)\s+([.\d]+)\s+([.\d]+)\s*$")
        .expect("invalid ss2 pattern");
    // resi resn score
    let solv_pat =
        Regex::new(r"^\s*\d+\s+[A-Z]\s+([.\d]+)\s*$").expect("invalid solv pattern");

    let mut feats = Features::default();

    let ss2_txt = std::fs::read_to_string(ss2_file)
        .with_context(|| format!("failed to read {}", ss2_file.display()))?;
    for line in ss2_txt.lines() {
        let Some(caps) = ss2_pat.captures(line) else {
            continue;
        };
        feats.length += 1.0;

        if use_prob {
            let p_coil: f64 = caps[2].parse()?;
            let p_helix: f64 = caps[3].parse()?;
            let p_strand: f64 = caps[4].parse()?;
            feats.helix += p_helix;
            feats.strand += p_strand;
            feats.coil += p_coil;
            feats.other += 1.0 - p_helix;
        } else {
            match &caps[1] {
                "H" => feats.helix += 1.0,
                "E" => feats.strand += 1.0,
                "C" => feats.coil += 1.0,
                _ => {}
            }
            if &caps[1] != "H" {
                feats.other += 1.0;
            }
        }
    }

    let solv_txt = std::fs::read_to_string(solv_file)
        .with_context(|| format!("failed to read {}", solv_file.display()))?;
    let mut solv_count = 0usize;
    for line in solv_txt.lines() {
        let Some(caps) = solv_pat.captures(line) else {
            continue;
        };
        solv_count += 1;
        let score: f64 = caps[1].parse()?;
        feats.acc += score;
    }

    if solv_count as f64 != feats.length {
        error!(
            "{} and {} do not have the same length ({} vs {} residues)",
            ss2_file.display(),
            solv_file.display(),
            feats.length,
            solv_count
        );
    }
    debug!("Accumulated features over {} residues: {feats:?}", feats.length);

    Ok(feats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        let root = env!("CARGO_MANIFEST_DIR");
        PathBuf::from(format!("{root}/test-data/{name}"))
    }

    #[test]
    fn probability_mode_sums() {
        let feats = extract_features(&fixture("seq.ss2"), &fixture("seq.solv"), true).unwrap();

        assert_eq!(feats.length, 10.0);
        assert!((feats.helix - 3.126).abs() < 1e-9);
        assert!((feats.strand - 1.906).abs() < 1e-9);
        assert!((feats.coil - 4.968).abs() < 1e-9);
        // other accumulates 1 - p_helix per residue
        assert!((feats.other - (10.0 - 3.126)).abs() < 1e-9);
        assert!((feats.acc - 3.841).abs() < 1e-9);
        assert_eq!(feats.bias, 1.0);
    }

    #[test]
    fn indicator_mode_counts() {
        let feats = extract_features(&fixture("seq.ss2"), &fixture("seq.solv"), false).unwrap();

        assert_eq!(feats.helix, 3.0);
        assert_eq!(feats.strand, 2.0);
        assert_eq!(feats.coil, 5.0);
        // every residue lands in exactly one class bucket
        assert_eq!(feats.helix + feats.strand + feats.coil, feats.length);
        assert_eq!(feats.other, feats.length - feats.helix);
    }

    #[test]
    fn length_mismatch_is_not_fatal() {
        let feats =
            extract_features(&fixture("seq.ss2"), &fixture("seq_short.solv"), true).unwrap();

        assert_eq!(feats.length, 10.0);
        // the nine matching solv lines are still accumulated
        assert!((feats.acc - 3.130).abs() < 1e-9);
    }

    #[test]
    fn header_lines_are_skipped() {
        let mut ss2 = tempfile::NamedTempFile::new().unwrap();
        writeln!(ss2, "# PSIPRED VFORMAT (PSIPRED V4.0)").unwrap();
        writeln!(ss2).unwrap();
        writeln!(ss2, "   1 M C   0.900  0.050  0.050").unwrap();
        let mut solv = tempfile::NamedTempFile::new().unwrap();
        writeln!(solv, "#resi resn score").unwrap();
        writeln!(solv, "   1 M 0.750").unwrap();

        let feats = extract_features(ss2.path(), solv.path(), true).unwrap();
        assert_eq!(feats.length, 1.0);
        assert!((feats.acc - 0.750).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_yield_zero_features() {
        let ss2 = tempfile::NamedTempFile::new().unwrap();
        let solv = tempfile::NamedTempFile::new().unwrap();

        let feats = extract_features(ss2.path(), solv.path(), true).unwrap();
        assert_eq!(feats, Features::default());
        assert_eq!(feats.bias, 1.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = extract_features(
            &fixture("does_not_exist.ss2"),
            &fixture("seq.solv"),
            true,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does_not_exist.ss2"));
    }
}
