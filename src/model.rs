//! Regression model constants.
//!
//! Coefficient sets are fixed at calibration time and selected at runtime by
//! a model id composed additively from the component ids 1, 2, 4 and 8. Each
//! component carries its own feature list plus one weight row per separation
//! range for each atom type.

use anyhow::bail;

/// Sequence-level features used by the regression components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Sum of helix probabilities (or helix indicator counts)
    Helix,
    /// Sum of strand probabilities (or strand indicator counts)
    Strand,
    /// Sum of coil probabilities (or coil indicator counts)
    Coil,
    /// Sum of non-helix probabilities (or non-helix indicator counts)
    Other,
    /// Residue count of the sequence
    Length,
    /// Sum of per-residue solvent accessibility scores
    Acc,
    /// Constant 1; its weight is the regression intercept
    Bias,
}

impl Feature {
    /// Canonical feature output order.
    pub const ALL: [Feature; 7] = [
        Feature::Helix,
        Feature::Strand,
        Feature::Coil,
        Feature::Other,
        Feature::Length,
        Feature::Acc,
        Feature::Bias,
    ];
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Feature::Helix => write!(f, "helix"),
            Feature::Strand => write!(f, "strand"),
            Feature::Coil => write!(f, "coil"),
            Feature::Other => write!(f, "other"),
            Feature::Length => write!(f, "l"),
            Feature::Acc => write!(f, "acc"),
            Feature::Bias => write!(f, "bias"),
        }
    }
}

/// Sequence separation ranges contacts are counted over.
///
/// A contact between residues i and j falls into a range by |i - j|.
/// Note that `Long` here starts at 24, which differs from some contact
/// prediction conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SepRange {
    /// 6 <= |i - j| < 12
    Short,
    /// 12 <= |i - j| < 24
    Medium,
    /// 24 <= |i - j|
    Long,
    /// 6 <= |i - j|
    All,
}

impl SepRange {
    /// Canonical range output order.
    pub const ALL: [SepRange; 4] = [
        SepRange::Short,
        SepRange::Medium,
        SepRange::Long,
        SepRange::All,
    ];
}

impl std::fmt::Display for SepRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            SepRange::Short => write!(f, "short"),
            SepRange::Medium => write!(f, "medm"),
            SepRange::Long => write!(f, "long"),
            SepRange::All => write!(f, "all"),
        }
    }
}

/// Atom pair definition contacts are counted over.
///
/// Each atom type has an independently fitted coefficient set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomType {
    /// C-beta contacts
    Cb,
    /// C-alpha contacts
    Ca,
}

impl std::str::FromStr for AtomType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CB" => Ok(AtomType::Cb),
            "CA" => Ok(AtomType::Ca),
            _ => bail!("unknown atom type {s}; expected CB or CA"),
        }
    }
}

impl std::fmt::Display for AtomType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AtomType::Cb => write!(f, "CB"),
            AtomType::Ca => write!(f, "CA"),
        }
    }
}

/// One additively-selectable regression component.
///
/// The weight rows are ordered short, medm, long, all and each row matches
/// `features` position by position.
#[derive(Debug)]
pub struct ModelComponent {
    /// Component id; one of 1, 2, 4, 8
    pub id: u32,
    /// Features this component regresses on, in weight-row order
    pub features: &'static [Feature],
    ca: [&'static [f64]; 4],
    cb: [&'static [f64]; 4],
}

impl ModelComponent {
    /// Weight row for the given atom type and separation range.
    pub fn weights(&self, atom: AtomType, range: SepRange) -> &'static [f64] {
        let rows = match atom {
            AtomType::Ca => &self.ca,
            AtomType::Cb => &self.cb,
        };
        match range {
            SepRange::Short => rows[0],
            SepRange::Medium => rows[1],
            SepRange::Long => rows[2],
            SepRange::All => rows[3],
        }
    }
}

/// Calibrated regression components in descending id order.
///
/// The ordering is significant: model ids are decomposed greedily from the
/// largest component down.
pub const MODEL_COMPONENTS: [ModelComponent; 4] = [
    ModelComponent {
        id: 8,
        features: &[Feature::Length, Feature::Bias],
        ca: [
            &[0.26, 3.51],
            &[0.30, 9.68],
            &[1.45, -59.84],
            &[2.00, -46.65],
        ],
        cb: [
            &[0.28, 2.93],
            &[0.35, 9.09],
            &[1.81, -80.75],
            &[2.44, -68.73],
        ],
    },
    ModelComponent {
        id: 4,
        features: &[Feature::Helix, Feature::Strand, Feature::Coil, Feature::Bias],
        ca: [
            &[0.10, 0.52, 0.32, -0.92],
            &[-0.02, 0.95, 0.37, -0.44],
            &[0.93, 2.13, 1.75, -72.73],
            &[1.00, 3.60, 2.44, -74.09],
        ],
        cb: [
            &[0.14, 0.48, 0.36, -0.68],
            &[0.08, 0.90, 0.41, 0.50],
            &[1.40, 2.41, 2.01, -91.54],
            &[1.61, 3.80, 2.78, -91.72],
        ],
    },
    ModelComponent {
        id: 2,
        features: &[Feature::Helix, Feature::Other, Feature::Acc, Feature::Bias],
        ca: [
            &[0.15, 0.99, -0.44, 5.92],
            &[0.02, 1.57, -0.78, 12.23],
            &[1.89, 5.80, -5.08, 1.08],
            &[2.06, 8.36, -6.30, 19.23],
        ],
        cb: [
            &[0.22, 1.02, -0.51, 7.02],
            &[0.17, 1.63, -0.94, 15.34],
            &[2.54, 6.70, -5.99, -4.65],
            &[2.93, 9.35, -7.45, 17.71],
        ],
    },
    ModelComponent {
        id: 1,
        features: &[
            Feature::Helix,
            Feature::Strand,
            Feature::Coil,
            Feature::Acc,
            Feature::Bias,
        ],
        ca: [
            &[0.17, 0.58, 0.41, -0.39, 4.80],
            &[0.10, 1.05, 0.51, -0.62, 8.57],
            &[1.89, 2.91, 2.90, -5.08, 1.01],
            &[2.16, 4.53, 3.82, -6.10, 14.38],
        ],
        cb: [
            &[0.23, 0.55, 0.47, -0.49, 6.43],
            &[0.23, 1.03, 0.60, -0.82, 12.38],
            &[2.53, 3.33, 3.37, -6.00, -4.42],
            &[3.00, 4.91, 4.43, -7.31, 14.40],
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn atom_type_parsing() {
        assert_eq!(AtomType::from_str("CB").unwrap(), AtomType::Cb);
        assert_eq!(AtomType::from_str("CA").unwrap(), AtomType::Ca);

        let err = AtomType::from_str("CG").unwrap_err();
        assert!(err.to_string().contains("unknown atom type"));
    }

    #[test]
    fn components_are_in_descending_id_order() {
        let ids: Vec<u32> = MODEL_COMPONENTS.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![8, 4, 2, 1]);
    }

    #[test]
    fn weight_rows_match_feature_lists() {
        for comp in &MODEL_COMPONENTS {
            for atom in [AtomType::Ca, AtomType::Cb] {
                for range in SepRange::ALL {
                    assert_eq!(
                        comp.weights(atom, range).len(),
                        comp.features.len(),
                        "component {} {atom} {range}",
                        comp.id
                    );
                }
            }
        }
    }

    #[test]
    fn atom_types_have_distinct_weights() {
        for comp in &MODEL_COMPONENTS {
            for range in SepRange::ALL {
                assert_ne!(
                    comp.weights(AtomType::Ca, range),
                    comp.weights(AtomType::Cb, range),
                    "component {} {range}",
                    comp.id
                );
            }
        }
    }
}
