//! Contact number prediction from aggregated features.
//!
//! The model id is decomposed greedily over the component ids 8, 4, 2, 1 in
//! descending order; every consumed component contributes one linear partial
//! sum per separation range, and the prediction per range is the mean of the
//! partial sums floored at zero. Composite ids therefore average the
//! component predictors rather than summing them; the coefficient sets were
//! calibrated under that rule.

use crate::features::Features;
use crate::model::{AtomType, SepRange, MODEL_COMPONENTS};
use anyhow::{bail, Result};
use tracing::trace;

/// Predicted contact counts per separation range, floored at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactCounts {
    /// Contacts with 6 <= |i - j| < 12
    pub short: f64,
    /// Contacts with 12 <= |i - j| < 24
    pub medium: f64,
    /// Contacts with 24 <= |i - j|
    pub long: f64,
    /// Contacts with 6 <= |i - j|
    pub all: f64,
}

impl ContactCounts {
    /// Look up the predicted count for a separation range.
    pub fn value(&self, range: SepRange) -> f64 {
        match range {
            SepRange::Short => self.short,
            SepRange::Medium => self.medium,
            SepRange::Long => self.long,
            SepRange::All => self.all,
        }
    }
}

/// Decompose a model id into component ids, largest first.
///
/// Each component id is consumed at most once whenever it fits into the
/// remainder, so 5 becomes [4, 1] and 3 becomes [2, 1]. Any remainder left
/// after the smallest component is ignored.
pub fn decompose_model(model: u32) -> Vec<u32> {
    let mut remaining = model;
    let mut components = Vec::new();
    for comp in &MODEL_COMPONENTS {
        if remaining >= comp.id {
            components.push(comp.id);
            remaining -= comp.id;
        }
    }
    components
}

/// Predict contact numbers for the four separation ranges.
///
/// # Arguments
///
/// * `feats` - Aggregated sequence features from [`crate::extract_features`]
/// * `model` - Model id, composed additively from 1, 2, 4 and 8
/// * `atom` - Atom pair definition selecting the coefficient set
///
/// # Returns
///
/// Predicted [`ContactCounts`], every range floored at zero. A model id that
/// selects no component (only 0) is an error.
pub fn predict_contacts(feats: &Features, model: u32, atom: AtomType) -> Result<ContactCounts> {
    let mut partials: [Vec<f64>; 4] = Default::default();

    let mut remaining = model;
    for comp in &MODEL_COMPONENTS {
        if remaining < comp.id {
            continue;
        }
        remaining -= comp.id;

        for (s, range) in SepRange::ALL.into_iter().enumerate() {
            let dot: f64 = comp
                .features
                .iter()
                .zip(comp.weights(atom, range))
                .map(|(feat, w)| w * feats.value(*feat))
                .sum();
            trace!("component {} {atom} {range}: {dot}", comp.id);
            partials[s].push(dot);
        }
    }

    if partials[0].is_empty() {
        bail!("model {model} selects no component; valid ids are sums of 1, 2, 4 and 8");
    }

    let mean_floored = |sums: &[f64]| (sums.iter().sum::<f64>() / sums.len() as f64).max(0.0);
    Ok(ContactCounts {
        short: mean_floored(&partials[0]),
        medium: mean_floored(&partials[1]),
        long: mean_floored(&partials[2]),
        all: mean_floored(&partials[3]),
    })
}
