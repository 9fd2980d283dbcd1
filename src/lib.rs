#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod features;
mod model;
mod predict;

// Re-export key public types
pub use features::{extract_features, Features};
pub use model::{AtomType, Feature, ModelComponent, SepRange, MODEL_COMPONENTS};
pub use predict::{decompose_model, predict_contacts, ContactCounts};
