//! Inference engine module
//!
//! OpenVINO-backed classification: load-once model provider, fixed
//! preprocessing transform, per-request forward passes.

pub mod provider;
pub mod classifier;
pub mod preprocess;
pub mod skin_type;

pub use provider::ModelProvider;
pub use classifier::{Prediction, SkinClassifier};
pub use skin_type::SkinType;
