//! Service layer types

use serde::{Deserialize, Serialize};

/// Result of classifying one uploaded image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyResult {
    /// One entry per skin type, in model output order
    pub predictions: Vec<ClassPrediction>,
    pub top: ClassPrediction,
    pub inference_time_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassPrediction {
    pub skin_type: String,
    pub probability: f32,
}

/// Descriptive information about one skin-type category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkinTypeInfo {
    pub name: String,
    pub slug: String,
    pub summary: String,
    pub care: String,
}

/// Health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResult {
    pub healthy: bool,
    pub version: String,
    pub model_loaded: bool,
}
