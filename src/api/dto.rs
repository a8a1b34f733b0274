//! REST API request/response data transfer objects

use serde::Serialize;

/// Classify response
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub predictions: Vec<PredictionDto>,
    pub top: PredictionDto,
    pub inference_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionDto {
    pub skin_type: String,
    pub probability: f32,
}

/// Skin-type catalog response
#[derive(Debug, Serialize)]
pub struct SkinTypesResponse {
    pub skin_types: Vec<SkinTypeDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkinTypeDto {
    pub name: String,
    pub slug: String,
    pub summary: String,
    pub care: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub version: String,
    pub model_loaded: bool,
}

/// Metrics response
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub total_classifications: u64,
    pub model_loaded: bool,
    pub uptime_seconds: u64,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: &str, code: &str) -> Self {
        Self {
            error: error.to_string(),
            code: code.to_string(),
        }
    }
}
