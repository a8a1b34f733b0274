//! Classification service - core business logic
//!
//! Orchestrates preprocessing and inference for the API layer.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::engine::skin_type::SkinType;
use crate::engine::{ModelProvider, SkinClassifier};
use crate::error::Error;

use super::types::*;

/// Skin-type classification service
pub struct ClassifyService {
    provider: Arc<ModelProvider>,
}

impl ClassifyService {
    pub fn new(provider: Arc<ModelProvider>) -> Self {
        Self { provider }
    }

    /// Classify one uploaded image into the five skin-type categories.
    ///
    /// Decoding and the forward pass run on the blocking thread pool so the
    /// async accept loop is never stalled. A bad image fails this request
    /// only; the shared model handle stays valid.
    pub async fn classify(&self, image_data: &[u8]) -> Result<ClassifyResult, Error> {
        let start = Instant::now();

        let image_data = image_data.to_vec();
        let classifier = SkinClassifier::new(self.provider.clone());
        let prediction = tokio::task::spawn_blocking(move || classifier.classify(&image_data))
            .await
            .map_err(|e| Error::Inference(format!("inference task failed: {}", e)))??;

        let inference_time_ms = start.elapsed().as_millis() as u64;

        let predictions: Vec<ClassPrediction> = prediction
            .iter()
            .map(|(skin_type, probability)| ClassPrediction {
                skin_type: skin_type.label().to_string(),
                probability,
            })
            .collect();

        let (top_type, top_probability) = prediction.top();
        info!(
            "Classified image as {} ({:.1}%) in {}ms",
            top_type.label(),
            top_probability * 100.0,
            inference_time_ms
        );

        Ok(ClassifyResult {
            predictions,
            top: ClassPrediction {
                skin_type: top_type.label().to_string(),
                probability: top_probability,
            },
            inference_time_ms,
        })
    }

    /// All skin-type categories with their descriptive text.
    pub fn skin_types(&self) -> Vec<SkinTypeInfo> {
        SkinType::ALL.iter().copied().map(skin_type_info).collect()
    }

    /// Look up one category by its slug.
    pub fn describe(&self, slug: &str) -> Option<SkinTypeInfo> {
        SkinType::from_slug(slug).map(skin_type_info)
    }

    /// Get health status
    pub fn health(&self) -> HealthResult {
        HealthResult {
            healthy: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            model_loaded: self.provider.is_loaded(),
        }
    }
}

fn skin_type_info(skin_type: SkinType) -> SkinTypeInfo {
    SkinTypeInfo {
        name: skin_type.label().to_string(),
        slug: skin_type.slug().to_string(),
        summary: skin_type.summary().to_string(),
        care: skin_type.care().to_string(),
    }
}
