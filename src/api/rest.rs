//! Axum REST API handlers

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::Error;
use crate::service::ClassifyService;

use super::dto::*;

/// Application state shared across handlers
pub struct AppState {
    pub service: Arc<ClassifyService>,
    pub start_time: Instant,
    pub classify_count: AtomicU64,
}

/// Create the REST API router
pub fn create_rest_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Classification
        .route("/api/v1/classify", post(classify_handler))
        // Skin-type catalog
        .route("/api/v1/skin-types", get(skin_types_handler))
        .route("/api/v1/skin-types/:slug", get(skin_type_handler))
        // System endpoints
        .route("/health", get(health_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        // Upload page - serve static files
        .fallback_service(ServeDir::new("web").append_index_html_on_directories(true))
        // Middleware
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB limit covers phone photos
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Map a pipeline error to an HTTP response. Bad input is the client's
/// problem; an inference failure is ours and gets logged as a defect.
fn error_response(err: &Error) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match err {
        Error::Decode(_) => (StatusCode::BAD_REQUEST, "INVALID_IMAGE"),
        Error::UnsupportedChannelLayout(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_IMAGE"),
        Error::Inference(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INFERENCE_FAILED"),
        Error::ModelLoad { .. } => (StatusCode::SERVICE_UNAVAILABLE, "MODEL_UNAVAILABLE"),
    };

    if !err.is_user_error() {
        error!("Classification failed: {}", err);
    }

    (status, Json(ErrorResponse::new(&err.to_string(), code)))
}

/// Classify an uploaded image
async fn classify_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ClassifyResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(&e.to_string(), "MULTIPART_ERROR")),
        )
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "image" {
            image_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse::new(&e.to_string(), "READ_ERROR")),
                        )
                    })?
                    .to_vec(),
            );
        }
    }

    let image_data = image_data.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Missing image field", "MISSING_IMAGE")),
        )
    })?;

    let result = state
        .service
        .classify(&image_data)
        .await
        .map_err(|e| error_response(&e))?;

    state.classify_count.fetch_add(1, Ordering::Relaxed);

    Ok(Json(ClassifyResponse {
        predictions: result
            .predictions
            .into_iter()
            .map(|p| PredictionDto {
                skin_type: p.skin_type,
                probability: p.probability,
            })
            .collect(),
        top: PredictionDto {
            skin_type: result.top.skin_type,
            probability: result.top.probability,
        },
        inference_time_ms: result.inference_time_ms,
    }))
}

/// List all skin-type categories with descriptions
async fn skin_types_handler(State(state): State<Arc<AppState>>) -> Json<SkinTypesResponse> {
    let skin_types = state
        .service
        .skin_types()
        .into_iter()
        .map(|info| SkinTypeDto {
            name: info.name,
            slug: info.slug,
            summary: info.summary,
            care: info.care,
        })
        .collect();

    Json(SkinTypesResponse { skin_types })
}

/// Look up one skin-type category
async fn skin_type_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<SkinTypeDto>, (StatusCode, Json<ErrorResponse>)> {
    state
        .service
        .describe(&slug)
        .map(|info| {
            Json(SkinTypeDto {
                name: info.name,
                slug: info.slug,
                summary: info.summary,
                care: info.care,
            })
        })
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    &format!("Unknown skin type: {}", slug),
                    "NOT_FOUND",
                )),
            )
        })
}

/// Health check
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.service.health();

    Json(HealthResponse {
        healthy: health.healthy,
        version: health.version,
        model_loaded: health.model_loaded,
    })
}

/// Metrics
async fn metrics_handler(State(state): State<Arc<AppState>>) -> Json<MetricsResponse> {
    let health = state.service.health();

    Json(MetricsResponse {
        total_classifications: state.classify_count.load(Ordering::Relaxed),
        model_loaded: health.model_loaded,
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
