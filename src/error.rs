//! Error taxonomy for the classification pipeline

use thiserror::Error;

/// Errors raised by the model provider and inference pipeline.
///
/// `ModelLoad` is fatal at startup; the remaining variants are per-request
/// and never invalidate the shared model handle.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load classifier model from {path}: {message}")]
    ModelLoad { path: String, message: String },

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("unsupported channel layout: {0}")]
    UnsupportedChannelLayout(String),

    #[error("inference failed: {0}")]
    Inference(String),
}

impl Error {
    /// True for errors caused by the client's input (bad image), false for
    /// errors that signal a defect in the pipeline or runtime.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::Decode(_) | Error::UnsupportedChannelLayout(_))
    }
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_classification() {
        assert!(Error::Decode("truncated jpeg".into()).is_user_error());
        assert!(Error::UnsupportedChannelLayout("empty frame".into()).is_user_error());
        assert!(!Error::Inference("shape mismatch".into()).is_user_error());
        assert!(!Error::ModelLoad {
            path: "models/skintype.onnx".into(),
            message: "no such file".into(),
        }
        .is_user_error());
    }

    #[test]
    fn test_model_load_names_path() {
        let err = Error::ModelLoad {
            path: "models/skintype.onnx".into(),
            message: "no such file".into(),
        };
        assert!(err.to_string().contains("models/skintype.onnx"));
    }
}
