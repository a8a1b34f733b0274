//! Model Provider
//!
//! Loads the classifier artifact from disk exactly once per process lifetime
//! and hands the compiled model to every caller. The cache is write-once:
//! no idle unloading, no reload-on-change, no TTL.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use openvino::{CompiledModel, Core};
use parking_lot::RwLock;
use tracing::info;

use crate::error::Error;

/// Wrapper for OpenVINO Core that implements Send + Sync
pub struct SafeCore(Core);
unsafe impl Send for SafeCore {}
unsafe impl Sync for SafeCore {}

impl std::ops::Deref for SafeCore {
    type Target = Core;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for SafeCore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Wrapper for OpenVINO CompiledModel that implements Send + Sync
#[derive(Clone)]
pub struct SafeCompiledModel(pub Arc<CompiledModel>);
unsafe impl Send for SafeCompiledModel {}
unsafe impl Sync for SafeCompiledModel {}

impl SafeCompiledModel {
    /// Create an inference request
    /// OpenVINO CompiledModel methods are thread-safe in C++, but Rust bindings
    /// require &mut self. We bypass this restriction safely.
    pub fn create_infer_request(&self) -> anyhow::Result<openvino::InferRequest> {
        unsafe {
            let ptr = Arc::as_ptr(&self.0) as *mut CompiledModel;
            (*ptr).create_infer_request().map_err(|e| e.into())
        }
    }
}

impl std::ops::Deref for SafeCompiledModel {
    type Target = CompiledModel;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Supplies the single shared classifier handle.
///
/// Constructed once in `main` and passed by `Arc` to everything that runs
/// inference. The first `get()` reads and compiles the artifact; every later
/// call returns the cached handle without touching the filesystem.
pub struct ModelProvider {
    core: RwLock<SafeCore>,
    device: String,
    model_path: PathBuf,
    cached: RwLock<Option<SafeCompiledModel>>,
}

impl ModelProvider {
    pub fn new(model_path: PathBuf, device: &str) -> Result<Self, Error> {
        let core = Core::new().map_err(|e| Error::ModelLoad {
            path: model_path.display().to_string(),
            message: format!("inference runtime init failed: {}", e),
        })?;

        Ok(Self {
            core: RwLock::new(SafeCore(core)),
            device: device.to_string(),
            model_path,
            cached: RwLock::new(None),
        })
    }

    /// Get the compiled classifier, loading it on first use.
    pub fn get(&self) -> Result<SafeCompiledModel, Error> {
        {
            let read_guard = self.cached.read();
            if let Some(ref compiled) = *read_guard {
                return Ok(compiled.clone());
            }
        }

        let mut write_guard = self.cached.write();

        // Double-check after acquiring write lock
        if let Some(ref compiled) = *write_guard {
            return Ok(compiled.clone());
        }

        info!("Loading classifier model from {}", self.model_path.display());
        let start = Instant::now();

        let path = self.model_path.to_string_lossy();
        let mut core = self.core.write();
        let model = core
            .read_model_from_file(path.as_ref(), "")
            .map_err(|e| self.load_error(e))?;
        let compiled = core
            .compile_model(&model, self.device.as_str().into())
            .map_err(|e| self.load_error(e))?;
        let safe_compiled = SafeCompiledModel(Arc::new(compiled));

        info!("Classifier model loaded in {:?}", start.elapsed());

        *write_guard = Some(safe_compiled.clone());

        Ok(safe_compiled)
    }

    /// Whether the classifier has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.cached.read().is_some()
    }

    fn load_error(&self, e: impl std::fmt::Display) -> Error {
        Error::ModelLoad {
            path: self.model_path.display().to_string(),
            message: e.to_string(),
        }
    }
}
