//! Explicit Model Handle
//!
//! Serving code owns one handle and passes it to prediction. The model is
//! loaded once on demand and can be reloaded; there is no process-wide state.

use crate::regressor::{ModelLoader, Regressor};
use crate::InferenceError;
use tracing::{info, warn};

/// Owned handle around a lazily loaded model
pub struct ModelHandle<L: ModelLoader> {
    loader: L,
    model: Option<L::Model>,
    load_count: usize,
}

impl<L: ModelLoader> ModelHandle<L> {
    /// Create an unloaded handle
    pub fn new(loader: L) -> Self {
        info!("Creating model handle for {}", loader.describe());
        Self {
            loader,
            model: None,
            load_count: 0,
        }
    }

    /// Load the model if it is not loaded yet
    pub fn load(&mut self) -> Result<&L::Model, InferenceError> {
        if self.model.is_none() {
            let model = self.load_fresh()?;
            self.model = Some(model);
        }
        self.model()
    }

    /// Replace the loaded model with a fresh load.
    ///
    /// On failure the previously loaded model stays in place.
    pub fn reload(&mut self) -> Result<&L::Model, InferenceError> {
        match self.load_fresh() {
            Ok(model) => {
                self.model = Some(model);
                self.model()
            }
            Err(e) => {
                if self.model.is_some() {
                    warn!("Reload failed, keeping previous model: {}", e);
                }
                Err(e)
            }
        }
    }

    fn load_fresh(&mut self) -> Result<L::Model, InferenceError> {
        let model = self.loader.load().map_err(|e| match e {
            InferenceError::RegressorUnavailable(_) => e,
            other => InferenceError::RegressorUnavailable(other.to_string()),
        })?;
        self.load_count += 1;
        info!(
            "Model loaded from {} ({} columns, load #{})",
            self.loader.describe(),
            model.feature_schema().len(),
            self.load_count
        );
        Ok(model)
    }

    /// Drop the loaded model
    pub fn unload(&mut self) {
        self.model = None;
    }

    /// The loaded model
    pub fn model(&self) -> Result<&L::Model, InferenceError> {
        self.model
            .as_ref()
            .ok_or_else(|| InferenceError::RegressorUnavailable("model not loaded".into()))
    }

    /// Check if a model is loaded
    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Number of successful loads
    pub fn load_count(&self) -> usize {
        self.load_count
    }
}

/// Loader handing out copies of an in-memory model
#[derive(Debug, Clone)]
pub struct StaticLoader<M> {
    model: M,
}

impl<M: Regressor + Clone> StaticLoader<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: Regressor + Clone> ModelLoader for StaticLoader<M> {
    type Model = M;

    fn load(&self) -> Result<M, InferenceError> {
        Ok(self.model.clone())
    }

    fn describe(&self) -> String {
        "in-memory model".to_string()
    }
}
