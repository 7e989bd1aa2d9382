//! JSON Model Artifact Storage

use anyhow::Context;
use inference_engine::{InferenceError, ModelLoader, PersistenceRegressor};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Loads a persistence baseline from a JSON artifact
#[derive(Debug, Clone)]
pub struct JsonModelLoader {
    path: PathBuf,
}

impl JsonModelLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ModelLoader for JsonModelLoader {
    type Model = PersistenceRegressor;

    fn load(&self) -> Result<PersistenceRegressor, InferenceError> {
        let unavailable = |e: &dyn std::fmt::Display| {
            InferenceError::RegressorUnavailable(format!("{}: {}", self.path.display(), e))
        };

        let file = File::open(&self.path).map_err(|e| unavailable(&e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| unavailable(&e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Write a model artifact, creating parent directories
pub fn save_model(path: &Path, model: &PersistenceRegressor) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, model)?;
    writer.flush()?;
    info!("Model saved to {}", path.display());
    Ok(())
}
