use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. The only
/// knob is where the model artifacts live — the model identity itself is
/// fixed (the scorer is trained for exactly one task).
pub struct Config {
    /// Directory containing the ONNX model files
    pub model_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let model_dir = env::var("DRIFTNET_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::scorer::download::default_model_dir());

        Ok(Self { model_dir })
    }

    /// Check that the model artifacts are present.
    /// Call this before constructing a scorer so the user gets a download
    /// hint instead of a load failure.
    pub fn require_model(&self) -> Result<()> {
        if !crate::scorer::download::model_files_present(&self.model_dir) {
            anyhow::bail!(
                "Model files not found in {}\n\
                 Run `driftnet download-model` to download them.",
                self.model_dir.display()
            );
        }
        Ok(())
    }
}
