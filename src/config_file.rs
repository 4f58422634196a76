//! Parameter file handling for saving and loading generator parameters.
//!
//! A parameter file is a JSON object whose keys are the snake_case names of
//! the CLI flags. Values given on the command line take precedence over the
//! file. The password is never written out.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::RawParams;

impl RawParams {
    /// Save parameters to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize parameters to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write parameters to {:?}", path.as_ref()))?;

        tracing::info!(path = ?path.as_ref(), "saved parameters");
        Ok(())
    }

    /// Load parameters from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read parameters from {:?}", path.as_ref()))?;

        let params: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse parameter file {:?}", path.as_ref()))?;

        tracing::debug!(path = ?path.as_ref(), "loaded parameters");
        Ok(params)
    }
}
