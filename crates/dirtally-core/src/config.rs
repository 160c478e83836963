//! Walk configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for an indexing run.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct WalkConfig {
    /// Root directory to index.
    pub root: PathBuf,

    /// Number of worker threads for parallel runs (0 = one per CPU).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,

    /// Emit a warning for every contained filesystem failure.
    #[builder(default = "false")]
    #[serde(default)]
    pub warnings: bool,

    /// Include hidden entries (dot-files, or the hidden attribute on Windows).
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// Number of recorded files between progress events.
    #[builder(default = "1000")]
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

fn default_progress_interval() -> u64 {
    1000
}

impl WalkConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                return Err("Root path cannot be empty".to_string());
            }
            None => return Err("Root path is required".to_string()),
            Some(_) => {}
        }
        if self.progress_interval == Some(0) {
            return Err("Progress interval must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl WalkConfig {
    /// Create a new walk config builder.
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Create a default config for indexing a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            threads: 0,
            warnings: false,
            include_hidden: false,
            progress_interval: default_progress_interval(),
        }
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
