//! Output layout configuration
//!
//! The base directory is always supplied by the caller; nothing here looks at
//! the process working directory.

use crate::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where generated artifacts land inside the target repository
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Repository root all other paths are relative to
    #[serde(default)]
    pub base_dir: PathBuf,

    /// Root for generated source stubs
    #[serde(default = "default_code_dir")]
    pub code_dir: PathBuf,

    /// Root for generated documentation stubs
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
}

fn default_code_dir() -> PathBuf {
    PathBuf::from("generated")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("website/docs/generated")
}

impl GeneratorConfig {
    /// Default layout rooted at `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            code_dir: default_code_dir(),
            docs_dir: default_docs_dir(),
        }
    }

    /// Load layout overrides from a YAML file
    ///
    /// A relative `base_dir` in the file is resolved against the file's own
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let mut config: Self = serde_yaml::from_str(&content).map_err(|e| {
            GeneratorError::Config(format!("Failed to parse config YAML from {:?}: {}", path, e))
        })?;

        if config.base_dir.is_relative() {
            let parent = path.parent().unwrap_or_else(|| Path::new(""));
            config.base_dir = parent.join(&config.base_dir);
        }

        Ok(config)
    }

    /// Replace the base directory
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Absolute root for source stubs
    pub fn code_root(&self) -> PathBuf {
        self.base_dir.join(&self.code_dir)
    }

    /// Absolute root for documentation stubs
    pub fn docs_root(&self) -> PathBuf {
        self.base_dir.join(&self.docs_dir)
    }
}
