//! Loading generator configuration from disk.
//!
//! The configuration file is TOML (`.toml`) or JSON (`.json`). Relative
//! paths inside it are resolved against the directory that contains it, so
//! the generator can be run from anywhere.

use std::fs;
use std::path::{Path, PathBuf};

use splitapi_define::GeneratorConfig;

use crate::errors::GeneratorError;

/// A [`GeneratorConfig`] together with the directory its paths are relative to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// The configuration as written.
    pub config: GeneratorConfig,
    /// Directory containing the configuration file.
    pub base_dir: PathBuf,
}

impl ResolvedConfig {
    /// Wraps a configuration whose paths are relative to `base_dir`.
    pub fn new(config: GeneratorConfig, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            base_dir: base_dir.into(),
        }
    }

    /// Path of the OpenAPI document.
    pub fn schema_path(&self) -> PathBuf {
        self.resolve(&self.config.schema_file)
    }

    /// Path of the base client module.
    pub fn api_path(&self) -> PathBuf {
        self.resolve(&self.config.api_file)
    }

    /// Path of the generated module.
    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.config.output_file)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Reads a configuration file.
///
/// ## Errors
///
/// Returns [`GeneratorError::ConfigRead`] if the file cannot be read and
/// [`GeneratorError::ConfigParse`] if its extension is unknown or its
/// content does not deserialize.
pub fn load_config(path: &Path) -> Result<ResolvedConfig, GeneratorError> {
    let content = fs::read_to_string(path).map_err(|source| GeneratorError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_error = |message: String| GeneratorError::ConfigParse {
        path: path.to_path_buf(),
        message,
    };

    let config: GeneratorConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        _ => {
            return Err(parse_error(
                "expected a .toml or .json configuration file".to_string(),
            ));
        }
    };

    let base_dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::debug!(config = %path.display(), base_dir = %base_dir.display(), "Loaded generator config");
    Ok(ResolvedConfig::new(config, base_dir))
}
