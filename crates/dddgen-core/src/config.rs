use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default config file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".dddgen.yaml";

/// Router aggregator used when no config overrides it.
pub const DEFAULT_ROUTER_FILE: &str = "internal/interfaces/http/router/router.go";

/// Dependency container aggregator used when no config overrides it.
pub const DEFAULT_CONTAINER_FILE: &str = "internal/container/container.go";

/// Project configuration loaded from `.dddgen.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DddGenConfig {
    /// Router aggregator file, relative to the project root.
    pub router_file: PathBuf,
    /// Dependency container aggregator file, relative to the project root.
    pub container_file: PathBuf,
    /// Manifest the module path is read from.
    pub manifest: PathBuf,
    /// Module path used when the manifest has no `module` line.
    pub default_module_path: String,
    /// Directory of template overrides. Embedded templates are used when unset.
    pub templates: Option<PathBuf>,
}

impl Default for DddGenConfig {
    fn default() -> Self {
        Self {
            router_file: PathBuf::from(DEFAULT_ROUTER_FILE),
            container_file: PathBuf::from(DEFAULT_CONTAINER_FILE),
            manifest: PathBuf::from("go.mod"),
            default_module_path: "go-ddd-scaffold".to_string(),
            templates: None,
        }
    }
}

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<DddGenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded config from {}", path.display());
    Ok(Some(config))
}
