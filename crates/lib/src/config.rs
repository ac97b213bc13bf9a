//! Injection configuration.
//!
//! One struct carries every input the injection pipeline needs. It can be
//! loaded from a TOML file, or from JSON when the file ends in `.json`:
//!
//! ```toml
//! working_dir = "/build"
//! script_name = "/tmp/cleanup.sh"
//!
//! [[injections]]
//! source = "/secrets/id_rsa"
//! destination = "."
//!
//! [[injections]]
//! source = "/secrets/certs"
//! destination = "tls"
//! keep = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::injection::InjectionList;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read config {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse TOML config {path}: {source}")]
  Toml {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("failed to parse JSON config {path}: {source}")]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid config: {0}")]
  Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectionConfig {
  /// Absolute working directory of the image; relative destinations resolve against it.
  pub working_dir: PathBuf,

  #[serde(default)]
  pub injections: InjectionList,

  /// Container path of the cleanup script itself, truncated along with the secrets.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub script_name: Option<PathBuf>,
}

impl InjectionConfig {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    if path.extension().is_some_and(|e| e == "json") {
      serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
      })
    } else {
      toml::from_str(&raw).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
      })
    }
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !self.working_dir.is_absolute() {
      return Err(ConfigError::Invalid(format!(
        "working_dir must be absolute: {}",
        self.working_dir.display()
      )));
    }

    if let Some(spec) = self.injections.iter().find(|spec| spec.source.as_os_str().is_empty()) {
      return Err(ConfigError::Invalid(format!(
        "injection source must not be empty (destination {:?})",
        spec.destination
      )));
    }

    if let Some(name) = &self.script_name {
      let text = name.to_string_lossy();
      if text.contains('\0') {
        return Err(ConfigError::Invalid(format!("script_name contains a NUL byte: {text:?}")));
      }
    }

    Ok(())
  }
}
