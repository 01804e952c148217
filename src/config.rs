//! Translator configuration loaded from TOML.
//!
//! ```toml
//! [paths]
//! reserved = ["_id", "uid", "collection", "name"]
//! metadata_namespace = "metadata"
//! value_key = "value"
//! ```
//!
//! Every key is optional; omitted keys fall back to [`TranslatorConfig::default`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Top-level record attributes that are never namespaced.
pub const DEFAULT_RESERVED_FIELDS: [&str; 4] = ["_id", "uid", "collection", "name"];
/// Namespace holding arbitrary metadata entries.
pub const DEFAULT_METADATA_NAMESPACE: &str = "metadata";
/// Key under which each metadata entry stores its literal.
pub const DEFAULT_VALUE_KEY: &str = "value";

/// Validated translator settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Field names that map to themselves.
    pub reserved_fields: Vec<String>,
    /// First path segment for metadata fields.
    pub metadata_namespace: String,
    /// Last path segment for metadata comparisons.
    pub value_key: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            reserved_fields: DEFAULT_RESERVED_FIELDS.iter().map(|f| f.to_string()).collect(),
            metadata_namespace: DEFAULT_METADATA_NAMESPACE.to_string(),
            value_key: DEFAULT_VALUE_KEY.to_string(),
        }
    }
}

impl TranslatorConfig {
    /// Reads and validates a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            origin: path.display().to_string(),
            source,
        })?;
        let config = convert(raw)?;
        debug!(path = %path.display(), reserved = config.reserved_fields.len(), "loaded translator config");
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            origin: "<inline>".to_string(),
            source,
        })?;
        convert(raw)
    }

    /// Serializes the settings back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        let raw = RawConfig {
            paths: RawPaths {
                reserved: Some(self.reserved_fields.clone()),
                metadata_namespace: Some(self.metadata_namespace.clone()),
                value_key: Some(self.value_key.clone()),
            },
        };
        toml::to_string_pretty(&raw).map_err(|source| ConfigError::Serialize { source })
    }
}

fn convert(raw: RawConfig) -> Result<TranslatorConfig, ConfigError> {
    let defaults = TranslatorConfig::default();
    let paths = raw.paths;
    let metadata_namespace = paths
        .metadata_namespace
        .unwrap_or(defaults.metadata_namespace);
    check_segment("metadata_namespace", &metadata_namespace)?;
    let value_key = paths.value_key.unwrap_or(defaults.value_key);
    check_segment("value_key", &value_key)?;
    let reserved_fields = paths.reserved.unwrap_or(defaults.reserved_fields);
    if reserved_fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ConfigError::EmptyReservedField);
    }
    Ok(TranslatorConfig {
        reserved_fields,
        metadata_namespace,
        value_key,
    })
}

fn check_segment(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EmptySegment { key });
    }
    if value.contains('.') {
        return Err(ConfigError::DottedSegment {
            key,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawConfig {
    #[serde(default)]
    paths: RawPaths,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawPaths {
    reserved: Option<Vec<String>>,
    metadata_namespace: Option<String>,
    value_key: Option<String>,
}

/// Errors raised while loading translator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read translator config {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// The TOML was malformed.
    #[error("failed to parse translator config {origin}: {source}")]
    Parse {
        /// File path or `<inline>`.
        origin: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
    /// Settings could not be rendered to TOML.
    #[error("failed to serialize translator config: {source}")]
    Serialize {
        /// Underlying TOML error.
        source: toml::ser::Error,
    },
    /// A path segment was blank.
    #[error("paths.{key} cannot be empty")]
    EmptySegment {
        /// Offending key.
        key: &'static str,
    },
    /// A path segment contained a dot.
    #[error("paths.{key} must be a single path segment (got '{value}')")]
    DottedSegment {
        /// Offending key.
        key: &'static str,
        /// Supplied value.
        value: String,
    },
    /// The reserved list contained a blank name.
    #[error("paths.reserved cannot contain empty field names")]
    EmptyReservedField,
}
