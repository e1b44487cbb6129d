//! Configuration module
//!
//! The upload configuration is an immutable bundle passed with every pipeline call.
//! Keys mirror the form-handling conventions the bundle is usually written in:
//! `upload_dir`, `types` (`"png|jpg"`), `max_size` (decimal kilobytes),
//! `min_dimension` / `max_dimension` (`"W*H"`), `unique_name`, `name_uppercase`
//! and `no_spaces`.
//!
//! A missing optional key means its rule is skipped entirely; it is never evaluated
//! against a default threshold. `unique_name` is the only key with a default (`true`).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{BYTES_PER_KB, ENV_PREFIX};
use crate::models::Dimensions;

/// Configuration parsing and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid dimensions: {0:?} (expected WIDTH*HEIGHT)")]
    InvalidDimensions(String),

    #[error("`{key}` must have a non-zero width and height, got {value}")]
    ZeroDimension { key: &'static str, value: Dimensions },

    #[error("`types` contains an empty entry")]
    EmptyType,

    #[error("min_dimension {min} exceeds max_dimension {max}")]
    MinExceedsMax { min: Dimensions, max: Dimensions },

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Environment configuration error: {0}")]
    Env(#[from] envy::Error),
}

/// Per-upload configuration bundle
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub upload_dir: Option<PathBuf>,
    /// Allowed MIME subtypes (`png`, `jpg`, ...).
    #[serde(rename = "types", with = "pipe_list")]
    pub allowed_types: Option<BTreeSet<String>>,
    #[serde(rename = "max_size")]
    pub max_size_kb: Option<u64>,
    pub min_dimension: Option<Dimensions>,
    pub max_dimension: Option<Dimensions>,
    pub unique_name: Option<bool>,
    pub name_uppercase: Option<bool>,
    pub no_spaces: Option<bool>,
}

impl UploadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `STOWAGE_*` environment variables, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Failed to load .env file");
            }
        }

        let config = envy::prefixed(ENV_PREFIX).from_env::<UploadConfig>()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: UploadConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject bundles that no file could ever satisfy consistently.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(types) = &self.allowed_types {
            if types.iter().any(|t| t.is_empty()) {
                return Err(ConfigError::EmptyType);
            }
        }

        for (key, dims) in [
            ("min_dimension", self.min_dimension),
            ("max_dimension", self.max_dimension),
        ] {
            if let Some(value) = dims {
                if value.width == 0 || value.height == 0 {
                    return Err(ConfigError::ZeroDimension { key, value });
                }
            }
        }

        if let (Some(min), Some(max)) = (self.min_dimension, self.max_dimension) {
            if min.exceeds(&max) {
                return Err(ConfigError::MinExceedsMax { min, max });
            }
        }

        Ok(())
    }

    pub fn with_upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_max_size_kb(mut self, kb: u64) -> Self {
        self.max_size_kb = Some(kb);
        self
    }

    pub fn with_min_dimension(mut self, width: u32, height: u32) -> Self {
        self.min_dimension = Some(Dimensions::new(width, height));
        self
    }

    pub fn with_max_dimension(mut self, width: u32, height: u32) -> Self {
        self.max_dimension = Some(Dimensions::new(width, height));
        self
    }

    pub fn with_unique_name(mut self, unique: bool) -> Self {
        self.unique_name = Some(unique);
        self
    }

    pub fn with_name_uppercase(mut self, uppercase: bool) -> Self {
        self.name_uppercase = Some(uppercase);
        self
    }

    pub fn with_no_spaces(mut self, no_spaces: bool) -> Self {
        self.no_spaces = Some(no_spaces);
        self
    }

    // Convenience getters
    pub fn upload_dir(&self) -> Option<&Path> {
        self.upload_dir.as_deref()
    }

    /// Size threshold in bytes (`max_size * 1000`).
    pub fn max_size_bytes(&self) -> Option<u64> {
        self.max_size_kb.map(|kb| kb.saturating_mul(BYTES_PER_KB))
    }

    pub fn unique_name(&self) -> bool {
        self.unique_name.unwrap_or(true)
    }

    pub fn name_uppercase(&self) -> bool {
        self.name_uppercase.unwrap_or(false)
    }

    pub fn no_spaces(&self) -> bool {
        self.no_spaces.unwrap_or(false)
    }
}

/// `"png|jpg"` <-> `{"jpg", "png"}`
mod pipe_list {
    use std::collections::BTreeSet;

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::constants::TYPES_SEPARATOR;

    pub fn serialize<S>(value: &Option<BTreeSet<String>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(set) => {
                let joined = set
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(&TYPES_SEPARATOR.to_string());
                serializer.serialize_some(&joined)
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BTreeSet<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| s.split(TYPES_SEPARATOR).map(str::to_string).collect()))
    }
}
