//! Build configuration read from a RON file.
//!
//! ```ron
//! (
//!     output_dir: "out",
//!     formats: [Step, Stl, ThreeMf],
//!     segments: 96,
//!     parts: {
//!         "gear_slotter": { "height": 10.0 },
//!     },
//! )
//! ```

use crate::io::ExportFormat;
use crate::parts::Quality;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "printparts.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("unknown part `{0}`")]
    UnknownPart(String),

    #[error("invalid parameters for part `{part}`: {message}")]
    Override { part: String, message: String },
}

/// Output settings plus per-part parameter overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartsConfig {
    pub output_dir: PathBuf,
    pub formats: Vec<ExportFormat>,
    /// Segments used for a full circle.
    pub segments: usize,
    /// Part name to a partial parameter set, e.g. `{ "height": 10.0 }`.
    pub parts: BTreeMap<String, ron::Value>,
}

impl Default for PartsConfig {
    fn default() -> Self {
        PartsConfig {
            output_dir: PathBuf::from("out"),
            formats: ExportFormat::DEFAULTS.to_vec(),
            segments: Quality::default().segments,
            parts: BTreeMap::new(),
        }
    }
}

impl PartsConfig {
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(content)?)
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn quality(&self) -> Quality {
        Quality {
            segments: self.segments.max(3),
        }
    }

    /// Parameters for part `name`: its defaults with the configured fields replaced.
    pub fn overrides_for<P>(&self, name: &str) -> Result<P, ConfigError>
    where
        P: DeserializeOwned + Default,
    {
        match self.parts.get(name) {
            None => Ok(P::default()),
            Some(value) => value.clone().into_rust::<P>().map_err(|e| ConfigError::Override {
                part: name.to_string(),
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Deserialize)]
    #[serde(default)]
    struct Sample {
        width: f64,
        height: f64,
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = PartsConfig::from_ron_str("(segments: 32)").unwrap();
        assert_eq!(config.segments, 32);
        assert_eq!(config.formats, ExportFormat::DEFAULTS.to_vec());
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn part_overrides_are_partial() {
        let config = PartsConfig::from_ron_str(r#"(parts: { "sample": { "height": 2.5 } })"#).unwrap();
        let sample: Sample = config.overrides_for("sample").unwrap();
        assert_eq!(sample, Sample { width: 0.0, height: 2.5 });
        let untouched: Sample = config.overrides_for("other").unwrap();
        assert_eq!(untouched, Sample::default());
    }

    #[test]
    fn wrong_override_type_is_reported() {
        let config = PartsConfig::from_ron_str(r#"(parts: { "sample": { "height": "tall" } })"#).unwrap();
        assert!(matches!(
            config.overrides_for::<Sample>("sample"),
            Err(ConfigError::Override { .. })
        ));
    }
}
