use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::segmenter::{MAX_SEGMENT_LENGTH, MIN_SEGMENT_LENGTH};

/// Segmenter settings, read from the `[segmenter]` table of a TOML file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Maximum characters per post
    pub max_length: usize,
    /// Prefix posts with `k/n ` when the thread has more than one
    pub numbering: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_length: MAX_SEGMENT_LENGTH,
            numbering: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    segmenter: SegmenterConfig,
}

impl SegmenterConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::info!(path = %path.display(), max_length = config.max_length, "Loaded segmenter config");
        Ok(config)
    }

    /// Load a config file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), "Falling back to default segmenter config: {err}");
                Self::default()
            }
        }
    }

    /// Parse the `[segmenter]` table out of TOML text
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<ConfigFile>(contents).map(|file| file.segmenter)
    }

    /// Reject limits too small for the continuation marker to make progress
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_length < MIN_SEGMENT_LENGTH {
            return Err(ConfigError::InvalidMaxLength {
                length: self.max_length,
                min: MIN_SEGMENT_LENGTH,
            });
        }
        Ok(())
    }
}
