//! Configuration management for treesame.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::identity::IdentityStrategy;

/// Name of the config file inside the `.git` directory.
pub const CONFIG_FILE: &str = "treesame.toml";

/// Shortest abbreviated commit id accepted in config.
pub const MIN_SHORT_HASH_LEN: usize = 4;

/// Longest abbreviated commit id accepted in config (a full SHA-1).
pub const MAX_SHORT_HASH_LEN: usize = 40;

/// Configuration loaded from `.git/treesame.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Change identity settings.
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load config from a TOML file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::ConfigParse {
            file: path.to_path_buf(),
            message: e.message().to_owned(),
        })?;

        let len = config.output.short_hash_len;
        if !(MIN_SHORT_HASH_LEN..=MAX_SHORT_HASH_LEN).contains(&len) {
            return Err(Error::ConfigParse {
                file: path.to_path_buf(),
                message: format!(
                    "output.short_hash_len must be between {MIN_SHORT_HASH_LEN} and {MAX_SHORT_HASH_LEN}, got {len}"
                ),
            });
        }

        Ok(config)
    }

    /// Load the config stored in a repository's `.git` directory.
    ///
    /// # Errors
    /// Returns error if the file exists but can't be read or parsed.
    pub fn load_from_git_dir(git_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(git_dir.as_ref().join(CONFIG_FILE))
    }
}

/// How commits are matched across the two sides.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Primary identity strategy.
    #[serde(default)]
    pub strategy: IdentityStrategy,

    /// Trailer key read by the trailer strategy.
    #[serde(default = "default_trailer")]
    pub trailer: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            strategy: IdentityStrategy::default(),
            trailer: default_trailer(),
        }
    }
}

fn default_trailer() -> String {
    "Change-Id".into()
}

/// Output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Number of hex digits shown for commit ids.
    #[serde(default = "default_short_hash_len")]
    pub short_hash_len: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            short_hash_len: default_short_hash_len(),
        }
    }
}

const fn default_short_hash_len() -> usize {
    8
}
