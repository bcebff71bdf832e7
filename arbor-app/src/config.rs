//! User configuration, read from `config.json` in the config directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use arbor::CategoryId;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use thiserror::Error;

use crate::paths::AppDirs;

/// Errors from reading a config file that exists.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Application configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog to load. Defaults to `catalog.json` in the data directory.
    pub catalog_path: Option<PathBuf>,

    /// Category selected at startup. Defaults to the root.
    pub initial_selection: Option<CategoryId>,

    /// Cells of indentation per tree level.
    pub indent: u16,

    /// Start with the root category folded.
    pub root_folded: bool,

    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,

    /// Prefix log lines with the time.
    pub log_timestamp: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            initial_selection: None,
            indent: 2,
            root_folded: false,
            log_level: "info".to_string(),
            log_timestamp: true,
        }
    }
}

/// Where the config came from, for logging once the logger is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults { looked_in: Option<PathBuf> },
}

impl Config {
    /// Load the config from the platform config directory.
    ///
    /// A missing file yields the defaults. An unreadable or malformed file is
    /// an error.
    pub fn load() -> Result<(Self, ConfigSource), ConfigError> {
        match AppDirs::locate().map(|dirs| dirs.config_file()) {
            Some(path) => Self::load_from(&path),
            None => Ok((Self::default(), ConfigSource::Defaults { looked_in: None })),
        }
    }

    pub fn load_from(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok((
                    Self::default(),
                    ConfigSource::Defaults {
                        looked_in: Some(path.to_path_buf()),
                    },
                ));
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The configured log level, or `Info` if it does not parse.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// The catalog to load: the configured path, else the default location.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog_path
            .clone()
            .or_else(|| AppDirs::locate().map(|dirs| dirs.catalog_file()))
    }
}
