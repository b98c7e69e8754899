//! Tool configuration for jsmv.
//!
//! Settings are merged from three layers, later layers winning:
//!
//! 1. Built-in defaults ([`AppConfig::default`]).
//! 2. `<project root>/.jsmv.toml`.
//! 3. Environment variables prefixed with `JSMV_`, nested keys split on `__`
//!    (`JSMV_LOGGING__LEVEL=debug`).
//!
//! # Example `.jsmv.toml`
//!
//! ```toml
//! source_extension = "js"
//! ignored_dirs = ["node_modules", "vendor"]
//! path_case = "sensitive"
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use jsmv_foundation::paths::PathCase;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Name of the optional per-project settings file
pub const CONFIG_FILE_NAME: &str = ".jsmv.toml";

/// Root tool configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    /// Suffix of scanned source files, without the dot
    pub source_extension: String,
    /// Directory names never descended into
    pub ignored_dirs: Vec<String>,
    /// Case policy for file identity comparisons
    pub path_case: PathCase,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
}

/// Output format for log lines.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            source_extension: "js".to_string(),
            ignored_dirs: vec!["node_modules".to_string()],
            path_case: PathCase::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Loads configuration from defaults, the project's `.jsmv.toml`, and the environment.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("JSMV_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Filename a directory reference resolves to, e.g. `index.js`
    pub fn index_file_name(&self) -> String {
        format!("index.{}", self.source_extension)
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Figment error: {0}")]
    Figment(#[from] figment::Error),
}

impl From<ConfigError> for figment::Error {
    fn from(err: ConfigError) -> figment::Error {
        match err {
            ConfigError::Figment(inner) => inner,
        }
    }
}
