//! Configuration for jsmv
//!
//! Two independent sources feed a run:
//! - [`AppConfig`]: tool settings (logging, source suffix, traversal excludes),
//!   layered from defaults, `.jsmv.toml` and `JSMV_*` environment variables.
//! - [`ResolutionConfig`]: the project's module-resolution aliases and roots,
//!   read from its Babel configuration.

pub mod config;
pub mod logging;
pub mod resolution;

pub use config::{AppConfig, ConfigError, LogFormat, LoggingConfig};
pub use resolution::ResolutionConfig;
