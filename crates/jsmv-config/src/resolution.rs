//! Module-resolution configuration read from the project's Babel config
//!
//! Recognizes the `module-resolver` plugin entry:
//!
//! ```json
//! {
//!   "plugins": [
//!     ["module-resolver", {
//!       "root": ["./src"],
//!       "alias": { "components": "./src/components" }
//!     }]
//!   ]
//! }
//! ```
//!
//! A missing file or plugin entry yields an empty configuration. A malformed
//! file is logged and also yields an empty configuration.

use indexmap::IndexMap;
use jsmv_foundation::{JsmvError, JsmvResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Babel config files probed at the project root, first hit wins
pub const BABEL_CONFIG_FILES: &[&str] = &[".babelrc", "babel.config.json"];

const PLUGIN_NAMES: &[&str] = &["module-resolver", "babel-plugin-module-resolver"];

/// Alias table and implicit roots, immutable for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Alias name → project-relative target directory, in declaration order
    pub alias: IndexMap<String, String>,
    /// Project-relative directories tried for non-relative references
    pub root: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct BabelConfig {
    #[serde(default)]
    plugins: Vec<Value>,
}

impl ResolutionConfig {
    /// Load the configuration for `project_root`, degrading to empty.
    pub fn load(project_root: &Path) -> Self {
        for name in BABEL_CONFIG_FILES {
            let path = project_root.join(name);
            if !path.is_file() {
                continue;
            }
            return match Self::from_file(&path) {
                Ok(Some(config)) => {
                    debug!(
                        config_file = %path.display(),
                        aliases = config.alias.len(),
                        roots = config.root.len(),
                        "Loaded module-resolver configuration"
                    );
                    config
                }
                Ok(None) => {
                    debug!(config_file = %path.display(), "No module-resolver plugin configured");
                    Self::default()
                }
                Err(e) => {
                    warn!(
                        config_file = %path.display(),
                        error = %e,
                        "Failed to read Babel config, continuing without aliases"
                    );
                    Self::default()
                }
            };
        }
        Self::default()
    }

    /// Parse one Babel config file. `Ok(None)` when it has no resolver plugin.
    pub fn from_file(path: &Path) -> JsmvResult<Option<Self>> {
        let content = std::fs::read_to_string(path).map_err(|e| JsmvError::io_at(path, e))?;
        Self::from_babel_json(&content)
    }

    /// Parse Babel config JSON text.
    pub fn from_babel_json(content: &str) -> JsmvResult<Option<Self>> {
        let babel: BabelConfig = serde_json::from_str(content)?;

        for plugin in &babel.plugins {
            match plugin {
                Value::String(name) if PLUGIN_NAMES.contains(&name.as_str()) => {
                    return Ok(Some(Self::default()));
                }
                Value::Array(entry) => {
                    let is_resolver = entry
                        .first()
                        .and_then(Value::as_str)
                        .map(|name| PLUGIN_NAMES.contains(&name))
                        .unwrap_or(false);
                    if !is_resolver {
                        continue;
                    }
                    return match entry.get(1) {
                        Some(options) => {
                            let config: Self =
                                serde_json::from_value(options.clone()).map_err(|e| {
                                    JsmvError::config(format!("invalid module-resolver options: {e}"))
                                })?;
                            Ok(Some(config))
                        }
                        None => Ok(Some(Self::default())),
                    };
                }
                _ => {}
            }
        }
        Ok(None)
    }

    pub fn is_empty(&self) -> bool {
        self.alias.is_empty() && self.root.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_module_resolver_entry() {
        let config = ResolutionConfig::from_babel_json(
            r#"{
                "presets": ["@babel/preset-env"],
                "plugins": [
                    "transform-runtime",
                    ["module-resolver", {
                        "root": ["./src"],
                        "alias": { "zeta": "./lib/z", "alpha": "./lib/a" }
                    }]
                ]
            }"#,
        )
        .unwrap()
        .unwrap();

        assert_eq!(config.root, vec!["./src".to_string()]);
        // Declaration order is preserved
        let names: Vec<&str> = config.alias.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_plugin_without_options() {
        let config = ResolutionConfig::from_babel_json(r#"{"plugins": ["module-resolver"]}"#)
            .unwrap()
            .unwrap();
        assert!(config.is_empty());
    }

    #[test]
    fn test_missing_plugin_is_none() {
        let parsed = ResolutionConfig::from_babel_json(r#"{"plugins": [["other", {}]]}"#).unwrap();
        assert!(parsed.is_none());
        let parsed = ResolutionConfig::from_babel_json("{}").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(ResolutionConfig::from_babel_json("{ plugins: ").is_err());
        assert!(ResolutionConfig::from_babel_json(
            r#"{"plugins": [["module-resolver", {"root": "not-a-list"}]]}"#
        )
        .is_err());
    }

    #[test]
    fn test_load_degrades_silently() {
        let temp_dir = TempDir::new().unwrap();
        assert!(ResolutionConfig::load(temp_dir.path()).is_empty());

        std::fs::write(temp_dir.path().join(".babelrc"), "not json").unwrap();
        assert!(ResolutionConfig::load(temp_dir.path()).is_empty());
    }

    #[test]
    fn test_load_falls_back_to_babel_config_json() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("babel.config.json"),
            r#"{"plugins": [["babel-plugin-module-resolver", {"alias": {"app": "./src"}}]]}"#,
        )
        .unwrap();

        let config = ResolutionConfig::load(temp_dir.path());
        assert_eq!(config.alias.get("app").map(String::as_str), Some("./src"));
    }
}
