use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Manages a temporary JavaScript project for a test scenario.
/// Cleans up automatically when dropped.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a new empty workspace.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Returns the root path of the workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Creates a file with content within the workspace.
    /// Automatically creates parent directories.
    pub fn create_file(&self, rel_path: &str, content: &str) {
        let file_path = self.path().join(rel_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent dirs for '{}': {}", rel_path, e)
            });
        }
        fs::write(&file_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", file_path.display(), e));
    }

    /// Creates a directory within the workspace.
    pub fn create_directory(&self, rel_path: &str) {
        let dir_path = self.path().join(rel_path);
        fs::create_dir_all(&dir_path).unwrap_or_else(|e| {
            panic!("Failed to create directory '{}': {}", dir_path.display(), e)
        });
    }

    /// Reads a file from the workspace.
    pub fn read_file(&self, rel_path: &str) -> String {
        let file_path = self.path().join(rel_path);
        fs::read_to_string(&file_path)
            .unwrap_or_else(|e| panic!("Failed to read file '{}': {}", file_path.display(), e))
    }

    /// Check if a file exists in the workspace.
    pub fn file_exists(&self, rel_path: &str) -> bool {
        self.path().join(rel_path).exists()
    }

    /// Get the absolute path to a file in the workspace.
    pub fn absolute_path(&self, rel_path: &str) -> PathBuf {
        self.path().join(rel_path)
    }

    /// Create a `.babelrc` configuring the module-resolver plugin.
    ///
    /// `aliases` keep their order in the generated file.
    pub fn create_babelrc(&self, roots: &[&str], aliases: &[(&str, &str)]) {
        let alias: serde_json::Map<String, serde_json::Value> = aliases
            .iter()
            .map(|(name, target)| (name.to_string(), serde_json::json!(target)))
            .collect();

        let babelrc = serde_json::json!({
            "presets": ["@babel/preset-env"],
            "plugins": [
                ["module-resolver", {
                    "root": roots,
                    "alias": alias,
                }]
            ]
        });

        self.create_file(
            ".babelrc",
            &serde_json::to_string_pretty(&babelrc).unwrap(),
        );
    }

    /// Create a package.json file for a JavaScript project.
    pub fn create_package_json(&self, name: &str) {
        let package_json = serde_json::json!({
            "name": name,
            "version": "1.0.0",
            "main": "src/index.js",
            "dependencies": {},
            "devDependencies": {
                "babel-plugin-module-resolver": "^5.0.0"
            }
        });

        self.create_file(
            "package.json",
            &serde_json::to_string_pretty(&package_json).unwrap(),
        );
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
