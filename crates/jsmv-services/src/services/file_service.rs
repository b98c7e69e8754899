//! Filesystem access for a move: source discovery, writes, and the final rename

use jsmv_config::AppConfig;
use jsmv_foundation::{JsmvError, JsmvResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Predicate over directory paths; a match prunes the whole subtree
pub type ExcludeMatcher<'a> = Box<dyn Fn(&Path) -> bool + 'a>;

#[derive(Debug, Clone)]
pub struct FileService {
    source_extension: String,
    ignored_dirs: Vec<String>,
}

impl FileService {
    pub fn new(source_extension: impl Into<String>, ignored_dirs: Vec<String>) -> Self {
        Self {
            source_extension: source_extension.into(),
            ignored_dirs,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.source_extension.clone(), config.ignored_dirs.clone())
    }

    /// True for directories named like a dependency cache, e.g. `node_modules`
    pub fn is_ignored_dir(&self, dir: &Path) -> bool {
        dir.file_name()
            .and_then(|name| name.to_str())
            .map(|name| self.ignored_dirs.iter().any(|ignored| ignored == name))
            .unwrap_or(false)
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext == self.source_extension)
            .unwrap_or(false)
    }

    /// Every source file under `dir`, sorted by path within each directory.
    ///
    /// Ignored directories and directories matched by any of `excludes` are
    /// not descended into. The starting directory itself is never pruned.
    pub fn find_source_files(
        &self,
        dir: &Path,
        excludes: &[ExcludeMatcher<'_>],
    ) -> JsmvResult<Vec<PathBuf>> {
        let walker = WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                let path = entry.path();
                !self.is_ignored_dir(path) && !excludes.iter().any(|matches| matches(path))
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(walk_error)?;
            if entry.file_type().is_file() && self.is_source_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        debug!(dir = %dir.display(), count = files.len(), "Found source files");
        Ok(files)
    }

    pub fn read(&self, path: &Path) -> JsmvResult<String> {
        fs::read_to_string(path).map_err(|e| JsmvError::io_at(path, e))
    }

    pub fn write(&self, path: &Path, content: &str) -> JsmvResult<()> {
        fs::write(path, content).map_err(|e| JsmvError::io_at(path, e))
    }

    /// Rename a file or directory, creating the destination's parent first.
    pub fn rename_entry(&self, old: &Path, new: &Path) -> JsmvResult<()> {
        if let Some(parent) = new.parent() {
            fs::create_dir_all(parent).map_err(|e| JsmvError::io_at(parent, e))?;
        }

        debug!(old = %old.display(), new = %new.display(), "Renaming on disk");
        fs::rename(old, new).map_err(|e| JsmvError::io_at(old, e))
    }
}

impl Default for FileService {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

fn walk_error(error: walkdir::Error) -> JsmvError {
    let path = error.path().map(Path::to_path_buf);
    let message = error.to_string();
    JsmvError::Io {
        message,
        path,
        source: error.into_io_error(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsmv_foundation::paths::is_super_directory;
    use jsmv_test_support::harness::TestWorkspace;
    use pretty_assertions::assert_eq;

    fn relative(workspace: &TestWorkspace, files: Vec<PathBuf>) -> Vec<String> {
        files
            .into_iter()
            .map(|f| {
                f.strip_prefix(workspace.path())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_finds_only_source_files_outside_node_modules() {
        let workspace = TestWorkspace::new();
        workspace.create_file("src/app.js", "");
        workspace.create_file("src/styles.css", "");
        workspace.create_file("src/lib/util.js", "");
        workspace.create_file("node_modules/react/index.js", "");
        workspace.create_file("src/node_modules/local/index.js", "");

        let service = FileService::default();
        let files = service.find_source_files(workspace.path(), &[]).unwrap();

        assert_eq!(
            relative(&workspace, files),
            vec!["src/app.js".to_string(), "src/lib/util.js".to_string()]
        );
    }

    #[test]
    fn test_exclude_matcher_prunes_subtree() {
        let workspace = TestWorkspace::new();
        workspace.create_file("src/app.js", "");
        workspace.create_file("src/widgets/button.js", "");
        workspace.create_file("src/widgets/inner/deep.js", "");

        let widgets = workspace.absolute_path("src/widgets");
        let excludes: Vec<ExcludeMatcher> =
            vec![Box::new(move |dir: &Path| is_super_directory(&widgets, dir))];

        let service = FileService::default();
        let files = service.find_source_files(workspace.path(), &excludes).unwrap();

        assert_eq!(relative(&workspace, files), vec!["src/app.js".to_string()]);
    }

    #[test]
    fn test_rename_entry_creates_parent() {
        let workspace = TestWorkspace::new();
        workspace.create_file("src/a.js", "a");

        let service = FileService::default();
        service
            .rename_entry(
                &workspace.absolute_path("src/a.js"),
                &workspace.absolute_path("lib/deep/a.js"),
            )
            .unwrap();

        assert!(!workspace.file_exists("src/a.js"));
        assert_eq!(workspace.read_file("lib/deep/a.js"), "a");
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let workspace = TestWorkspace::new();
        let service = FileService::default();
        let err = service.read(&workspace.absolute_path("missing.js")).unwrap_err();
        assert!(err.to_string().contains("missing.js"));
    }
}
