//! Module resolution for JavaScript references
//!
//! Resolves a raw reference string, as found in source text, to the file it
//! lands on, using the same layered lookup as Babel's `module-resolver`:
//!
//! 1. Relative references (`./x`, `../x`) against the referencing directory
//! 2. Implicit roots, in declared order (`"root": ["./src"]`)
//! 3. Aliases keyed by the first path segment (`"alias": {"ui": "./src/ui"}`)
//!
//! Anything else is treated as an external package and never rewritten.
//!
//! The inverse direction, [`ModuleResolver::to_prefixed_reference`], turns an
//! absolute path back into root- or alias-prefixed reference text.

use jsmv_config::ResolutionConfig;
use jsmv_foundation::paths::{
    add_suffix, get_suffix, is_relative, is_same_file_with, is_super_directory, normalize_path,
    parse_filename, to_slash, trim_suffix, PathCase,
};
use jsmv_foundation::{JsmvError, JsmvResult};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Image assets that may be imported without their extension
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "gif"];

/// How a reference was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVia {
    Relative,
    /// Through the implicit root at this index of the configured list
    Root(usize),
    /// Through the named alias
    Alias(String),
}

/// A reference resolved inside the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// File the reference lands on. For non-code assets this is the written
    /// path, which need not exist.
    pub path: PathBuf,
    /// Normalized candidate path before index/extension completion. It keeps
    /// the written form: `./utils` gives `<dir>/utils`, not `<dir>/utils.js`.
    pub request: PathBuf,
    pub via: ResolvedVia,
}

impl ResolvedModule {
    pub fn is_relative(&self) -> bool {
        self.via == ResolvedVia::Relative
    }
}

/// Resolver bound to one project root and its resolution configuration.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    project_root: PathBuf,
    config: ResolutionConfig,
    source_extension: String,
    index_file: String,
    path_case: PathCase,
}

impl ModuleResolver {
    /// Create a resolver for `.js` sources with `index.js` directory entries
    pub fn new(project_root: &Path, config: ResolutionConfig) -> Self {
        Self {
            project_root: normalize_path(project_root),
            config,
            source_extension: "js".to_string(),
            index_file: "index.js".to_string(),
            path_case: PathCase::default(),
        }
    }

    /// Use another source suffix; the index file follows it (`index.<ext>`)
    pub fn with_source_extension(mut self, extension: &str) -> Self {
        self.source_extension = extension.trim_start_matches('.').to_string();
        self.index_file = format!("index.{}", self.source_extension);
        self
    }

    pub fn with_path_case(mut self, path_case: PathCase) -> Self {
        self.path_case = path_case;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &ResolutionConfig {
        &self.config
    }

    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }

    pub fn index_file(&self) -> &str {
        &self.index_file
    }

    pub fn path_case(&self) -> PathCase {
        self.path_case
    }

    /// True for files carrying the source suffix
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.source_extension)
            .unwrap_or(false)
    }

    /// True when `path` names the directory index file
    pub fn is_index_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|n| n == self.index_file)
            .unwrap_or(false)
    }

    /// Resolve `raw` as written in a file located in `context_dir`.
    ///
    /// Returns `None` for external packages and references that do not land
    /// on anything in the project.
    pub fn resolve(&self, context_dir: &Path, raw: &str) -> Option<ResolvedModule> {
        // Absolute and bare-dot references are outside this resolver's scheme
        if raw.is_empty() || raw.starts_with('/') || raw == "." || raw == ".." {
            return None;
        }

        if is_relative(raw) {
            let joined = normalize_path(&context_dir.join(raw));
            let suffix = get_suffix(raw);
            if suffix.is_empty() || suffix == self.source_extension {
                let path = self.resolve_extensionless(&joined)?;
                return Some(ResolvedModule {
                    path,
                    request: joined,
                    via: ResolvedVia::Relative,
                });
            }
            // Non-code asset: taken as written
            return Some(ResolvedModule {
                path: joined.clone(),
                request: joined,
                via: ResolvedVia::Relative,
            });
        }

        if let Some(resolved) = self.resolve_with_roots(raw) {
            return Some(resolved);
        }

        self.resolve_with_alias(raw)
    }

    fn resolve_with_roots(&self, raw: &str) -> Option<ResolvedModule> {
        for (index, root) in self.config.root.iter().enumerate() {
            let candidate = normalize_path(&self.project_root.join(root).join(raw));
            if let Some(path) = self.resolve_extensionless(&candidate) {
                trace!(reference = %raw, root = %root, "Resolved through implicit root");
                return Some(ResolvedModule {
                    path,
                    request: candidate,
                    via: ResolvedVia::Root(index),
                });
            }
        }
        None
    }

    fn resolve_with_alias(&self, raw: &str) -> Option<ResolvedModule> {
        let (first, rest) = raw.split_once('/').unwrap_or((raw, ""));
        let target = self.config.alias.get(first)?;

        let base = self.project_root.join(target);
        let candidate = if rest.is_empty() {
            normalize_path(&base)
        } else {
            normalize_path(&base.join(rest))
        };

        let path = self.resolve_extensionless(&candidate)?;
        trace!(reference = %raw, alias = %first, "Resolved through alias");
        Some(ResolvedModule {
            path,
            request: candidate,
            via: ResolvedVia::Alias(first.to_string()),
        })
    }

    /// Complete a candidate path the way the bundler would.
    ///
    /// Tries, in order: the directory's index file, the path plus the source
    /// suffix, the path plus each image extension, the path itself as a file.
    fn resolve_extensionless(&self, fullpath: &Path) -> Option<PathBuf> {
        if fullpath.is_dir() {
            let index = fullpath.join(&self.index_file);
            if index.is_file() {
                return Some(index);
            }
        }

        let rendered = fullpath.to_string_lossy();
        let with_source = PathBuf::from(add_suffix(&rendered, &self.source_extension));
        if with_source.is_file() {
            return Some(with_source);
        }

        for ext in IMAGE_EXTENSIONS {
            let with_image = PathBuf::from(add_suffix(&rendered, ext));
            if with_image.is_file() {
                return Some(with_image);
            }
        }

        if fullpath.is_file() {
            return Some(fullpath.to_path_buf());
        }

        None
    }

    /// Express an absolute path as a root- or alias-prefixed reference.
    ///
    /// Roots are tried in declared order, then aliases in declaration order.
    /// Calling this for a path outside every root and alias target is a logic
    /// error upstream and fails with [`JsmvError::Invariant`].
    pub fn to_prefixed_reference(&self, absolute: &Path) -> JsmvResult<String> {
        let absolute = normalize_path(absolute);

        for root in &self.config.root {
            let root_dir = normalize_path(&self.project_root.join(root));
            if let Some(rest) = strict_remainder(&root_dir, &absolute) {
                return Ok(rest);
            }
        }

        for (name, target) in &self.config.alias {
            let target_dir = normalize_path(&self.project_root.join(target));
            if is_super_directory(&target_dir, &absolute) {
                return Ok(match strict_remainder(&target_dir, &absolute) {
                    Some(rest) => format!("{name}/{rest}"),
                    None => name.clone(),
                });
            }
        }

        Err(JsmvError::invariant(format!(
            "{} is not under any configured root or alias",
            absolute.display()
        )))
    }

    /// The reference path that names a file.
    ///
    /// Index files are named by their directory; images by their density-free
    /// name with extension; source files by their path without the suffix.
    pub fn fs_path_to_reference(&self, absolute: &Path) -> PathBuf {
        let Some(name) = absolute.file_name().and_then(|n| n.to_str()) else {
            return absolute.to_path_buf();
        };
        let parent = absolute.parent().unwrap_or(Path::new(""));

        if name == self.index_file {
            return parent.to_path_buf();
        }

        let parsed = parse_filename(name);
        if is_image_extension(&parsed.extension) {
            return parent.join(format!("{}.{}", parsed.basename, parsed.extension));
        }

        PathBuf::from(trim_suffix(&absolute.to_string_lossy(), &self.source_extension))
    }

    /// The reference path for `target`, written in the same style as `raw`.
    ///
    /// - `./utils.js` keeps its explicit source suffix
    /// - `./icon` stays extension-less even though it lands on `icon.png`
    /// - `./lib/index` keeps naming the index file
    /// - everything else follows [`Self::fs_path_to_reference`]
    pub fn reference_path_for(&self, raw: &str, target: &Path) -> PathBuf {
        let suffix = get_suffix(raw);
        if suffix == self.source_extension {
            return target.to_path_buf();
        }

        if suffix.is_empty() {
            let last = raw.rsplit('/').next().unwrap_or(raw);
            let index_stem = trim_suffix(&self.index_file, &self.source_extension);
            if last == index_stem {
                return PathBuf::from(trim_suffix(
                    &target.to_string_lossy(),
                    &self.source_extension,
                ));
            }

            let reference = self.fs_path_to_reference(target);
            let ref_suffix = get_suffix(&reference.to_string_lossy()).to_string();
            if is_image_extension(&ref_suffix) {
                return PathBuf::from(trim_suffix(&reference.to_string_lossy(), &ref_suffix));
            }
            return reference;
        }

        self.fs_path_to_reference(target)
    }

    /// True when `resolved` denotes the same logical module as the file `moved`.
    ///
    /// Matches on path equality, on an index file of the directory `moved`,
    /// or on an image in the same directory sharing basename and extension
    /// (density modifiers ignored).
    pub fn is_same_module(&self, resolved: &Path, moved: &Path) -> bool {
        if is_same_file_with(resolved, moved, self.path_case) {
            return true;
        }

        if self.is_index_file(resolved) {
            if let Some(dir) = resolved.parent() {
                if is_same_file_with(dir, moved, self.path_case) {
                    return true;
                }
            }
        }

        let (Some(resolved_dir), Some(moved_dir)) = (resolved.parent(), moved.parent()) else {
            return false;
        };
        if !is_same_file_with(resolved_dir, moved_dir, self.path_case) {
            return false;
        }

        let (Some(a), Some(b)) = (
            resolved.file_name().and_then(|n| n.to_str()),
            moved.file_name().and_then(|n| n.to_str()),
        ) else {
            return false;
        };
        let (a, b) = (parse_filename(a), parse_filename(b));
        if !is_image_extension(&a.extension) {
            return false;
        }

        let same = |x: &str, y: &str| match self.path_case {
            PathCase::Insensitive => x.eq_ignore_ascii_case(y),
            PathCase::Sensitive => x == y,
        };
        same(&a.basename, &b.basename) && same(&a.extension, &b.extension)
    }
}

fn is_image_extension(extension: &str) -> bool {
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
}

/// `path` relative to `dir` when it lies strictly beneath it
fn strict_remainder(dir: &Path, path: &Path) -> Option<String> {
    let rest = path.strip_prefix(dir).ok()?;
    if rest.as_os_str().is_empty() {
        None
    } else {
        Some(to_slash(rest))
    }
}
