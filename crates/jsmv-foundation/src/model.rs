//! Data model of a move: the operation itself and the references it touches

use crate::paths::normalize_path;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Syntactic construct a module reference was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// `import x from '<ref>'`
    Import,
    /// `require('<ref>')`
    Require,
    /// `export { x } from '<ref>'`
    Export,
    /// `import('<ref>')`
    DynamicImport,
    /// `import '<ref>'`
    SideEffectImport,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Import => "import",
            ReferenceKind::Require => "require",
            ReferenceKind::Export => "export",
            ReferenceKind::DynamicImport => "dynamic import",
            ReferenceKind::SideEffectImport => "side-effect import",
        };
        f.write_str(name)
    }
}

/// A located module dependency string inside a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference {
    pub file: PathBuf,
    /// Byte offset of the dependency string (first character after the quote)
    pub offset: usize,
    pub kind: ReferenceKind,
    /// Dependency string as written, without quotes
    pub raw: String,
}

impl ModuleReference {
    /// Byte offset one past the end of the dependency string
    pub fn end(&self) -> usize {
        self.offset + self.raw.len()
    }
}

/// A rewrite applied (or planned) to one reference. Used for reporting only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRecord {
    pub file: PathBuf,
    pub kind: ReferenceKind,
    pub offset: usize,
    pub original: String,
    pub replacement: String,
}

/// A single move/rename request after destination disambiguation.
///
/// `source` and `destination` are absolute and normalized. When the caller
/// named an existing directory as destination, `destination` already carries
/// the source's basename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOperation {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub is_directory: bool,
}

impl MoveOperation {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>, is_directory: bool) -> Self {
        Self {
            source: normalize_path(&source.into()),
            destination: normalize_path(&destination.into()),
            is_directory,
        }
    }

    /// Where `path` ends up after the move, if it moves at all.
    ///
    /// Paths equal to or beneath `source` are rebased onto `destination`;
    /// everything else returns `None`.
    pub fn relocate(&self, path: &Path) -> Option<PathBuf> {
        let path = normalize_path(path);
        let rest = path.strip_prefix(&self.source).ok()?;
        if rest.as_os_str().is_empty() {
            Some(self.destination.clone())
        } else {
            Some(self.destination.join(rest))
        }
    }

    /// Directory the moved entry lives in before the move
    pub fn source_parent(&self) -> &Path {
        self.source.parent().unwrap_or(&self.source)
    }

    /// Directory the moved entry lives in after the move
    pub fn destination_parent(&self) -> &Path {
        self.destination.parent().unwrap_or(&self.destination)
    }
}
