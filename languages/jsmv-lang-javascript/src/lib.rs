//! JavaScript language support for jsmv
//!
//! - [`regex_patterns`]: the reference-bearing constructs recognized in source text
//! - [`reference_scanner`]: locating module references in a file
//! - [`module_resolver`]: resolving references to files and back
//! - [`rewriter`]: splicing replacement references into file text

pub mod module_resolver;
pub mod reference_scanner;
pub mod regex_patterns;
pub mod rewriter;

pub use module_resolver::{ModuleResolver, ResolvedModule, ResolvedVia, IMAGE_EXTENSIONS};
pub use reference_scanner::scan_references;
pub use rewriter::{rewrite_source, RewriteOutcome};
