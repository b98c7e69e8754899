//! Shared regex patterns for JavaScript module references
//!
//! Every pattern captures the dependency string in group 1, without quotes.
//! Import and export clauses may span lines.

use jsmv_foundation::ReferenceKind;
use once_cell::sync::Lazy;
use regex::Regex;

/// ES module import: `import x from 'module'`, `import {\n a,\n b\n} from "module"`
pub static IMPORT_FROM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\b[\s\S]+?\bfrom\s*['"]([^'"\r\n]+?)['"]"#)
        .expect("import regex should be valid")
});

/// CommonJS require: `require('module')`, `require ( "module" )`
pub static REQUIRE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\brequire\s*\(\s*['"]([^'"\r\n]+?)['"]\s*\)"#)
        .expect("require regex should be valid")
});

/// Re-export: `export { x } from 'module'`, `export * from 'module'`
pub static EXPORT_FROM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bexport\b[\s\S]+?\bfrom\s*['"]([^'"\r\n]+?)['"]"#)
        .expect("export regex should be valid")
});

/// Dynamic import: `import('module')`
pub static DYNAMIC_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s*\(\s*['"]([^'"\r\n]+?)['"]\s*\)"#)
        .expect("dynamic import regex should be valid")
});

/// Side-effect import: `import 'module'`
pub static SIDE_EFFECT_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bimport\s*['"]([^'"\r\n]+?)['"]"#)
        .expect("side-effect import regex should be valid")
});

/// Patterns in precedence order.
///
/// When two patterns capture the same dependency string, the kind of the
/// earlier one is reported; the narrow call forms come before the clause forms,
/// which can stretch across preceding statements.
pub fn reference_patterns() -> [(ReferenceKind, &'static Regex); 5] {
    [
        (ReferenceKind::Require, &*REQUIRE_RE),
        (ReferenceKind::DynamicImport, &*DYNAMIC_IMPORT_RE),
        (ReferenceKind::SideEffectImport, &*SIDE_EFFECT_IMPORT_RE),
        (ReferenceKind::Export, &*EXPORT_FROM_RE),
        (ReferenceKind::Import, &*IMPORT_FROM_RE),
    ]
}
