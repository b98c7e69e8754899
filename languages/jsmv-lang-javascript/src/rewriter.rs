//! Splicing replacement references into source text
//!
//! [`rewrite_source`] is a fold over the references found in a file: the input
//! text is never mutated, the output is built left to right from unchanged
//! slices and replacement strings, and a cursor into the input only moves
//! forward. Only the dependency string itself is replaced, never the quotes or
//! the surrounding statement.

use crate::reference_scanner::scan_references;
use jsmv_foundation::{JsmvResult, ModuleReference, RewriteRecord};
use std::path::Path;

/// Rewritten text of one file plus what changed in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub content: String,
    pub records: Vec<RewriteRecord>,
}

impl RewriteOutcome {
    pub fn is_changed(&self) -> bool {
        !self.records.is_empty()
    }
}

/// Rewrite every reference in `text` for which `decide` returns a replacement.
///
/// `decide` sees references in offset order. Returning `Ok(None)` or the raw
/// string unchanged leaves the reference alone; an error aborts the file.
pub fn rewrite_source<F>(file: &Path, text: &str, mut decide: F) -> JsmvResult<RewriteOutcome>
where
    F: FnMut(&ModuleReference) -> JsmvResult<Option<String>>,
{
    let mut content = String::with_capacity(text.len());
    let mut records = Vec::new();
    let mut cursor = 0;

    for reference in scan_references(file, text) {
        let Some(replacement) = decide(&reference)? else {
            continue;
        };
        if replacement == reference.raw {
            continue;
        }

        content.push_str(&text[cursor..reference.offset]);
        content.push_str(&replacement);
        cursor = reference.end();

        records.push(RewriteRecord {
            file: reference.file,
            kind: reference.kind,
            offset: reference.offset,
            original: reference.raw,
            replacement,
        });
    }
    content.push_str(&text[cursor..]);

    Ok(RewriteOutcome { content, records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsmv_foundation::JsmvError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replaces_only_dependency_string() {
        let text = "const a = require('./a');\nimport b from \"./b\";\n";
        let outcome = rewrite_source(Path::new("/p/x.js"), text, |r| {
            Ok(Some(format!("{}/moved", r.raw)))
        })
        .unwrap();

        assert_eq!(
            outcome.content,
            "const a = require('./a/moved');\nimport b from \"./b/moved\";\n"
        );
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].original, "./a");
        assert_eq!(outcome.records[1].replacement, "./b/moved");
    }

    #[test]
    fn test_length_changes_do_not_shift_later_matches() {
        let text = "import a from './a';import b from './b';import c from './c';";
        let outcome = rewrite_source(Path::new("/p/x.js"), text, |r| {
            Ok(match r.raw.as_str() {
                "./a" => Some("../../deeply/nested/a".to_string()),
                "./b" => Some("b".to_string()),
                _ => None,
            })
        })
        .unwrap();

        assert_eq!(
            outcome.content,
            "import a from '../../deeply/nested/a';import b from 'b';import c from './c';"
        );
    }

    #[test]
    fn test_same_string_elsewhere_is_untouched() {
        // The dependency text also appears in a string before the match
        let text = "const s = './utils'; const u = require('./utils');";
        let outcome = rewrite_source(Path::new("/p/x.js"), text, |_| {
            Ok(Some("./helpers/utils".to_string()))
        })
        .unwrap();

        assert_eq!(
            outcome.content,
            "const s = './utils'; const u = require('./helpers/utils');"
        );
    }

    #[test]
    fn test_unchanged_replacement_is_not_recorded() {
        let text = "require('./same')";
        let outcome = rewrite_source(Path::new("/p/x.js"), text, |r| Ok(Some(r.raw.clone()))).unwrap();
        assert!(!outcome.is_changed());
        assert_eq!(outcome.content, text);
    }

    #[test]
    fn test_decide_error_aborts() {
        let result = rewrite_source(Path::new("/p/x.js"), "require('./a')", |_| {
            Err(JsmvError::invariant("boom"))
        });
        assert!(result.is_err());
    }
}
