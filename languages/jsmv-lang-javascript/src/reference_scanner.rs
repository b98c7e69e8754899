//! Locating module references in JavaScript source text

use crate::regex_patterns::reference_patterns;
use jsmv_foundation::ModuleReference;
use std::collections::BTreeMap;
use std::path::Path;

/// Find every module reference in `text`, ordered by offset.
///
/// A dependency string captured by more than one pattern is reported once.
pub fn scan_references(file: &Path, text: &str) -> Vec<ModuleReference> {
    let mut by_offset: BTreeMap<usize, ModuleReference> = BTreeMap::new();

    for (kind, re) in reference_patterns() {
        for caps in re.captures_iter(text) {
            let Some(dep) = caps.get(1) else {
                continue;
            };
            by_offset.entry(dep.start()).or_insert_with(|| ModuleReference {
                file: file.to_path_buf(),
                offset: dep.start(),
                kind,
                raw: dep.as_str().to_string(),
            });
        }
    }

    by_offset.into_values().collect()
}
