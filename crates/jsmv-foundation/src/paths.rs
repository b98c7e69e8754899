//! Path classification utilities
//!
//! Pure, lexical helpers over path-like values. Nothing in this module touches
//! the filesystem: ancestry and equality are decided on normalized text, so
//! symlinks are never resolved.
//!
//! Module references are always written with forward slashes, regardless of the
//! host platform, so every helper that produces reference text renders `/`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Density modifier suffix carried by image assets, e.g. `icon@2x.png`
static DENSITY_MODIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)@\d+x$").expect("density modifier regex should be valid"));

/// How file identity comparisons treat letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathCase {
    /// `Foo.js` and `foo.js` name the same file (macOS/Windows default volumes)
    #[default]
    Insensitive,
    /// Case is significant (typical Linux filesystems)
    Sensitive,
}

/// A filename split into stem, density modifier and extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub basename: String,
    /// `@2x`-style modifier, as written
    pub modifier: Option<String>,
    /// Extension without the leading dot, empty when there is none
    pub extension: String,
}

/// True iff the reference is written relative to its containing file.
///
/// # Examples
/// ```
/// use jsmv_foundation::paths::is_relative;
///
/// assert!(is_relative("./utils"));
/// assert!(is_relative("../theme"));
/// assert!(!is_relative("src/utils"));
/// assert!(!is_relative("lodash"));
/// ```
pub fn is_relative(reference: &str) -> bool {
    reference.starts_with("./") || reference.starts_with("../")
}

/// Lexically fold `.` and `..` components.
///
/// Leading `..` components of a relative path are kept; `..` above the root of
/// an absolute path is dropped.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => result.push(".."),
            },
            _ => result.push(component.as_os_str()),
        }
    }
    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

/// Render a path with forward slashes.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

fn slash_terminated(path: &Path) -> String {
    let mut rendered = to_slash(&normalize_path(path));
    if !rendered.ends_with('/') {
        rendered.push('/');
    }
    rendered
}

/// True iff `child` is `parent` or lies beneath it.
///
/// This is a string prefix test on normalized, slash-terminated paths, so
/// `/src/app` is not treated as an ancestor of `/src/apple`.
pub fn is_super_directory(parent: &Path, child: &Path) -> bool {
    slash_terminated(child).starts_with(&slash_terminated(parent))
}

/// Path equality under the default case policy ([`PathCase::Insensitive`]).
pub fn is_same_file(a: &Path, b: &Path) -> bool {
    is_same_file_with(a, b, PathCase::default())
}

/// Path equality after normalization, under an explicit case policy.
pub fn is_same_file_with(a: &Path, b: &Path, case: PathCase) -> bool {
    let a = to_slash(&normalize_path(a));
    let b = to_slash(&normalize_path(b));
    match case {
        PathCase::Insensitive => a.to_lowercase() == b.to_lowercase(),
        PathCase::Sensitive => a == b,
    }
}

/// Append `.suffix` unless the path already ends with it.
pub fn add_suffix(path: &str, suffix: &str) -> String {
    let dotted = format!(".{suffix}");
    if path.ends_with(&dotted) {
        path.to_string()
    } else {
        format!("{path}{dotted}")
    }
}

/// Remove a trailing `.suffix` if present.
pub fn trim_suffix(path: &str, suffix: &str) -> String {
    let dotted = format!(".{suffix}");
    path.strip_suffix(&dotted).unwrap_or(path).to_string()
}

/// Last dot-delimited segment of the final path component, or `""`.
///
/// # Examples
/// ```
/// use jsmv_foundation::paths::get_suffix;
///
/// assert_eq!(get_suffix("./theme/colors.js"), "js");
/// assert_eq!(get_suffix("../assets/logo@2x.png"), "png");
/// assert_eq!(get_suffix("./utils"), "");
/// assert_eq!(get_suffix("../"), "");
/// ```
pub fn get_suffix(path: &str) -> &str {
    let last = path.rsplit('/').next().unwrap_or(path);
    match last.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext,
        _ => "",
    }
}

/// Split a filename into stem, optional density modifier and extension.
///
/// A name without a dot is returned whole as the basename.
pub fn parse_filename(name: &str) -> ParsedFilename {
    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, ext),
        _ => (name, ""),
    };

    match DENSITY_MODIFIER_RE.find(stem) {
        Some(m) if m.start() > 0 => ParsedFilename {
            basename: stem[..m.start()].to_string(),
            modifier: Some(m.as_str().to_string()),
            extension: extension.to_string(),
        },
        _ => ParsedFilename {
            basename: stem.to_string(),
            modifier: None,
            extension: extension.to_string(),
        },
    }
}

/// Return `path` unchanged if absolute, otherwise join it onto `base`.
pub fn to_absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        normalize_path(&base.join(path))
    }
}

/// Relative reference text from `from_dir` to `to`, always `./` or `../` led.
///
/// A bare filename is never produced: `b.js` next to the referencing file
/// becomes `./b.js`.
pub fn relative_reference(from_dir: &Path, to: &Path) -> String {
    let from_dir = normalize_path(from_dir);
    let to = normalize_path(to);
    let diff = pathdiff::diff_paths(&to, &from_dir).unwrap_or(to);
    let rendered = to_slash(&normalize_path(&diff));

    match rendered.as_str() {
        "." => "./".to_string(),
        ".." => "../".to_string(),
        r if is_relative(r) => r.to_string(),
        r => format!("./{r}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_relative_requires_literal_prefix() {
        assert!(is_relative("./a"));
        assert!(is_relative("../../a/b"));
        assert!(!is_relative("a/../b"));
        assert!(!is_relative(".hidden"));
        assert!(!is_relative("/abs/path"));
        assert!(!is_relative("components/Button"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_path(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn test_super_directory_is_reflexive() {
        assert!(is_super_directory(Path::new("/p/src"), Path::new("/p/src")));
        assert!(is_super_directory(Path::new("/p/src/"), Path::new("/p/src")));
    }

    #[test]
    fn test_super_directory_prefix_rules() {
        assert!(is_super_directory(Path::new("/p/src"), Path::new("/p/src/a/b.js")));
        assert!(is_super_directory(Path::new("/p/src"), Path::new("/p/src/x/../y")));
        assert!(!is_super_directory(Path::new("/p/src"), Path::new("/p/srcs/a.js")));
        assert!(!is_super_directory(Path::new("/p/src/a"), Path::new("/p/src")));
    }

    #[test]
    fn test_same_file_case_policy() {
        let a = Path::new("/p/src/Utils.js");
        let b = Path::new("/p/src/./utils.js");
        assert!(is_same_file(a, b));
        assert!(!is_same_file_with(a, b, PathCase::Sensitive));
        assert!(is_same_file_with(b, Path::new("/p/src/utils.js"), PathCase::Sensitive));
    }

    #[test]
    fn test_suffix_round_trip() {
        for path in ["src/utils", "./a/b", "../index", "lib.min"] {
            assert_eq!(trim_suffix(&add_suffix(path, "js"), "js"), path);
        }
    }

    #[test]
    fn test_add_suffix_is_idempotent() {
        let once = add_suffix("./utils", "js");
        assert_eq!(once, "./utils.js");
        assert_eq!(add_suffix(&once, "js"), once);
        assert_eq!(trim_suffix("./utils", "js"), "./utils");
    }

    #[test]
    fn test_get_suffix_uses_final_component() {
        assert_eq!(get_suffix("./v1.2/utils"), "");
        assert_eq!(get_suffix("./a.b/c.json"), "json");
        assert_eq!(get_suffix(".babelrc"), "");
        assert_eq!(get_suffix(".."), "");
    }

    #[test]
    fn test_parse_filename() {
        assert_eq!(
            parse_filename("icon@2x.png"),
            ParsedFilename {
                basename: "icon".to_string(),
                modifier: Some("@2x".to_string()),
                extension: "png".to_string(),
            }
        );
        assert_eq!(
            parse_filename("Logo@3X.JPG"),
            ParsedFilename {
                basename: "Logo".to_string(),
                modifier: Some("@3X".to_string()),
                extension: "JPG".to_string(),
            }
        );
        assert_eq!(
            parse_filename("Makefile"),
            ParsedFilename {
                basename: "Makefile".to_string(),
                modifier: None,
                extension: String::new(),
            }
        );
        assert_eq!(parse_filename("app.test.js").basename, "app.test");
    }

    #[test]
    fn test_to_absolute() {
        let base = Path::new("/work/project");
        assert_eq!(to_absolute(Path::new("/etc/x"), base), PathBuf::from("/etc/x"));
        assert_eq!(
            to_absolute(Path::new("src/../lib/a.js"), base),
            PathBuf::from("/work/project/lib/a.js")
        );
    }

    #[test]
    fn test_relative_reference_prefixes_dot() {
        let from = Path::new("/p/src");
        assert_eq!(relative_reference(from, Path::new("/p/src/helpers/utils")), "./helpers/utils");
        assert_eq!(relative_reference(from, Path::new("/p/theme")), "../theme");
        assert_eq!(relative_reference(from, Path::new("/p/src")), "./");
        assert_eq!(relative_reference(from, Path::new("/p")), "../");
        assert_eq!(
            relative_reference(Path::new("/p/src/ui/widgets"), Path::new("/p/src/theme")),
            "../../theme"
        );
    }
}
