//! Relative path computation for generated references.
//!
//! Tag attributes always use `/` separators, whatever the host platform.

use std::path::{Component, Path};

/// Render a path with `/` separators.
///
/// # Examples
/// ```ignore
/// assert_eq!(to_slash(Path::new("js/app.js")), "js/app.js");
/// ```
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .replace("//", "/")
}

/// Compute `path` relative to `base`.
///
/// Both paths are expected in the same form (both absolute or both relative
/// to the same directory). Paths outside `base` get `..` segments.
///
/// # Examples
/// ```ignore
/// relative_to(Path::new("/out/js/app.js"), Path::new("/out"))   -> "js/app.js"
/// relative_to(Path::new("/vendor/lib.js"), Path::new("/out"))   -> "../vendor/lib.js"
/// relative_to(Path::new("/out"), Path::new("/out"))             -> ""
/// ```
pub fn relative_to(path: &Path, base: &Path) -> String {
    if let Ok(rel) = path.strip_prefix(base) {
        return to_slash(rel);
    }

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut segments: Vec<String> = Vec::new();
    for part in &base_parts[common..] {
        if !matches!(part, Component::CurDir) {
            segments.push("..".to_string());
        }
    }
    for part in &path_parts[common..] {
        if !matches!(part, Component::CurDir) {
            segments.push(part.as_os_str().to_string_lossy().into_owned());
        }
    }
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_inside_base() {
        assert_eq!(
            relative_to(Path::new("/out/js/app.js"), Path::new("/out")),
            "js/app.js"
        );
        assert_eq!(relative_to(Path::new("dist/style.css"), Path::new("dist")), "style.css");
    }

    #[test]
    fn test_relative_outside_base() {
        assert_eq!(
            relative_to(Path::new("/vendor/lib.js"), Path::new("/out")),
            "../vendor/lib.js"
        );
        assert_eq!(
            relative_to(Path::new("/a/b/c.js"), Path::new("/a/x/y")),
            "../../b/c.js"
        );
    }

    #[test]
    fn test_relative_same_path() {
        assert_eq!(relative_to(Path::new("/out"), Path::new("/out")), "");
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("js/app.js")), "js/app.js");
        assert_eq!(to_slash(Path::new("/out/app.js")), "/out/app.js");
    }
}
