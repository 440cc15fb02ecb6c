//! Filesystem path normalization.
//!
//! - `normalize_path` - absolute form (canonicalize + fallback)
//! - `resolve_path` - expand `~`, then anchor relative paths at a base directory

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
///
/// Paths that do not exist yet (an output directory on a fresh checkout)
/// take the fallback branch.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a configured path against `base` and normalize it.
///
/// A leading `~` is expanded to the home directory. Absolute paths ignore
/// `base`.
///
/// # Example
/// ```ignore
/// // htmlseal.toml lives in /work/site, template = "src/index.html"
/// let template = resolve_path(Path::new("src/index.html"), Path::new("/work/site"));
/// assert_eq!(template, PathBuf::from("/work/site/src/index.html"));
/// ```
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned());

    if expanded.is_absolute() {
        normalize_path(&expanded)
    } else {
        normalize_path(&base.join(expanded))
    }
}
