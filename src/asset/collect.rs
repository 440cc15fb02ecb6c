//! Generated asset discovery.
//!
//! Walks the output directory depth-first, pre-order, and classifies files
//! by extension:
//!
//! ```text
//! dist/
//! ├── app.js              -> Script      dist/app.js
//! ├── js/
//! │   ├── chunk.js        -> Script      dist/js/chunk.js
//! │   └── chunk.js.map    -> (ignored)
//! └── style.css           -> Stylesheet  dist/style.css
//! ```
//!
//! Entry order inside a directory is whatever `read_dir` yields. A
//! subdirectory is finished before the entries that follow it.

use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

use crate::debug;
use crate::error::SealError;
use crate::utils::path::to_slash;

use super::{AssetDescriptor, AssetKind};

/// Collect every `.js` and `.css` file under `root`.
///
/// Uses an explicit stack of open directory listings instead of recursion,
/// so deep trees cannot exhaust the call stack.
pub fn collect_assets(root: &Path) -> Result<Vec<AssetDescriptor>, SealError> {
    let mut assets = Vec::new();
    let mut stack: Vec<(PathBuf, ReadDir)> = vec![(root.to_path_buf(), open_dir(root)?)];

    while let Some((dir, entries)) = stack.last_mut() {
        let Some(entry) = entries.next() else {
            stack.pop();
            continue;
        };

        let entry = entry.map_err(|source| directory_error(dir, source))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|source| directory_error(&path, source))?;

        // Follow symlinks the way `stat` does
        let is_dir = if file_type.is_symlink() {
            fs::metadata(&path)
                .map_err(|source| directory_error(&path, source))?
                .is_dir()
        } else {
            file_type.is_dir()
        };

        if is_dir {
            debug!("collect"; "entering {}", path.display());
            let listing = open_dir(&path)?;
            stack.push((path, listing));
            continue;
        }

        let name = entry.file_name();
        if let Some(kind) = AssetKind::from_file_name(&name.to_string_lossy()) {
            assets.push(AssetDescriptor::new(kind, to_slash(&path)));
        }
    }

    Ok(assets)
}

fn open_dir(dir: &Path) -> Result<ReadDir, SealError> {
    fs::read_dir(dir).map_err(|source| directory_error(dir, source))
}

fn directory_error(path: &Path, source: std::io::Error) -> SealError {
    SealError::DirectoryAccess {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn path_of(dir: &Path, rel: &str) -> String {
        to_slash(&dir.join(rel))
    }

    #[test]
    fn test_collect_classifies_by_extension() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "1").unwrap();
        fs::write(dir.path().join("style.css"), "body{}").unwrap();
        fs::write(dir.path().join("app.js.map"), "{}").unwrap();
        fs::write(dir.path().join("logo.png"), "png").unwrap();

        let assets = collect_assets(dir.path()).unwrap();

        assert_eq!(assets.len(), 2);
        assert!(assets.contains(&AssetDescriptor::script(path_of(dir.path(), "app.js"))));
        assert!(assets.contains(&AssetDescriptor::stylesheet(path_of(dir.path(), "style.css"))));
    }

    #[test]
    fn test_collect_nested_directories() {
        let dir = TempDir::new().unwrap();
        let deep = dir.path().join("js").join("chunks").join("lazy");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("page.js"), "1").unwrap();

        let assets = collect_assets(dir.path()).unwrap();

        assert_eq!(
            assets,
            vec![AssetDescriptor::script(path_of(dir.path(), "js/chunks/lazy/page.js"))]
        );
    }

    #[test]
    fn test_collect_is_depth_first() {
        let dir = TempDir::new().unwrap();
        for sub in ["one", "two"] {
            let path = dir.path().join(sub);
            fs::create_dir_all(path.join("inner")).unwrap();
            fs::write(path.join("a.js"), "1").unwrap();
            fs::write(path.join("b.css"), "1").unwrap();
            fs::write(path.join("inner").join("c.js"), "1").unwrap();
        }

        let assets = collect_assets(dir.path()).unwrap();
        assert_eq!(assets.len(), 6);

        // Each subtree forms one contiguous run
        let owners: Vec<bool> = assets
            .iter()
            .map(|a| a.path.starts_with(&path_of(dir.path(), "one")))
            .collect();
        let switches = owners.windows(2).filter(|w| w[0] != w[1]).count();
        assert_eq!(switches, 1);
    }

    #[test]
    fn test_collect_matches_listing_order() {
        let dir = TempDir::new().unwrap();
        for name in ["c.js", "a.js", "b.css", "d.js"] {
            fs::write(dir.path().join(name), "1").unwrap();
        }

        let expected: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| to_slash(&e.unwrap().path()))
            .collect();
        let collected: Vec<String> = collect_assets(dir.path())
            .unwrap()
            .into_iter()
            .map(|a| a.path)
            .collect();

        assert_eq!(collected, expected);
    }

    #[test]
    fn test_collect_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = collect_assets(&missing).unwrap_err();
        assert!(matches!(err, SealError::DirectoryAccess { ref path, .. } if *path == missing));
    }

    #[test]
    fn test_collect_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(collect_assets(dir.path()).unwrap().is_empty());
    }
}
