//! Shared filesystem primitives

use std::fs;
use std::path::Path;

use crate::error::{Result, VendorError};

fn write_error(path: &Path, e: std::io::Error) -> VendorError {
    VendorError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Destructively reset a directory: remove it if present, recreate it empty
///
/// Every output directory of the pipeline goes through this, which is what
/// makes each pass a full rebuild regardless of what a previous (possibly
/// aborted) run left behind.
pub fn replace_tree(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| write_error(path, e))?;
    }
    fs::create_dir_all(path).map_err(|e| write_error(path, e))
}

/// View of `path` relative to `root`, for echo lines
///
/// Falls back to the full path when it does not live under `root`.
pub fn relative_to<'p>(path: &'p Path, root: &Path) -> &'p Path {
    path.strip_prefix(root).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_tree_creates_missing_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("out");

        replace_tree(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_relative_to_strips_the_work_root() {
        let root = Path::new("/work/3rdparty");
        assert_eq!(
            relative_to(Path::new("/work/3rdparty/sqlite/sqlite3.c"), root),
            Path::new("sqlite/sqlite3.c")
        );
    }

    #[test]
    fn test_relative_to_keeps_foreign_paths() {
        let root = Path::new("/work/3rdparty");
        assert_eq!(
            relative_to(Path::new("/elsewhere/file.c"), root),
            Path::new("/elsewhere/file.c")
        );
    }

    #[test]
    fn test_replace_tree_discards_stale_contents() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("out");
        fs::create_dir_all(dir.join("stale/nested")).unwrap();
        fs::write(dir.join("stale/nested/file.txt"), "old").unwrap();

        replace_tree(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }
}
