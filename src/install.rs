//! Selective install helpers
//!
//! Recursive merge copy of a library subtree from the staging directory
//! onto its destination. Existing destination files are overwritten;
//! files present only at the destination are left in place.

use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

/// Recursively copy `src` onto `dest`, merging over existing content.
///
/// Returns the number of files copied. Directory creation is implicit;
/// regular-file copies go through `std::fs::copy`, so symlinked sources
/// are copied by content.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<u64> {
    let mut copied = 0u64;

    for entry in WalkDir::new(src) {
        let entry = entry.with_context(|| format!("cannot walk {}", src.display()))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("cannot relativize {}", entry.path().display()))?;
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("cannot create directory {}", target.display()))?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create directory {}", parent.display()))?;
            }

            std::fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "copy failed: {} -> {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_tree_copies_nested_files() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");
        std::fs::create_dir_all(src.join("include/SDL2")).unwrap();
        std::fs::write(src.join("include/SDL2/SDL.h"), "header").unwrap();
        std::fs::write(src.join("README"), "readme").unwrap();

        let copied = copy_tree(&src, &dest).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            std::fs::read_to_string(dest.join("include/SDL2/SDL.h")).unwrap(),
            "header"
        );
        assert_eq!(std::fs::read_to_string(dest.join("README")).unwrap(), "readme");
    }

    #[test]
    fn test_copy_tree_overwrites_existing_files() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(src.join("lib.a"), "new").unwrap();
        std::fs::write(dest.join("lib.a"), "old").unwrap();

        copy_tree(&src, &dest).unwrap();

        assert_eq!(std::fs::read_to_string(dest.join("lib.a")).unwrap(), "new");
    }

    #[test]
    fn test_copy_tree_leaves_extra_destination_files() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(src.join("incoming.txt"), "incoming").unwrap();
        std::fs::write(dest.join("local.txt"), "local").unwrap();

        copy_tree(&src, &dest).unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.join("local.txt")).unwrap(),
            "local"
        );
        assert!(dest.join("incoming.txt").exists());
    }

    #[test]
    fn test_copy_tree_creates_empty_directories() {
        let temp = tempfile::tempdir().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");
        std::fs::create_dir_all(src.join("lib64")).unwrap();

        let copied = copy_tree(&src, &dest).unwrap();

        assert_eq!(copied, 0);
        assert!(dest.join("lib64").is_dir());
    }

    #[test]
    fn test_copy_tree_missing_source_errors() {
        let temp = tempfile::tempdir().unwrap();
        let result = copy_tree(&temp.path().join("absent"), &temp.path().join("dest"));
        assert!(result.is_err());
    }
}
