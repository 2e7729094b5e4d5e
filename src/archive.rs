//! ZIP archive handling
//!
//! Opening the downloaded archive is kept separate from unpacking it:
//! the caller maps an open failure to its canonical user-facing message,
//! while per-entry extraction errors propagate as ordinary errors.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

use crate::output::{self, ProgressGuard};

/// Open `path` as a ZIP archive.
pub fn open(path: &Path) -> Result<ZipArchive<File>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    ZipArchive::new(file)
        .with_context(|| format!("{} is not a readable zip archive", path.display()))
}

/// Extract every entry of `archive` under `dest`, preserving entry
/// paths exactly as recorded.
///
/// Entries whose recorded path would escape `dest` are skipped. Unix
/// permission bits are restored where recorded.
pub fn extract_all(archive: &mut ZipArchive<File>, dest: &Path) -> Result<()> {
    let pb = output::spinner(&format!("extracting {} entries", archive.len()));
    let _guard = ProgressGuard::new(&pb);

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .with_context(|| format!("cannot read zip entry {}", i))?;

        // Skip entries with unsafe paths
        let outpath = match file.enclosed_name() {
            Some(path) => dest.join(path),
            None => continue,
        };

        if file.is_dir() {
            std::fs::create_dir_all(&outpath)
                .with_context(|| format!("cannot create directory {}", outpath.display()))?;
        } else {
            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("cannot create directory {}", parent.display()))?;
            }

            let mut outfile = File::create(&outpath)
                .with_context(|| format!("cannot create {}", outpath.display()))?;
            std::io::copy(&mut file, &mut outfile)
                .with_context(|| format!("write error for {}", outpath.display()))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = file.unix_mode() {
                    std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode)).ok();
                }
            }
        }
    }

    output::detail(&format!("extracted {} entries", archive.len()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in entries {
            if name.ends_with('/') {
                zip.add_directory(name.trim_end_matches('/'), options)
                    .unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content).unwrap();
            }
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_preserves_nested_paths() {
        let temp = tempfile::tempdir().unwrap();
        let archive_path = temp.path().join("fixture.zip");
        let dest = temp.path().join("out");
        write_zip(
            &archive_path,
            &[
                ("libs/", b""),
                ("libs/sdl/include/SDL.h", b"/* sdl */"),
                ("libs/curl/lib/libcurl.a", b"curl bytes"),
            ],
        );

        let mut archive = open(&archive_path).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        extract_all(&mut archive, &dest).unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.join("libs/sdl/include/SDL.h")).unwrap(),
            "/* sdl */"
        );
        assert_eq!(
            std::fs::read(dest.join("libs/curl/lib/libcurl.a")).unwrap(),
            b"curl bytes"
        );
    }

    #[test]
    fn test_open_rejects_non_zip_file() {
        let temp = tempfile::tempdir().unwrap();
        let bogus = temp.path().join("bogus.zip");
        std::fs::write(&bogus, b"this is not a zip").unwrap();

        assert!(open(&bogus).is_err());
    }

    #[test]
    fn test_open_rejects_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        assert!(open(&temp.path().join("absent.zip")).is_err());
    }

    #[test]
    fn test_extract_skips_escaping_entries() {
        let temp = tempfile::tempdir().unwrap();
        let archive_path = temp.path().join("escape.zip");
        let dest = temp.path().join("out");
        write_zip(
            &archive_path,
            &[("../evil.txt", b"pwned"), ("safe.txt", b"fine")],
        );

        let mut archive = open(&archive_path).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        extract_all(&mut archive, &dest).unwrap();

        assert!(!temp.path().join("evil.txt").exists());
        assert_eq!(
            std::fs::read_to_string(dest.join("safe.txt")).unwrap(),
            "fine"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_extract_restores_unix_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().unwrap();
        let archive_path = temp.path().join("modes.zip");
        let dest = temp.path().join("out");

        let file = File::create(&archive_path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
        zip.start_file("tool.sh", options).unwrap();
        zip.write_all(b"#!/bin/sh\n").unwrap();
        zip.finish().unwrap();

        let mut archive = open(&archive_path).unwrap();
        std::fs::create_dir_all(&dest).unwrap();
        extract_all(&mut archive, &dest).unwrap();

        let mode = std::fs::metadata(dest.join("tool.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
