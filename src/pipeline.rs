//! End-to-end fetch, unzip and install pipeline
//!
//! Resolves the pinned archive URL, downloads the archive into the
//! checkout, unpacks it, copies the requested library subtrees into the
//! vendored-libraries root and cleans up the staging artifacts.
//!
//! The pipeline expects the working directory to already be the project
//! root (see [`crate::project`]).

use anyhow::Result;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::target::Target;
use crate::{archive, fetch, install, output};

/// Pinned ddnet-libs revision. Changing this constant is the sole
/// mechanism for updating the vendored library versions.
pub const LIBS_REVISION: &str = "4694e92c8340002f5c5cc168084a343b673ecbf9";

/// Default archive host.
pub const DEFAULT_BASE_URL: &str = "https://github.com/ddnet/ddnet-libs";

/// The two canonical user-facing pipeline failures. Everything else
/// (per-entry extraction errors, copy errors) propagates untyped.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("couldn't download libs")]
    Download(#[source] anyhow::Error),
    #[error("couldn't unzip libs")]
    Unzip(#[source] anyhow::Error),
}

/// Archive host base, overridable via `DOWNLOAD_LIBS_BASE_URL` so tests
/// can stand in a fixture server.
fn base_url() -> String {
    std::env::var("DOWNLOAD_LIBS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
}

/// Canonical URL of the pinned archive revision.
pub fn archive_url() -> String {
    format!("{}/archive/{}.zip", base_url(), LIBS_REVISION)
}

/// Staging directory produced by extraction. Derived from the pinned
/// revision, never read back from the archive contents, so a crafted
/// archive cannot redirect the copy source.
pub fn staging_dir() -> PathBuf {
    PathBuf::from(format!("ddnet-libs-{}", LIBS_REVISION))
}

/// Download the pinned archive and install the requested targets.
pub fn download_all(targets: &[Target]) -> Result<()> {
    output::action(&format!("Fetching ddnet-libs {}", &LIBS_REVISION[..8]));

    output::sub_action("download");
    let url = archive_url();
    let archive_file = fetch::fetch_file(&url, Path::new(".")).map_err(PipelineError::Download)?;

    output::sub_action("unzip");
    let mut zip = archive::open(&archive_file).map_err(PipelineError::Unzip)?;
    archive::extract_all(&mut zip, Path::new("."))?;

    output::sub_action("install");
    let staging = staging_dir();

    for target in Target::ALL {
        if !targets.contains(&target) {
            continue;
        }
        let copied = install::copy_tree(&target.source_dir(&staging), &target.dest_dir())?;
        output::detail(&format!(
            "installed {} -> {} ({} files)",
            target,
            target.dest_dir().display(),
            copied
        ));
    }

    cleanup(&staging, &archive_file);
    output::success("libs installed");
    Ok(())
}

/// Best-effort removal of the staging directory and the downloaded
/// archive. Failures never affect the exit status of a successful
/// install.
fn cleanup(staging: &Path, archive_file: &Path) {
    let _ = std::fs::remove_dir_all(staging);
    let _ = std::fs::remove_file(archive_file);
}
