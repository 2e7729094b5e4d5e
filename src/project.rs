//! Project root resolution
//!
//! Every path the tool writes is project-root-relative, so the process
//! changes its working directory to the checkout root before any
//! filesystem effect. This keeps the tool invokable from anywhere.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the project checkout root.
///
/// An explicit root (from `--project-root` or `DOWNLOAD_LIBS_ROOT`)
/// wins; otherwise the parent of the directory containing the current
/// executable is used, matching a tool that lives in a subdirectory of
/// the checkout.
pub fn resolve_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_path_buf());
    }

    let exe = std::env::current_exe().context("cannot determine executable path")?;
    let bin_dir = exe.parent().context("executable has no parent directory")?;
    bin_dir
        .parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("no project root above {}", bin_dir.display()))
}

/// Change the working directory to `root`.
pub fn enter_root(root: &Path) -> Result<()> {
    std::env::set_current_dir(root)
        .with_context(|| format!("cannot enter project root {}", root.display()))
}
