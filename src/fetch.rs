//! Archive download helper
//!
//! Blocking HTTP download with progress reporting. The one network
//! operation of the tool lives here.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output::{self, ProgressGuard};

/// Default HTTP timeout in seconds
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Per-request timeout, overridable via `DOWNLOAD_LIBS_HTTP_TIMEOUT`
/// (seconds, clamped to 5-300).
fn http_timeout() -> Duration {
    let secs = std::env::var("DOWNLOAD_LIBS_HTTP_TIMEOUT")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::from_secs(secs.clamp(5, 300))
}

/// Local filename for a URL: its final path segment.
fn remote_name(url: &str) -> &str {
    url.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("download")
}

/// Download `url` into `into`, named after the URL's final path segment.
///
/// Returns the path to the downloaded file. A file already present under
/// that name is reused without touching the network. On any download
/// failure the partial file is removed, so a rerun never reuses a
/// truncated archive.
pub fn fetch_file(url: &str, into: &Path) -> Result<PathBuf> {
    let name = remote_name(url);
    let dest = into.join(name);

    if dest.exists() {
        output::skip(&format!("{} already present, skipping download", name));
        return Ok(dest);
    }

    output::detail(&format!("Downloading {}", url));
    match download_with_progress(url, &dest, name) {
        Ok(total_bytes) => {
            output::detail(&format!("downloaded {} ({} bytes)", name, total_bytes));
            Ok(dest)
        }
        Err(err) => {
            let _ = std::fs::remove_file(&dest);
            Err(err)
        }
    }
}

/// Stream the response body to `dest` with a progress bar.
fn download_with_progress(url: &str, dest: &Path, filename: &str) -> Result<u64> {
    let pb = output::spinner(&format!("downloading {}", filename));
    let _guard = ProgressGuard::new(&pb);

    let response = ureq::get(url)
        .timeout(http_timeout())
        .call()
        .with_context(|| format!("GET {} failed", url))?;

    if let Some(len) = response
        .header("content-length")
        .and_then(|s| s.parse().ok())
    {
        output::upgrade_to_bytes(&pb, len);
    }

    let mut file = std::fs::File::create(dest)
        .with_context(|| format!("cannot create {}", dest.display()))?;

    let mut reader = response.into_reader();
    let mut buffer = [0u8; 8192];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("read error while downloading {}", filename))?;

        if bytes_read == 0 {
            break;
        }

        file.write_all(&buffer[..bytes_read])
            .with_context(|| format!("write error for {}", dest.display()))?;

        total_bytes += bytes_read as u64;
        pb.set_position(total_bytes);
    }

    Ok(total_bytes)
}
