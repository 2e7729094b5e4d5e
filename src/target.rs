//! Installable library targets and their directory mapping
//!
//! Each target names one prebuilt library subtree inside the pinned
//! archive and the matching destination under the vendored-libraries
//! root of the checkout.

use clap::ValueEnum;
use std::fmt;
use std::path::{Path, PathBuf};

/// Root of the vendored-libraries tree, relative to the project root.
pub const VENDOR_ROOT: &str = "other";

/// One of the installable prebuilt libraries.
///
/// Token validation is owned by clap: anything outside this set is a
/// usage error before the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// SDL library and headers
    Sdl,
    /// FreeType library and headers
    Freetype,
    /// curl library and headers
    Curl,
}

impl Target {
    /// All targets, in install order.
    pub const ALL: [Target; 3] = [Target::Sdl, Target::Freetype, Target::Curl];

    /// Subtree name, identical inside the extracted archive and under
    /// the vendored-libraries root.
    pub fn subtree(self) -> &'static str {
        match self {
            Target::Sdl => "sdl",
            Target::Freetype => "freetype",
            Target::Curl => "curl",
        }
    }

    /// Source subtree inside the staging directory.
    pub fn source_dir(self, staging: &Path) -> PathBuf {
        staging.join(self.subtree())
    }

    /// Destination subtree, relative to the project root.
    pub fn dest_dir(self) -> PathBuf {
        Path::new(VENDOR_ROOT).join(self.subtree())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subtree())
    }
}
