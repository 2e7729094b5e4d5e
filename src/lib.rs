//! One-shot bootstrap for the checkout's vendored third-party libraries
//!
//! Contributors on platforms without system packages for SDL, FreeType
//! and curl (typically Windows) run this tool once to obtain a
//! known-good, version-locked copy of the prebuilt libraries:
//!
//! ```text
//! download-libs sdl freetype curl
//! ```
//!
//! The pipeline is strictly sequential: resolve the pinned archive URL,
//! download the archive into the checkout, unzip it, merge-copy the
//! requested subtrees into `other/<target>/`, then delete the staging
//! directory and the archive. The pinned revision in
//! [`pipeline::LIBS_REVISION`] is the sole mechanism for updating the
//! vendored library versions.
//!
//! Destination paths are project-root-relative; the binary changes its
//! working directory to the checkout root before touching the
//! filesystem, so it can be invoked from anywhere.

pub mod archive;
pub mod fetch;
pub mod install;
pub mod output;
pub mod pipeline;
pub mod project;
pub mod target;

pub use pipeline::{download_all, PipelineError, DEFAULT_BASE_URL, LIBS_REVISION};
pub use target::Target;
