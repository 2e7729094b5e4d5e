//! download-libs CLI - vendored third-party library bootstrap
//!
//! Usage:
//!   download-libs <TARGET>...      Install prebuilt libs into other/
//!
//! Valid targets: sdl, freetype, curl.

use clap::Parser;
use download_libs::{output, pipeline, project, Target};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "download-libs")]
#[command(about = "Download freetype, SDL and curl library and header files for Windows")]
#[command(version)]
struct Cli {
    /// Target to download
    #[arg(value_enum, required = true)]
    targets: Vec<Target>,

    /// Project checkout root (defaults to the directory above the one
    /// containing this executable)
    #[arg(long, env = "DOWNLOAD_LIBS_ROOT")]
    project_root: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let root = project::resolve_root(cli.project_root.as_deref())?;
    project::enter_root(&root)?;
    pipeline::download_all(&cli.targets)
}

/// Canonical pipeline failures print verbatim to stdout; the cause
/// chain goes to stderr.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<pipeline::PipelineError>() {
        Some(failure) => {
            println!("{}", failure);
            output::error(&format!("{:#}", err));
        }
        None => output::error(&format!("{:#}", err)),
    }
}
