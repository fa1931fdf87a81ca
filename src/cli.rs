//! CLI argument definitions for the release packager.
//!
//! This module defines the command-line interface using clap. It is
//! separated from the main entrypoint to keep the binary small and focused
//! on orchestration.

use crate::config::TargetOs;
use crate::frontend::Frontend;
use crate::profile::AppId;
use camino::Utf8PathBuf;
use clap::Parser;

/// Package release artefacts for the Meters Below the Ground builds.
#[derive(Parser, Debug, Clone)]
#[command(name = "meters-release")]
#[command(version, about)]
#[command(long_about = concat!(
    "Package release artefacts for Meters Below the Ground and Punch Cards.\n\n",
    "The tool drives cargo release builds for the selected frontends, assembles ",
    "a versioned release directory (renamed binary, README.txt, LICENSE.txt, ",
    "REVISION.txt), and writes zip archives to the upload directory under ",
    "version-tagged and branch-tagged names. On macOS the OpenGL frontend is ",
    "additionally wrapped in an application bundle and a disk image. The wasm ",
    "frontend runs the web toolchain instead and stages the dist tree once per ",
    "version and once per branch.\n\n",
    "The release version comes from the first crate manifest's package.version ",
    "field. The branch comes from TRAVIS_BRANCH when set and non-empty, ",
    "falling back to the current git branch of the project root.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package the terminal frontend for Linux:\n",
    "    $ meters-release --frontend unix --os linux --build-path builds \\\n",
    "        --upload-path uploads --crate-path unix --root-path .\n\n",
    "  Package both native frontends and the web build:\n",
    "    $ meters-release --frontend unix --frontend glutin --frontend wasm \\\n",
    "        --os linux --build-path builds --upload-path uploads \\\n",
    "        --crate-path unix --crate-path glutin --crate-path wasm \\\n",
    "        --root-path .\n\n",
    "  Package the Punch Cards OpenGL frontend for macOS:\n",
    "    $ meters-release --app punchcards --frontend glutin --os macos \\\n",
    "        --build-path builds --upload-path uploads \\\n",
    "        --crate-path glutin --root-path .\n\n",
    "  Preview the plan without running any tool:\n",
    "    $ meters-release --frontend unix --os linux --build-path builds \\\n",
    "        --upload-path uploads --crate-path unix --root-path . --dry-run\n",
))]
pub struct Cli {
    /// Application profile to package.
    #[arg(long, value_enum, value_name = "APP", default_value_t = AppId::Meters)]
    pub app: AppId,

    /// Frontend to package (can be repeated).
    #[arg(long, value_enum, value_name = "FRONTEND", required = true)]
    pub frontend: Vec<Frontend>,

    /// Scratch directory where release trees are assembled.
    #[arg(long, value_name = "DIR")]
    pub build_path: Utf8PathBuf,

    /// Destination directory for zips, disk images, and web trees.
    #[arg(long, value_name = "DIR")]
    pub upload_path: Utf8PathBuf,

    /// Crate directory to build (can be repeated).
    #[arg(long, value_name = "DIR", required = true)]
    pub crate_path: Vec<Utf8PathBuf>,

    /// Project root holding README.md, LICENSE, and target/release.
    #[arg(long, value_name = "DIR")]
    pub root_path: Utf8PathBuf,

    /// Target operating-system label used in artefact names.
    #[arg(long = "os", value_enum, value_name = "OS")]
    pub target_os: TargetOs,

    /// Resolve the version, branch, and plan, then exit without building.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase diagnostic verbosity (repeatable: -v, -vv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
