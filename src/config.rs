//! Run configuration resolved from the command line.
//!
//! [`ReleaseConfig`] is built once from the parsed CLI arguments and stays
//! immutable for the rest of the run. Construction normalises every path
//! lexically and enforces the profile's cardinality rules, so the packaging
//! flow never revisits argument validity.

use crate::cli::Cli;
use crate::error::Result;
use crate::frontend::Frontend;
use crate::manifest;
use crate::profile::AppProfile;
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use clap::ValueEnum;
use std::fmt;

/// Operating-system label stamped into artefact names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum TargetOs {
    /// Linux release (`linux` in artefact names).
    Linux,
    /// macOS release (`macos` in artefact names); enables bundle packaging.
    Macos,
}

impl TargetOs {
    /// Return the label used in artefact names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Macos => "macos",
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable configuration for one packaging run.
#[derive(Debug, Clone)]
pub struct ReleaseConfig {
    /// Application profile owning name tables and tag formats.
    pub profile: AppProfile,
    /// Frontends selected for this run, in the order given.
    pub frontends: Vec<Frontend>,
    /// Scratch directory where release trees are assembled.
    pub build_path: Utf8PathBuf,
    /// Destination directory for zips, disk images, and web trees.
    pub upload_path: Utf8PathBuf,
    /// Crate directories to build, in the order given.
    pub crate_paths: Vec<Utf8PathBuf>,
    /// Project root holding metadata files, the checkout, and `target/release`.
    pub root_path: Utf8PathBuf,
    /// Operating-system label for artefact names.
    pub target_os: TargetOs,
    /// When set, resolve and report the plan without running any tool.
    pub dry_run: bool,
}

impl ReleaseConfig {
    /// Build a configuration from parsed command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ReleaseError::ProfileConstraint`] when the
    /// frontend or crate-path selection breaks the profile's cardinality
    /// rules.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let profile = cli.app.profile();
        profile.validate_selection(&cli.frontend, &cli.crate_path)?;
        Ok(Self {
            profile,
            frontends: cli.frontend.clone(),
            build_path: normalise(&cli.build_path),
            upload_path: normalise(&cli.upload_path),
            crate_paths: cli.crate_path.iter().map(|path| normalise(path)).collect(),
            root_path: normalise(&cli.root_path),
            target_os: cli.target_os,
            dry_run: cli.dry_run,
        })
    }

    /// Return the manifest path for each selected crate, in order.
    #[must_use]
    pub fn manifest_paths(&self) -> Vec<Utf8PathBuf> {
        manifest::manifest_paths(&self.crate_paths)
    }

    /// Return the selected frontends that produce a native binary, in order.
    #[must_use]
    pub fn native_frontends(&self) -> Vec<Frontend> {
        self.frontends
            .iter()
            .copied()
            .filter(|frontend| frontend.is_native())
            .collect()
    }

    /// Whether any selected frontend produces a native binary.
    #[must_use]
    pub fn wants_native(&self) -> bool {
        self.frontends.iter().any(|frontend| frontend.is_native())
    }

    /// Whether the WASM frontend was selected.
    #[must_use]
    pub fn wants_web(&self) -> bool {
        self.frontends.contains(&Frontend::Wasm)
    }

    /// Return the directory where cargo writes compiled release binaries.
    #[must_use]
    pub fn release_binary_dir(&self) -> Utf8PathBuf {
        self.root_path.join("target").join("release")
    }
}

/// Normalise a path lexically, resolving `.` and `..` segments.
///
/// Output paths may not exist yet, so this works purely on the path text
/// and never touches the filesystem. A rooted path cannot escape its root;
/// a relative path keeps leading `..` segments. An empty result becomes
/// `.`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use meters_release::config::normalise;
///
/// assert_eq!(normalise(Utf8Path::new("./uploads/")), "uploads");
/// assert_eq!(normalise(Utf8Path::new("/srv/a/../builds")), "/srv/builds");
/// ```
#[must_use]
pub fn normalise(path: &Utf8Path) -> Utf8PathBuf {
    let mut normalised = Utf8PathBuf::new();
    // Number of trailing segments that `..` may pop; leading `..` segments
    // in a relative path are not poppable.
    let mut poppable = 0usize;
    for component in path.components() {
        match component {
            Utf8Component::Prefix(_) | Utf8Component::RootDir => {
                normalised.push(component.as_str());
            }
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if poppable > 0 {
                    normalised.pop();
                    poppable -= 1;
                } else if !normalised.has_root() {
                    normalised.push("..");
                }
            }
            Utf8Component::Normal(segment) => {
                normalised.push(segment);
                poppable += 1;
            }
        }
    }
    if normalised.as_str().is_empty() {
        Utf8PathBuf::from(".")
    } else {
        normalised
    }
}
