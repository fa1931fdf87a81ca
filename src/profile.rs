//! Application profiles and their frontend name tables.
//!
//! Each packaged application owns a fixed table mapping frontends to
//! compiled binary names and shipped (renamed) binary names, plus the
//! conventions for version and branch tags. The two profiles differ in
//! argument cardinality and in the version-tag prefix; everything else is
//! shared machinery.

use crate::branch::Branch;
use crate::error::{ReleaseError, Result};
use crate::frontend::Frontend;
use crate::version::ReleaseVersion;
use camino::Utf8PathBuf;
use clap::ValueEnum;
use std::fmt;

/// The application selected with `--app`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum AppId {
    /// Meters Below the Ground.
    Meters,
    /// Punch Cards.
    Punchcards,
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.profile().app_name())
    }
}

impl AppId {
    /// Return the configuration profile for this application.
    #[must_use]
    pub fn profile(self) -> AppProfile {
        match self {
            Self::Meters => AppProfile {
                id: self,
                app_name: "meters",
                bundle_name: "MetersBelowTheGround",
                version_prefix: "v",
                single_selection: false,
            },
            Self::Punchcards => AppProfile {
                id: self,
                app_name: "punchcards",
                bundle_name: "PunchCards",
                version_prefix: "",
                single_selection: true,
            },
        }
    }
}

/// Per-frontend names from an application's lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontendSpec {
    /// Name of the binary that cargo writes to the release directory.
    pub binary_name: &'static str,
    /// Renamed filename the binary ships under.
    pub output_name: &'static str,
}

/// Immutable per-application packaging configuration.
///
/// Holds the name tables and tag conventions for one application. Built
/// once from the [`AppId`] and passed explicitly to the assembler, bundle
/// builder, and web builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppProfile {
    id: AppId,
    app_name: &'static str,
    bundle_name: &'static str,
    version_prefix: &'static str,
    single_selection: bool,
}

impl AppProfile {
    /// Return the application name used in artefact stems.
    #[must_use]
    pub fn app_name(&self) -> &'static str {
        self.app_name
    }

    /// Return the display name used for the macOS bundle and disk image.
    #[must_use]
    pub fn bundle_name(&self) -> &'static str {
        self.bundle_name
    }

    /// Look up the binary and output names for a frontend.
    ///
    /// Returns `None` for the WASM frontend, which has no native binary.
    ///
    /// # Examples
    ///
    /// ```
    /// use meters_release::frontend::Frontend;
    /// use meters_release::profile::AppId;
    ///
    /// let profile = AppId::Meters.profile();
    /// let spec = profile.frontend_spec(Frontend::Unix).unwrap();
    /// assert_eq!(spec.binary_name, "meters_unix");
    /// assert_eq!(spec.output_name, "meters-terminal");
    /// assert!(profile.frontend_spec(Frontend::Wasm).is_none());
    /// ```
    #[must_use]
    pub fn frontend_spec(&self, frontend: Frontend) -> Option<FrontendSpec> {
        match (self.id, frontend) {
            (AppId::Meters, Frontend::Unix) => Some(FrontendSpec {
                binary_name: "meters_unix",
                output_name: "meters-terminal",
            }),
            (AppId::Meters, Frontend::Glutin) => Some(FrontendSpec {
                binary_name: "meters_glutin",
                output_name: "meters-opengl",
            }),
            (AppId::Punchcards, Frontend::Unix) => Some(FrontendSpec {
                binary_name: "punchcards_unix",
                output_name: "punchcards-terminal",
            }),
            (AppId::Punchcards, Frontend::Glutin) => Some(FrontendSpec {
                binary_name: "punchcards_glutin",
                output_name: "punchcards-opengl",
            }),
            (_, Frontend::Wasm) => None,
        }
    }

    /// Format the version tag used in artefact names.
    ///
    /// The meters profile prefixes versions with `v`; the punchcards
    /// profile uses the bare version.
    #[must_use]
    pub fn version_tag(&self, version: &ReleaseVersion) -> String {
        format!("{}{version}", self.version_prefix)
    }

    /// Format the branch tag used in artefact names.
    ///
    /// Both profiles use the branch name verbatim.
    #[must_use]
    pub fn branch_tag(&self, branch: &Branch) -> String {
        branch.as_str().to_owned()
    }

    /// Check the selected frontends and crate paths against this profile's
    /// cardinality rules.
    ///
    /// The punchcards profile packages exactly one frontend from one crate
    /// per run; the meters profile accepts any non-empty selection.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::ProfileConstraint`] when the selection does
    /// not fit the profile.
    pub fn validate_selection(
        &self,
        frontends: &[Frontend],
        crate_paths: &[Utf8PathBuf],
    ) -> Result<()> {
        if frontends.is_empty() {
            return Err(self.constraint("at least one frontend must be selected"));
        }
        if crate_paths.is_empty() {
            return Err(self.constraint("at least one crate path must be supplied"));
        }
        if self.single_selection {
            if frontends.len() > 1 {
                return Err(self.constraint(&format!(
                    "expected exactly one frontend, got {}",
                    frontends.len()
                )));
            }
            if crate_paths.len() > 1 {
                return Err(self.constraint(&format!(
                    "expected exactly one crate path, got {}",
                    crate_paths.len()
                )));
            }
        }
        Ok(())
    }

    fn constraint(&self, reason: &str) -> ReleaseError {
        ReleaseError::ProfileConstraint {
            app: self.app_name,
            reason: reason.to_owned(),
        }
    }
}
