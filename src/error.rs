//! Error types for the release packaging CLI.
//!
//! This module defines semantic error variants for every way a release run
//! can fail: configuration problems, external tool failures, and filesystem
//! conflicts. External tool failures carry the tool's exit code so the
//! process can propagate it unchanged.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while packaging a release.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// The selected frontends or crate paths violate the application
    /// profile's cardinality rules.
    #[error("invalid arguments for {app}: {reason}")]
    ProfileConstraint {
        /// Name of the application profile being packaged.
        app: &'static str,
        /// Description of the violated rule.
        reason: String,
    },

    /// The release manifest was not found at the expected location.
    #[error("release manifest not found at {path}")]
    ManifestNotFound {
        /// Path where the manifest was expected.
        path: Utf8PathBuf,
    },

    /// The release manifest could not be parsed or lacks a version field.
    #[error("invalid release manifest at {path}: {reason}")]
    InvalidManifest {
        /// Path to the offending manifest.
        path: Utf8PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// The version string read from the manifest is not a release version.
    #[error("invalid release version {value:?}: {reason}")]
    InvalidVersion {
        /// The rejected version string.
        value: String,
        /// Description of why the value was rejected.
        reason: String,
    },

    /// The resolved branch name is unusable for artefact naming.
    #[error("invalid branch name {value:?}: {reason}")]
    InvalidBranch {
        /// The rejected branch string.
        value: String,
        /// Description of why the value was rejected.
        reason: String,
    },

    /// A release build of a crate manifest failed.
    #[error("cargo build failed for {manifest_path}: {reason}")]
    BuildFailed {
        /// Manifest whose release build failed.
        manifest_path: Utf8PathBuf,
        /// Exit code reported by cargo, when it exited normally.
        code: Option<i32>,
        /// Captured compiler diagnostics.
        reason: String,
    },

    /// A git query failed.
    #[error("git {operation} failed: {message}")]
    Git {
        /// The git operation that failed (rev-parse, etc.).
        operation: &'static str,
        /// Exit code reported by git, when it exited normally.
        code: Option<i32>,
        /// Description of the failure.
        message: String,
    },

    /// An external tool exited unsuccessfully.
    #[error("{program} exited with {}: {stderr}", exit_label(.code))]
    CommandFailed {
        /// Name of the program that failed.
        program: String,
        /// Exit code, when the program exited normally.
        code: Option<i32>,
        /// Captured diagnostics from the program.
        stderr: String,
    },

    /// An external tool could not be launched at all.
    #[error("{program} not found; is it installed and on PATH?")]
    ToolNotFound {
        /// Name of the missing program.
        program: String,
    },

    /// The versioned output directory already exists.
    #[error("output directory {path} already exists")]
    OutputDirExists {
        /// Path of the pre-existing directory.
        path: Utf8PathBuf,
    },

    /// Copying files into an artefact tree failed.
    #[error("staging failed: {reason}")]
    StagingFailed {
        /// Description of the staging failure.
        reason: String,
    },

    /// Building the macOS application bundle failed.
    #[error("bundle creation failed: {reason}")]
    BundleFailed {
        /// Description of the bundle failure.
        reason: String,
    },

    /// Writing the zip archive failed.
    #[error("archive creation failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReleaseError {
    /// Return the process exit code for this error.
    ///
    /// Failures of external tools propagate the tool's own exit code;
    /// every other failure, and a tool killed by a signal, maps to `1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use meters_release::error::ReleaseError;
    ///
    /// let err = ReleaseError::CommandFailed {
    ///     program: "hdiutil".to_owned(),
    ///     code: Some(4),
    ///     stderr: "resource busy".to_owned(),
    /// };
    /// assert_eq!(err.exit_code(), 4);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BuildFailed { code, .. }
            | Self::Git { code, .. }
            | Self::CommandFailed { code, .. } => code.unwrap_or(1),
            _ => 1,
        }
    }
}

/// Format an optional exit code for error messages.
fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_owned(),
    }
}

/// Result type alias using [`ReleaseError`].
pub type Result<T> = std::result::Result<T, ReleaseError>;
