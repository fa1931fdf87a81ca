//! Cargo build orchestration for the release frontends.
//!
//! Runs the compiler's release build for each selected crate manifest in
//! sequence. The first failure aborts the run with the compiler's
//! diagnostics and exit code attached; later manifests are not built.

use crate::error::{ReleaseError, Result};
use crate::exec::CommandExecutor;
use camino::{Utf8Path, Utf8PathBuf};

/// Runs release builds over the selected crate manifests.
pub struct ReleaseBuilder<'a> {
    executor: &'a dyn CommandExecutor,
}

impl<'a> ReleaseBuilder<'a> {
    /// Create a builder that invokes cargo through the given executor.
    #[must_use]
    pub fn new(executor: &'a dyn CommandExecutor) -> Self {
        Self { executor }
    }

    /// Run a release build for a single crate manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::BuildFailed`] when cargo exits unsuccessfully,
    /// carrying its captured diagnostics and exit code.
    pub fn build_manifest(&self, manifest_path: &Utf8Path) -> Result<()> {
        let output = self.executor.run(
            "cargo",
            &[
                "build",
                "--manifest-path",
                manifest_path.as_str(),
                "--release",
            ],
            None,
        )?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReleaseError::BuildFailed {
                manifest_path: manifest_path.to_owned(),
                code: output.status.code(),
                reason: stderr.trim().to_owned(),
            });
        }
        log::debug!("release build finished for {manifest_path}");
        Ok(())
    }

    /// Run release builds for every manifest, in order.
    ///
    /// # Errors
    ///
    /// Returns the first build failure.
    pub fn build_all(&self, manifest_paths: &[Utf8PathBuf]) -> Result<()> {
        for manifest_path in manifest_paths {
            self.build_manifest(manifest_path)?;
        }
        Ok(())
    }
}
