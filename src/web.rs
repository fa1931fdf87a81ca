//! Web (WASM) build and static-asset staging.
//!
//! For each configured crate, runs the package-manager install and the
//! crate's `build_dist.sh`, then copies the resulting `dist` tree into the
//! upload area twice: once under the version tag and once under the branch
//! tag. The per-application directory is created when missing; the tagged
//! destinations must not pre-exist. Nothing is cleaned up on failure.

use crate::artefact::assembler::copy_file;
use crate::artefact::naming::ArtefactName;
use crate::config::ReleaseConfig;
use crate::error::{ReleaseError, Result};
use crate::exec::{CommandExecutor, ensure_success};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Per-crate script that produces the static-asset tree.
const BUILD_SCRIPT: &str = "build_dist.sh";

/// Directory the build script writes its static assets to.
const DIST_DIR: &str = "dist";

/// Destinations staged by one web build.
#[derive(Debug, Clone)]
pub struct WebArtefact {
    /// Version-tagged copy of the static-asset tree.
    pub versioned_dir: Utf8PathBuf,
    /// Branch-tagged copy of the static-asset tree.
    pub branch_dir: Utf8PathBuf,
}

impl WebArtefact {
    /// Compute the destinations one web build would stage into.
    #[must_use]
    pub fn planned(config: &ReleaseConfig, name: &ArtefactName) -> Self {
        let app_dir = config.upload_path.join(name.app_name());
        Self {
            versioned_dir: app_dir.join(name.version_tag()),
            branch_dir: app_dir.join(name.branch_tag()),
        }
    }
}

/// Runs the web toolchain and stages its output for upload.
pub struct WebBuilder<'a> {
    config: &'a ReleaseConfig,
    executor: &'a dyn CommandExecutor,
    name: &'a ArtefactName,
}

impl<'a> WebBuilder<'a> {
    /// Create a web builder for one run's configuration and names.
    #[must_use]
    pub fn new(
        config: &'a ReleaseConfig,
        executor: &'a dyn CommandExecutor,
        name: &'a ArtefactName,
    ) -> Self {
        Self {
            config,
            executor,
            name,
        }
    }

    /// Build every configured crate's web output and stage it for upload.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::CommandFailed`] when the package manager or
    /// build script exits unsuccessfully,
    /// [`ReleaseError::OutputDirExists`] when a tagged destination already
    /// exists, and [`ReleaseError::StagingFailed`] when the build produced
    /// no `dist` tree.
    pub fn build(&self) -> Result<WebArtefact> {
        let app_dir = self.config.upload_path.join(self.name.app_name());
        let artefact = WebArtefact::planned(self.config, self.name);

        for crate_path in &self.config.crate_paths {
            self.install_packages(crate_path)?;
            self.run_build_script(crate_path)?;

            fs::create_dir_all(&app_dir)?;
            let dist_dir = crate_path.join(DIST_DIR);
            stage_tree(&dist_dir, &artefact.versioned_dir)?;
            stage_tree(&dist_dir, &artefact.branch_dir)?;
            log::debug!("staged {dist_dir} under {app_dir}");
        }

        Ok(artefact)
    }

    fn install_packages(&self, crate_path: &Utf8Path) -> Result<()> {
        let output = self.executor.run(
            "npm",
            &["install", "--prefix", crate_path.as_str()],
            None,
        )?;
        ensure_success("npm", output)?;
        Ok(())
    }

    fn run_build_script(&self, crate_path: &Utf8Path) -> Result<()> {
        let script = crate_path.join(BUILD_SCRIPT);
        let output = self.executor.run("bash", &[script.as_str()], None)?;
        ensure_success("bash", output)?;
        Ok(())
    }
}

/// Copy the built asset tree to a tagged destination that must not exist.
fn stage_tree(source: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    if !source.is_dir() {
        return Err(ReleaseError::StagingFailed {
            reason: format!("web build output {source} is missing"),
        });
    }
    if dest.exists() {
        return Err(ReleaseError::OutputDirExists {
            path: dest.to_owned(),
        });
    }
    copy_dir_recursive(source, dest)
}

/// Recursively copy the contents of `source` into a fresh `dest`.
fn copy_dir_recursive(source: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    for entry in source.read_dir_utf8()? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.path().is_dir() {
            copy_dir_recursive(entry.path(), &target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}
