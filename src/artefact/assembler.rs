//! Output directory assembly and upload staging for native builds.
//!
//! Creates the versioned output directory, stages the renamed binaries and
//! metadata files into it, zips the tree into the upload directory, and
//! duplicates the zip under the branch-tagged name. The output directory
//! must not pre-exist; nothing is overwritten or cleaned up on failure.

use crate::artefact::archive::zip_directory;
use crate::artefact::naming::ArtefactName;
use crate::config::ReleaseConfig;
use crate::error::{ReleaseError, Result};
use crate::exec::CommandExecutor;
use crate::git;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Filename of the readme copied from the project root.
pub const README_SOURCE: &str = "README.md";

/// Filename of the licence copied from the project root.
pub const LICENSE_SOURCE: &str = "LICENSE";

/// Readme filename inside assembled artefacts.
pub const README_OUTPUT: &str = "README.txt";

/// Licence filename inside assembled artefacts.
pub const LICENSE_OUTPUT: &str = "LICENSE.txt";

/// Revision-stamp filename inside assembled artefacts.
pub const REVISION_FILE: &str = "REVISION.txt";

/// Paths produced by one assembly run.
#[derive(Debug, Clone)]
pub struct AssembledArtefact {
    /// The versioned output directory holding the staged files.
    pub output_dir: Utf8PathBuf,
    /// The version-tagged zip archive in the upload directory.
    pub versioned_zip: Utf8PathBuf,
    /// The branch-tagged duplicate of the zip archive.
    pub branch_zip: Utf8PathBuf,
}

impl AssembledArtefact {
    /// Compute the paths one assembly run would produce.
    #[must_use]
    pub fn planned(config: &ReleaseConfig, name: &ArtefactName) -> Self {
        Self {
            output_dir: config.build_path.join(name.versioned_stem()),
            versioned_zip: config.upload_path.join(name.versioned_zip()),
            branch_zip: config.upload_path.join(name.branch_zip()),
        }
    }
}

/// Assembles the versioned release directory and its zip archives.
pub struct Assembler<'a> {
    config: &'a ReleaseConfig,
    executor: &'a dyn CommandExecutor,
    name: &'a ArtefactName,
}

impl<'a> Assembler<'a> {
    /// Create an assembler for one run's configuration and artefact names.
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

    /// Assemble the output directory and write both zip archives.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::OutputDirExists`] when the versioned output
    /// directory already exists, [`ReleaseError::StagingFailed`] when a file
    /// copy fails, and the underlying error for git or archive failures.
    pub fn assemble(&self) -> Result<AssembledArtefact> {
        let artefact = AssembledArtefact::planned(self.config, self.name);
        if artefact.output_dir.exists() {
            return Err(ReleaseError::OutputDirExists {
                path: artefact.output_dir,
            });
        }
        fs::create_dir_all(&artefact.output_dir)?;

        self.stage_binaries(&artefact.output_dir)?;
        self.stage_metadata(&artefact.output_dir)?;
        self.write_revision(&artefact.output_dir)?;

        fs::create_dir_all(&self.config.upload_path)?;
        zip_directory(&artefact.output_dir, &artefact.versioned_zip)?;
        copy_file(&artefact.versioned_zip, &artefact.branch_zip)?;

        log::debug!(
            "assembled {} and archived it to {}",
            artefact.output_dir,
            artefact.versioned_zip
        );
        Ok(artefact)
    }

    /// Copy each native frontend's binary under its shipped name.
    fn stage_binaries(&self, output_dir: &Utf8Path) -> Result<()> {
        let binary_dir = self.config.release_binary_dir();
        for frontend in self.config.native_frontends() {
            let Some(spec) = self.config.profile.frontend_spec(frontend) else {
                continue;
            };
            copy_file(
                &binary_dir.join(spec.binary_name),
                &output_dir.join(spec.output_name),
            )?;
            log::debug!("staged {} as {}", spec.binary_name, spec.output_name);
        }
        Ok(())
    }

    /// Copy the readme and licence from the project root, renaming them.
    fn stage_metadata(&self, output_dir: &Utf8Path) -> Result<()> {
        copy_file(
            &self.config.root_path.join(README_SOURCE),
            &output_dir.join(README_OUTPUT),
        )?;
        copy_file(
            &self.config.root_path.join(LICENSE_SOURCE),
            &output_dir.join(LICENSE_OUTPUT),
        )
    }

    /// Stamp the current commit hash into the output directory.
    fn write_revision(&self, output_dir: &Utf8Path) -> Result<()> {
        let commit = git::current_commit(self.executor, &self.config.root_path)?;
        fs::write(output_dir.join(REVISION_FILE), commit)?;
        Ok(())
    }
}

/// Copy `source` to `dest`, attaching both paths to any failure.
pub(crate) fn copy_file(source: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    fs::copy(source, dest).map_err(|err| ReleaseError::StagingFailed {
        reason: format!("failed to copy {source} to {dest}: {err}"),
    })?;
    Ok(())
}
