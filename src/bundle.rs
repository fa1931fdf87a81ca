//! macOS application bundle and disk image construction.
//!
//! Wraps the assembled OpenGL binary in a `<Bundle>.app` directory
//! structure, stages the metadata files and an Applications symlink beside
//! it for drag-install semantics, and invokes `hdiutil` to produce a disk
//! image under version-tagged and branch-tagged names. Runs only after
//! assembly, and only when the target OS is macOS and the OpenGL frontend
//! was selected.

use crate::artefact::assembler::{
    AssembledArtefact, LICENSE_OUTPUT, README_OUTPUT, REVISION_FILE, copy_file,
};
use crate::artefact::naming::ArtefactName;
use crate::config::{ReleaseConfig, TargetOs};
use crate::error::{ReleaseError, Result};
use crate::exec::{CommandExecutor, ensure_success};
use crate::frontend::Frontend;
use crate::git;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Target of the drag-install symlink staged beside the bundle.
#[cfg(unix)]
const APPLICATIONS_DIR: &str = "/Applications";

/// Whether this run packages the macOS application bundle.
///
/// # Examples
///
/// ```
/// use meters_release::bundle::should_bundle;
/// # use camino::Utf8PathBuf;
/// # use meters_release::config::{ReleaseConfig, TargetOs};
/// # use meters_release::frontend::Frontend;
/// # use meters_release::profile::AppId;
/// # fn config_with(target_os: TargetOs, frontends: Vec<Frontend>) -> ReleaseConfig {
/// #     ReleaseConfig {
/// #         profile: AppId::Meters.profile(),
/// #         frontends,
/// #         build_path: Utf8PathBuf::from("builds"),
/// #         upload_path: Utf8PathBuf::from("uploads"),
/// #         crate_paths: vec![Utf8PathBuf::from("glutin")],
/// #         root_path: Utf8PathBuf::from("."),
/// #         target_os,
/// #         dry_run: false,
/// #     }
/// # }
/// let macos = config_with(TargetOs::Macos, vec![Frontend::Glutin]);
/// assert!(should_bundle(&macos));
///
/// let linux = config_with(TargetOs::Linux, vec![Frontend::Glutin]);
/// assert!(!should_bundle(&linux));
/// ```
#[must_use]
pub fn should_bundle(config: &ReleaseConfig) -> bool {
    config.target_os == TargetOs::Macos && config.frontends.contains(&Frontend::Glutin)
}

/// Paths produced by one bundle run.
#[derive(Debug, Clone)]
pub struct BundleArtefact {
    /// Staging directory holding the `.app` tree and its metadata.
    pub bundle_dir: Utf8PathBuf,
    /// The version-tagged disk image in the upload directory.
    pub versioned_dmg: Utf8PathBuf,
    /// The branch-tagged duplicate of the disk image.
    pub branch_dmg: Utf8PathBuf,
}

impl BundleArtefact {
    /// Compute the paths one bundle run would produce.
    #[must_use]
    pub fn planned(config: &ReleaseConfig, name: &ArtefactName) -> Self {
        Self {
            bundle_dir: config.build_path.join(name.bundle_name()),
            versioned_dmg: config.upload_path.join(name.versioned_dmg()),
            branch_dmg: config.upload_path.join(name.branch_dmg()),
        }
    }
}

/// Builds the macOS application bundle and its disk images.
pub struct BundleBuilder<'a> {
    config: &'a ReleaseConfig,
    executor: &'a dyn CommandExecutor,
    name: &'a ArtefactName,
}

impl<'a> BundleBuilder<'a> {
    /// Create a bundle builder for one run's configuration and names.
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

    /// Build the bundle tree from an assembled artefact and create both
    /// disk images.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::OutputDirExists`] when the bundle staging
    /// directory already exists, [`ReleaseError::CommandFailed`] when
    /// `hdiutil` exits unsuccessfully, and staging or git errors from the
    /// intermediate steps.
    pub fn build(&self, assembled: &AssembledArtefact) -> Result<BundleArtefact> {
        let artefact = BundleArtefact::planned(self.config, self.name);
        if artefact.bundle_dir.exists() {
            return Err(ReleaseError::OutputDirExists {
                path: artefact.bundle_dir,
            });
        }
        let bundle_name = self.name.bundle_name();
        let binary_dir = artefact
            .bundle_dir
            .join(format!("{bundle_name}.app"))
            .join("Contents")
            .join("MacOS");
        fs::create_dir_all(&binary_dir)?;

        let Some(spec) = self.config.profile.frontend_spec(Frontend::Glutin) else {
            return Err(ReleaseError::BundleFailed {
                reason: "the OpenGL frontend has no binary to bundle".to_owned(),
            });
        };
        copy_file(
            &assembled.output_dir.join(spec.output_name),
            &binary_dir.join(bundle_name),
        )?;
        copy_file(
            &assembled.output_dir.join(README_OUTPUT),
            &artefact.bundle_dir.join(README_OUTPUT),
        )?;
        copy_file(
            &assembled.output_dir.join(LICENSE_OUTPUT),
            &artefact.bundle_dir.join(LICENSE_OUTPUT),
        )?;

        let commit = git::current_commit(self.executor, &self.config.root_path)?;
        fs::write(artefact.bundle_dir.join(REVISION_FILE), commit)?;

        link_applications(&artefact.bundle_dir)?;

        self.create_disk_image(&artefact.versioned_dmg, &artefact.bundle_dir)?;
        copy_file(&artefact.versioned_dmg, &artefact.branch_dmg)?;

        log::debug!(
            "bundled {} into {}",
            artefact.bundle_dir,
            artefact.versioned_dmg
        );
        Ok(artefact)
    }

    fn create_disk_image(&self, dmg_path: &Utf8Path, source_dir: &Utf8Path) -> Result<()> {
        let output = self.executor.run(
            "hdiutil",
            &["create", dmg_path.as_str(), "-srcfolder", source_dir.as_str()],
            None,
        )?;
        ensure_success("hdiutil", output)?;
        Ok(())
    }
}

/// Symlink the system Applications folder beside the bundle.
#[cfg(unix)]
fn link_applications(bundle_dir: &Utf8Path) -> Result<()> {
    std::os::unix::fs::symlink(APPLICATIONS_DIR, bundle_dir.join("Applications"))?;
    Ok(())
}

/// Application bundles are only produced on unix hosts.
#[cfg(not(unix))]
fn link_applications(_bundle_dir: &Utf8Path) -> Result<()> {
    Err(ReleaseError::BundleFailed {
        reason: "application bundles require a unix host".to_owned(),
    })
}
