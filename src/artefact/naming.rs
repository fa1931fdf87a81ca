//! Artefact naming policy for release archives and disk images.
//!
//! Constructs the deterministic artefact stems
//! `<app>-<os>-<architecture>-<tag>`, where the tag is either the
//! profile's version tag (`v1.2.3` for meters, `1.0.2` for punchcards) or
//! the branch name, and the disk-image names `<Bundle>-<tag>.dmg`. Every
//! name derived from one run comes from a single [`ArtefactName`] value.

use crate::branch::Branch;
use crate::config::TargetOs;
use crate::profile::AppProfile;
use crate::version::ReleaseVersion;
use std::fmt;

/// The fixed architecture label stamped into artefact names.
pub const ARCHITECTURE: &str = "x86_64";

/// The deterministic names of one release artefact family.
///
/// # Examples
///
/// ```
/// use meters_release::artefact::naming::ArtefactName;
/// use meters_release::branch::Branch;
/// use meters_release::config::TargetOs;
/// use meters_release::profile::AppId;
/// use meters_release::version::ReleaseVersion;
///
/// let profile = AppId::Meters.profile();
/// let version: ReleaseVersion = "1.2.3".try_into().expect("valid version");
/// let branch: Branch = "master".try_into().expect("valid branch");
///
/// let name = ArtefactName::new(&profile, TargetOs::Linux, &version, &branch);
/// assert_eq!(name.versioned_stem(), "meters-linux-x86_64-v1.2.3");
/// assert_eq!(name.branch_zip(), "meters-linux-x86_64-master.zip");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactName {
    app_name: &'static str,
    bundle_name: &'static str,
    os_label: &'static str,
    version_tag: String,
    branch_tag: String,
}

impl ArtefactName {
    /// Build the artefact names for one run's identity.
    #[must_use]
    pub fn new(
        profile: &AppProfile,
        target_os: TargetOs,
        version: &ReleaseVersion,
        branch: &Branch,
    ) -> Self {
        Self {
            app_name: profile.app_name(),
            bundle_name: profile.bundle_name(),
            os_label: target_os.as_str(),
            version_tag: profile.version_tag(version),
            branch_tag: profile.branch_tag(branch),
        }
    }

    /// Return the application name component.
    #[must_use]
    pub fn app_name(&self) -> &'static str {
        self.app_name
    }

    /// Return the macOS bundle name component.
    #[must_use]
    pub fn bundle_name(&self) -> &'static str {
        self.bundle_name
    }

    /// Return the version tag (`v1.2.3` or `1.0.2` depending on profile).
    #[must_use]
    pub fn version_tag(&self) -> &str {
        &self.version_tag
    }

    /// Return the branch tag.
    #[must_use]
    pub fn branch_tag(&self) -> &str {
        &self.branch_tag
    }

    /// Return the version-tagged artefact stem, used as the output
    /// directory name.
    #[must_use]
    pub fn versioned_stem(&self) -> String {
        self.stem(&self.version_tag)
    }

    /// Return the branch-tagged artefact stem.
    #[must_use]
    pub fn branch_stem(&self) -> String {
        self.stem(&self.branch_tag)
    }

    /// Return the filename of the version-tagged zip archive.
    #[must_use]
    pub fn versioned_zip(&self) -> String {
        format!("{}.zip", self.versioned_stem())
    }

    /// Return the filename of the branch-tagged zip archive.
    #[must_use]
    pub fn branch_zip(&self) -> String {
        format!("{}.zip", self.branch_stem())
    }

    /// Return the filename of the version-tagged macOS disk image.
    #[must_use]
    pub fn versioned_dmg(&self) -> String {
        format!("{}-{}.dmg", self.bundle_name, self.version_tag)
    }

    /// Return the filename of the branch-tagged macOS disk image.
    #[must_use]
    pub fn branch_dmg(&self) -> String {
        format!("{}-{}.dmg", self.bundle_name, self.branch_tag)
    }

    fn stem(&self, tag: &str) -> String {
        format!("{}-{}-{ARCHITECTURE}-{tag}", self.app_name, self.os_label)
    }
}

impl fmt::Display for ArtefactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.versioned_stem())
    }
}
