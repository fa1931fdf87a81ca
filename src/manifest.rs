//! Release-manifest loading.
//!
//! The version stamped into artefact names comes from a crate manifest's
//! `package.version` field. Only that field is read; everything else in
//! the manifest is ignored. With several crate paths in one run, the first
//! manifest is authoritative — release crates of one application share a
//! version.

use crate::error::{ReleaseError, Result};
use crate::version::ReleaseVersion;
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

/// Manifest filename appended to each crate path.
pub const MANIFEST_FILE_NAME: &str = "Cargo.toml";

#[derive(Debug, Deserialize)]
struct Manifest {
    package: Package,
}

#[derive(Debug, Deserialize)]
struct Package {
    version: String,
}

/// Returns the manifest path for each crate path, in order.
#[must_use]
pub fn manifest_paths(crate_paths: &[Utf8PathBuf]) -> Vec<Utf8PathBuf> {
    crate_paths
        .iter()
        .map(|crate_path| crate_path.join(MANIFEST_FILE_NAME))
        .collect()
}

/// Reads the release version from a crate manifest.
///
/// # Errors
///
/// Returns [`ReleaseError::ManifestNotFound`] when the file is missing,
/// [`ReleaseError::InvalidManifest`] when it cannot be parsed or lacks a
/// `package.version` field, and [`ReleaseError::InvalidVersion`] when the
/// value is not a release version.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use meters_release::manifest::release_version;
///
/// let version = release_version(Utf8Path::new("unix/Cargo.toml"))?;
/// println!("packaging version {version}");
/// # Ok::<(), meters_release::error::ReleaseError>(())
/// ```
pub fn release_version(manifest_path: &Utf8Path) -> Result<ReleaseVersion> {
    let contents = std::fs::read_to_string(manifest_path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            ReleaseError::ManifestNotFound {
                path: manifest_path.to_owned(),
            }
        } else {
            ReleaseError::Io(err)
        }
    })?;

    let manifest: Manifest =
        toml::from_str(&contents).map_err(|err| ReleaseError::InvalidManifest {
            path: manifest_path.to_owned(),
            reason: err.to_string(),
        })?;

    ReleaseVersion::try_from(manifest.package.version)
}
