//! Release version newtype for artefact naming.
//!
//! Validates that the value read from a crate manifest has the shape of a
//! semantic version: three dot-separated numeric components, optionally
//! followed by a pre-release or build suffix. The tool never interprets the
//! number; it only stamps it into artefact names.

use crate::error::{ReleaseError, Result};
use std::fmt;

/// A validated release version string, such as `1.2.3` or `0.4.0-rc1`.
///
/// # Examples
///
/// ```
/// use meters_release::version::ReleaseVersion;
///
/// let version: ReleaseVersion = "1.2.3".try_into().unwrap();
/// assert_eq!(version.as_str(), "1.2.3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Return the version as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for ReleaseVersion {
    type Error = ReleaseError;

    fn try_from(value: &str) -> Result<Self> {
        validate_version(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for ReleaseVersion {
    type Error = ReleaseError;

    fn try_from(value: String) -> Result<Self> {
        validate_version(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for ReleaseVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is a well-formed release version.
fn validate_version(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(value, "version must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(invalid(value, "version must not contain whitespace"));
    }

    // The numeric core ends at the first pre-release or build marker.
    let core = value
        .split_once(['-', '+'])
        .map_or(value, |(core, _)| core);

    let components: Vec<&str> = core.split('.').collect();
    if components.len() != 3 {
        return Err(invalid(
            value,
            &format!(
                "expected three dot-separated components, got {}",
                components.len()
            ),
        ));
    }
    for component in components {
        if component.is_empty() || !component.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(
                value,
                &format!("component {component:?} is not numeric"),
            ));
        }
    }
    Ok(())
}

fn invalid(value: &str, reason: &str) -> ReleaseError {
    ReleaseError::InvalidVersion {
        value: value.to_owned(),
        reason: reason.to_owned(),
    }
}
