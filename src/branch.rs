//! Branch identifier resolution for artefact naming.
//!
//! The branch name is resolved once per run through an ordered chain: the
//! CI branch environment variable first, then a git query against the
//! project root. The chain short-circuits on the first source that yields
//! a non-empty value; an unset, empty, or whitespace-only variable falls
//! through to the query.

use crate::error::{ReleaseError, Result};
use crate::exec::CommandExecutor;
use crate::git;
use camino::Utf8Path;
use std::fmt;

/// Environment variable consulted before querying version control.
pub const BRANCH_ENV_VAR: &str = "TRAVIS_BRANCH";

/// A validated branch name used for branch-tagged artefact names.
///
/// # Examples
///
/// ```
/// use meters_release::branch::Branch;
///
/// let branch: Branch = "master".try_into().unwrap();
/// assert_eq!(branch.as_str(), "master");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Branch(String);

impl Branch {
    /// Return the branch name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Branch {
    type Error = ReleaseError;

    fn try_from(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ReleaseError::InvalidBranch {
                value: value.to_owned(),
                reason: "branch name must not be empty".to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl TryFrom<String> for Branch {
    type Error = ReleaseError;

    fn try_from(value: String) -> Result<Self> {
        Self::try_from(value.as_str())
    }
}

impl AsRef<str> for Branch {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolves the branch from the environment, falling back to git.
///
/// # Errors
///
/// Returns [`ReleaseError::Git`] when the fallback query fails, and
/// [`ReleaseError::InvalidBranch`] when neither source yields a usable
/// name.
pub fn resolve_branch(executor: &dyn CommandExecutor, repo: &Utf8Path) -> Result<Branch> {
    resolve_chain(environment_branch(), || {
        git::current_branch(executor, repo)
    })
}

/// Reads the branch environment variable, discarding empty values.
fn environment_branch() -> Option<String> {
    std::env::var(BRANCH_ENV_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Applies the ordered resolution chain: environment, then query.
fn resolve_chain(
    env_value: Option<String>,
    query: impl FnOnce() -> Result<String>,
) -> Result<Branch> {
    match env_value {
        Some(value) => {
            log::debug!("branch {value:?} taken from {BRANCH_ENV_VAR}");
            Branch::try_from(value)
        }
        None => {
            let value = query()?;
            log::debug!("branch {value:?} taken from git");
            Branch::try_from(value)
        }
    }
}
