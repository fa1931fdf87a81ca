//! Git queries used for artefact naming and revision stamps.
//!
//! The release process needs two read-only facts from version control: the
//! current commit hash (written verbatim into `REVISION.txt`) and the
//! current branch name (used when the branch environment variable is
//! absent). Both run through the [`CommandExecutor`] seam, in the project
//! root directory.

use crate::error::{ReleaseError, Result};
use crate::exec::CommandExecutor;
use camino::Utf8Path;

/// Returns the current commit hash query output, byte for byte.
///
/// The stdout of `git rev-parse HEAD` is returned as captured, trailing
/// newline included, so the revision stamp file matches what git printed.
///
/// # Errors
///
/// Returns [`ReleaseError::Git`] when git exits unsuccessfully, and any
/// executor error when git cannot be spawned.
pub fn current_commit(executor: &dyn CommandExecutor, repo: &Utf8Path) -> Result<String> {
    let output = run_query(executor, repo, "rev-parse", &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Returns the current branch name, with surrounding whitespace trimmed.
///
/// # Errors
///
/// Returns [`ReleaseError::Git`] when git exits unsuccessfully, and any
/// executor error when git cannot be spawned.
pub fn current_branch(executor: &dyn CommandExecutor, repo: &Utf8Path) -> Result<String> {
    let output = run_query(
        executor,
        repo,
        "rev-parse --abbrev-ref",
        &["rev-parse", "--abbrev-ref", "HEAD"],
    )?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
}

/// Runs a git query and maps a non-zero exit onto [`ReleaseError::Git`].
fn run_query(
    executor: &dyn CommandExecutor,
    repo: &Utf8Path,
    operation: &'static str,
    args: &[&str],
) -> Result<std::process::Output> {
    let output = executor.run("git", args, Some(repo))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ReleaseError::Git {
            operation,
            code: output.status.code(),
            message: stderr.trim().to_owned(),
        });
    }
    Ok(output)
}
