//! Synchronous execution of external tools.
//!
//! Every external tool the release process touches (cargo, git, npm, bash,
//! hdiutil) runs through [`CommandExecutor`], which blocks until the tool
//! exits and returns its captured output. Tests substitute a scripted stub
//! so no real tool is ever invoked.

use crate::error::{ReleaseError, Result};
use camino::Utf8Path;
use std::process::{Command, Output};

/// Abstraction for running external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// When `working_dir` is given, the command runs in that directory;
    /// otherwise it inherits the process working directory. A non-zero
    /// exit is not an error at this level — callers inspect the status.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::ToolNotFound`] when the program cannot be
    /// found, and any other I/O error encountered while spawning it.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use meters_release::exec::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run("cargo", &["--version"], None)?;
    /// assert!(output.status.success());
    /// # Ok::<(), meters_release::error::ReleaseError>(())
    /// ```
    fn run<'a>(
        &self,
        program: &str,
        args: &[&'a str],
        working_dir: Option<&'a Utf8Path>,
    ) -> Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run<'a>(
        &self,
        program: &str,
        args: &[&'a str],
        working_dir: Option<&'a Utf8Path>,
    ) -> Result<Output> {
        log::debug!("running {program} {}", args.join(" "));
        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = working_dir {
            command.current_dir(dir.as_std_path());
        }
        command.output().map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                ReleaseError::ToolNotFound {
                    program: program.to_owned(),
                }
            } else {
                ReleaseError::Io(err)
            }
        })
    }
}

/// Checks a captured output for success, surfacing diagnostics on failure.
///
/// On failure the returned error carries the program name, its exit code
/// (when it exited normally), and the captured stderr so the process can
/// report and propagate the failure unchanged.
///
/// # Errors
///
/// Returns [`ReleaseError::CommandFailed`] when the status is non-zero.
pub fn ensure_success(program: &str, output: Output) -> Result<Output> {
    if output.status.success() {
        log::trace!("{program} succeeded");
        return Ok(output);
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(ReleaseError::CommandFailed {
        program: program.to_owned(),
        code: output.status.code(),
        stderr: stderr.trim().to_owned(),
    })
}
