//! Shared test utilities for the release packaging crate.

use crate::error::Result;
use crate::exec::CommandExecutor;
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::process::{ExitStatus, Output};

/// Creates an `ExitStatus` from an exit code (Unix implementation).
#[cfg(unix)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;

    ExitStatus::from_raw(code << 8)
}

/// Creates an `ExitStatus` from an exit code (Windows implementation).
#[cfg(windows)]
#[must_use]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;

    ExitStatus::from_raw(code as u32)
}

/// Creates a successful command `Output` with empty stdout and stderr.
#[must_use]
pub fn success_output() -> Output {
    Output {
        status: exit_status(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

/// Creates a successful command `Output` carrying the given stdout.
#[must_use]
pub fn output_with_stdout(stdout: &str) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    }
}

/// Creates a failed command `Output` (exit code 1) with the given stderr.
#[must_use]
pub fn failure_output(stderr: &str) -> Output {
    failure_output_with_code(1, stderr)
}

/// Creates a failed command `Output` with a specific exit code and stderr.
#[must_use]
pub fn failure_output_with_code(code: i32, stderr: &str) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    }
}

/// Converts borrowed argument lists into the owned form `ExpectedCall` holds.
#[must_use]
pub fn string_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| (*arg).to_owned()).collect()
}

/// Represents an expected command invocation for testing.
#[derive(Debug)]
pub struct ExpectedCall {
    /// The program to execute (e.g., "cargo").
    pub program: &'static str,
    /// The arguments to pass to the program.
    pub args: Vec<String>,
    /// The working directory the call must use, if any.
    pub working_dir: Option<Utf8PathBuf>,
    /// The result to return when this command is invoked.
    pub result: Result<Output>,
}

/// A stub implementation of `CommandExecutor` for testing.
///
/// Holds an ordered script of expected invocations and returns the
/// predefined result for each, asserting that the program, arguments, and
/// working directory match. Release logic under test therefore never
/// touches a real tool.
#[derive(Debug)]
pub struct StubExecutor {
    expected: RefCell<VecDeque<ExpectedCall>>,
}

impl StubExecutor {
    /// Creates a new `StubExecutor` with the given expected calls.
    #[must_use]
    pub fn new(expected: Vec<ExpectedCall>) -> Self {
        Self {
            expected: RefCell::new(expected.into()),
        }
    }

    /// Asserts that all expected command invocations have been consumed.
    ///
    /// # Panics
    ///
    /// Panics if there are remaining expected calls that were not invoked.
    pub fn assert_finished(&self) {
        assert!(
            self.expected.borrow().is_empty(),
            "expected no further command invocations"
        );
    }
}

impl CommandExecutor for StubExecutor {
    fn run(&self, program: &str, args: &[&str], working_dir: Option<&Utf8Path>) -> Result<Output> {
        let mut expected = self.expected.borrow_mut();
        let call = expected.pop_front().expect("unexpected command invocation");

        assert_eq!(call.program, program);
        assert_eq!(call.args, args);
        assert_eq!(call.working_dir.as_deref(), working_dir);

        call.result
    }
}
