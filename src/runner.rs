//! Subprocess execution seam for the pipeline.
//!
//! Every pipeline step shells out to an external tool. The [`CommandRunner`]
//! trait keeps that boundary mockable; [`SystemCommandRunner`] is the real
//! implementation, spawning each command synchronously and waiting for its
//! exit status. No timeout is applied: the pipeline relies on whatever the
//! external tools enforce themselves.

use std::process::{Command, ExitStatus, Stdio};

/// Abstraction for running the pipeline's external commands.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Runs a command to completion and returns its exit status.
    ///
    /// # Errors
    ///
    /// Returns any I/O error encountered while spawning or awaiting the
    /// command (for example when the binary is not on `PATH`).
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<ExitStatus>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandRunner {
    verbose: bool,
}

impl SystemCommandRunner {
    /// Creates a runner. When `verbose` is set, spawned-process output is
    /// inherited by the caller; otherwise it is discarded.
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<ExitStatus> {
        let mut cmd = Command::new(program);
        cmd.args(args);

        if self.verbose {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        cmd.status()
    }
}
