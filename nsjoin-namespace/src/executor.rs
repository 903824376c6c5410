//! Running the configured command after namespace entry
//!
//! This module uses `unsafe` to swap signal dispositions around the wait,
//! the way `system(3)` does.

#![allow(unsafe_code)]

use nix::sys::signal::{SigHandler, Signal, signal};
use nsjoin_core::{CommandSpec, Error, Result};
use std::ffi::OsString;
use std::io;
use std::os::unix::process::CommandExt;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// How a command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exited normally with a status code
    Exited(i32),
    /// Terminated by a signal
    Signaled(i32),
}

impl ExitOutcome {
    /// Shell-style exit code (128 + signal number for signals)
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Exited(code) => code,
            Self::Signaled(signal) => 128 + signal,
        }
    }

    /// Check if the command exited with status 0
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self, Self::Exited(0))
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        match (status.code(), status.signal()) {
            (Some(code), _) => Self::Exited(code),
            (None, Some(signal)) => Self::Signaled(signal),
            // Stopped/continued statuses are not returned by wait-for-exit
            (None, None) => Self::Exited(-1),
        }
    }
}

/// Runs a program with arguments and waits for it
pub trait CommandRunner {
    /// Run `program` with `args`, inheriting stdio, environment and
    /// namespaces, and wait for it to finish
    ///
    /// # Errors
    /// Returns error if the program cannot be spawned or waited for
    fn run(&mut self, program: &Path, args: &[OsString]) -> Result<ExitOutcome>;

    /// Run a command line through the shell
    ///
    /// # Errors
    /// Returns error if the shell cannot be spawned or waited for
    fn run_shell(&mut self, command: &CommandSpec) -> Result<ExitOutcome> {
        let (program, args) = command.shell_invocation();
        self.run(&program, &args)
    }
}

/// [`CommandRunner`] spawning a child process and blocking until it exits
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &Path, args: &[OsString]) -> Result<ExitOutcome> {
        debug!(program = %program.display(), ?args, "Running command");

        // Ignored before the fork so no interrupt lands between spawn and wait
        let guard = InterruptGuard::ignore();
        let restore = guard.saved.clone();

        let mut command = Command::new(program);
        command.args(args);
        // SAFETY: only calls sigaction, which is async-signal-safe, and
        // iterates a vector allocated before the fork
        unsafe {
            command.pre_exec(move || {
                for &(sig, previous) in &restore {
                    signal(sig, previous).map_err(io::Error::from)?;
                }
                Ok(())
            });
        }

        let mut child = command.spawn().map_err(|e| Error::Command {
            message: format!("Failed to run {}: {e}", program.display()),
        })?;
        let status = child.wait()?;
        drop(guard);

        let outcome = ExitOutcome::from(status);
        debug!(code = outcome.code(), "Command finished");

        Ok(outcome)
    }
}

/// Ignores SIGINT and SIGQUIT in the waiting process until dropped
///
/// The child gets the saved dispositions back before exec, so it still
/// receives terminal interrupts itself.
struct InterruptGuard {
    saved: Vec<(Signal, SigHandler)>,
}

impl InterruptGuard {
    fn ignore() -> Self {
        let saved = [Signal::SIGINT, Signal::SIGQUIT]
            .into_iter()
            .filter_map(|sig| {
                // SAFETY: SIG_IGN installs no handler code
                match unsafe { signal(sig, SigHandler::SigIgn) } {
                    Ok(previous) => Some((sig, previous)),
                    Err(e) => {
                        debug!(signal = ?sig, error = %e, "Could not ignore signal");
                        None
                    }
                }
            })
            .collect();

        Self { saved }
    }
}

impl Drop for InterruptGuard {
    fn drop(&mut self) {
        for &(sig, previous) in &self.saved {
            // SAFETY: restores the disposition that was installed before
            let _ = unsafe { signal(sig, previous) };
        }
    }
}
