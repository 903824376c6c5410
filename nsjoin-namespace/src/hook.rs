//! Namespace entry hook
//!
//! The hosting program calls [`init`] first thing in `main`, before it
//! starts any thread. When both `paddle_pid` and `paddle_cmd` are set the
//! hook joins the target's namespaces, runs the command through the shell
//! and exits the process with status 0. Otherwise it returns and startup
//! continues normally.

use nsjoin_core::{HookConfig, Result};
use std::io::Write;

use crate::executor::{CommandRunner, ExitOutcome, SystemRunner};
use crate::manager::{AttemptReport, KernelNamespaces, NamespaceJoiner, NamespaceOps};

/// Terminal state of the hook once a command has run
///
/// The command's own status is not propagated: the process
/// always exits with [`CommandOutcomeIgnored::EXIT_CODE`].
#[derive(Debug)]
pub struct CommandOutcomeIgnored {
    /// Per-category namespace entry results
    pub report: AttemptReport,
    /// What the command did, or why it could not run
    pub discarded: Result<ExitOutcome>,
}

impl CommandOutcomeIgnored {
    /// Exit status of the process, whatever the command did
    pub const EXIT_CODE: i32 = 0;

    /// Exit status of the process
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        Self::EXIT_CODE
    }
}

/// What the hosting program does after the hook ran
#[derive(Debug)]
pub enum HookDisposition {
    /// Configuration incomplete: continue normal startup
    Continue(HookConfig),
    /// A command ran: the process must exit
    Terminate(CommandOutcomeIgnored),
}

impl HookDisposition {
    /// The configuration to continue startup with, if any
    #[must_use]
    pub fn into_continue(self) -> Option<HookConfig> {
        match self {
            Self::Continue(config) => Some(config),
            Self::Terminate(_) => None,
        }
    }
}

/// Joins a target's namespaces and runs one command
#[derive(Debug, Default)]
pub struct NamespaceEntryHook<O = KernelNamespaces, R = SystemRunner> {
    joiner: NamespaceJoiner<O>,
    runner: R,
}

impl NamespaceEntryHook<KernelNamespaces, SystemRunner> {
    /// Hook using the real syscalls and `/bin/sh`
    #[must_use]
    pub const fn kernel() -> Self {
        Self {
            joiner: NamespaceJoiner::kernel(),
            runner: SystemRunner,
        }
    }
}

impl<O: NamespaceOps, R: CommandRunner> NamespaceEntryHook<O, R> {
    /// Create a hook over the given operations and runner
    #[must_use]
    pub const fn new(ops: O, runner: R) -> Self {
        Self {
            joiner: NamespaceJoiner::new(ops),
            runner,
        }
    }

    /// Get the namespace operations
    #[must_use]
    pub const fn ops(&self) -> &O {
        self.joiner.ops()
    }

    /// Get the command runner
    #[must_use]
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Run the hook for a configuration
    ///
    /// Nothing is touched unless both the target and the command are set.
    pub fn run(&mut self, config: HookConfig) -> HookDisposition {
        let Some((pid, command)) = config.clone().resolve() else {
            return HookDisposition::Continue(config);
        };

        let report = self.joiner.enter(&pid);
        if report.all_failed() {
            tracing::debug!(pid = %pid, "No namespace joined, running in caller namespaces");
        }

        let discarded = self.runner.run_shell(&command);
        match &discarded {
            Ok(outcome) => tracing::debug!(command = %command, code = outcome.code(), "Command finished"),
            Err(e) => tracing::debug!(command = %command, error = %e, "Command failed"),
        }

        HookDisposition::Terminate(CommandOutcomeIgnored { report, discarded })
    }
}

/// Run the hook against the process environment
///
/// Must be called before any thread is started: joining a mount namespace
/// fails in a multi-threaded process. Returns the configuration it read
/// when startup should continue; otherwise the process exits here.
#[must_use]
pub fn init() -> HookConfig {
    match NamespaceEntryHook::kernel().run(HookConfig::from_env()) {
        HookDisposition::Continue(config) => config,
        HookDisposition::Terminate(outcome) => terminate(&outcome),
    }
}

fn terminate(outcome: &CommandOutcomeIgnored) -> ! {
    // Flush is best effort before exit
    let _ = std::io::stdout().flush();
    std::process::exit(outcome.exit_code())
}
