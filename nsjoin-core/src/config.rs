//! Hook configuration read from the process environment

use std::ffi::OsString;

use crate::types::{CommandSpec, TargetPid};

/// Variable carrying the PID whose namespaces are joined
pub const PID_ENV: &str = "paddle_pid";

/// Variable carrying the command line run after namespace entry
pub const CMD_ENV: &str = "paddle_cmd";

/// Configuration of the namespace entry hook
///
/// Built once at startup and passed by value; nothing re-reads the
/// environment afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookConfig {
    /// Target process, from `paddle_pid`
    pub target_pid: Option<TargetPid>,

    /// Command line, from `paddle_cmd`
    pub command: Option<CommandSpec>,
}

impl HookConfig {
    /// Read the configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Read the configuration through an arbitrary variable lookup
    ///
    /// A variable set to the empty string counts as present.
    #[must_use]
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<OsString>,
    {
        Self {
            target_pid: lookup(PID_ENV).map(TargetPid::new),
            command: lookup(CMD_ENV).map(CommandSpec::new),
        }
    }

    /// Create a configuration for a known target and command
    #[must_use]
    pub const fn new(target_pid: TargetPid, command: CommandSpec) -> Self {
        Self {
            target_pid: Some(target_pid),
            command: Some(command),
        }
    }

    /// Both values, or nothing when either is missing
    #[must_use]
    pub fn resolve(self) -> Option<(TargetPid, CommandSpec)> {
        let Some(target_pid) = self.target_pid else {
            tracing::trace!("{PID_ENV} not set, skipping namespace entry");
            return None;
        };

        let Some(command) = self.command else {
            tracing::trace!(pid = %target_pid, "{CMD_ENV} not set, skipping namespace entry");
            return None;
        };

        Some((target_pid, command))
    }

    /// Environment pairs that make a child process run the hook
    #[must_use]
    pub fn to_env(&self) -> Vec<(&'static str, OsString)> {
        let mut vars = Vec::with_capacity(2);

        if let Some(ref pid) = self.target_pid {
            vars.push((PID_ENV, pid.as_os_str().to_os_string()));
        }
        if let Some(ref command) = self.command {
            vars.push((CMD_ENV, command.as_os_str().to_os_string()));
        }

        vars
    }
}
