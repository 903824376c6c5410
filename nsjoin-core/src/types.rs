//! Core type definitions with strong typing

use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::{Error, Result};

/// Shell used to interpret a [`CommandSpec`]
pub const SHELL: &str = "/bin/sh";

/// Identifier of the process whose namespaces are joined
///
/// The token is opaque: it is not checked to be numeric. A bad value
/// simply makes every `/proc/<pid>/ns/*` lookup fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TargetPid(OsString);

impl TargetPid {
    /// Wrap a raw token
    #[must_use]
    pub fn new(pid: impl Into<OsString>) -> Self {
        Self(pid.into())
    }

    /// Get the raw token
    #[must_use]
    pub fn as_os_str(&self) -> &OsStr {
        &self.0
    }
}

impl fmt::Display for TargetPid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl From<ProcessId> for TargetPid {
    fn from(pid: ProcessId) -> Self {
        Self(pid.to_string().into())
    }
}

/// Command line handed to the shell after namespace entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CommandSpec(OsString);

impl CommandSpec {
    /// Wrap a raw command line
    #[must_use]
    pub fn new(command: impl Into<OsString>) -> Self {
        Self(command.into())
    }

    /// Build a command line from separate words, joined by single spaces
    ///
    /// # Errors
    /// Returns error if no words are given
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        if words.is_empty() {
            return Err(Error::InvalidConfig {
                message: "Command cannot be empty".to_string(),
            });
        }

        let line = words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Self(line.into()))
    }

    /// Get the raw command line
    #[must_use]
    pub fn as_os_str(&self) -> &OsStr {
        &self.0
    }

    /// Program and arguments that run this command through the shell
    #[must_use]
    pub fn shell_invocation(&self) -> (PathBuf, Vec<OsString>) {
        (
            PathBuf::from(SHELL),
            vec![OsString::from("-c"), self.0.clone()],
        )
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

/// Process identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ProcessId(i32);

impl ProcessId {
    /// Create from raw PID
    #[must_use]
    pub const fn from_raw(pid: i32) -> Self {
        Self(pid)
    }

    /// Get the current process ID
    #[must_use]
    pub fn current() -> Self {
        nix::unistd::getpid().into()
    }

    /// Get raw PID value
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProcessId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<i32>() {
            Ok(pid) if pid > 0 => Ok(Self(pid)),
            _ => Err(Error::InvalidConfig {
                message: format!("Invalid process ID: {s:?}"),
            }),
        }
    }
}

impl From<nix::unistd::Pid> for ProcessId {
    fn from(pid: nix::unistd::Pid) -> Self {
        Self(pid.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_pid_is_opaque() {
        let pid = TargetPid::new("not-a-number");
        assert_eq!(pid.as_os_str(), "not-a-number");
        assert_eq!(pid.to_string(), "not-a-number");
    }

    #[test]
    fn test_target_pid_from_process_id() {
        let pid = TargetPid::from(ProcessId::from_raw(1234));
        assert_eq!(pid.as_os_str(), "1234");
    }

    #[test]
    fn test_command_from_words() {
        let cmd = CommandSpec::from_words(&["echo", "hello", "world"]).unwrap();
        assert_eq!(cmd.as_os_str(), "echo hello world");

        let empty: [&str; 0] = [];
        assert!(CommandSpec::from_words(&empty).is_err());
    }

    #[test]
    fn test_shell_invocation() {
        let cmd = CommandSpec::new("echo hi | tr a-z A-Z");
        let (program, args) = cmd.shell_invocation();

        assert_eq!(program, PathBuf::from("/bin/sh"));
        assert_eq!(args, vec![OsString::from("-c"), OsString::from("echo hi | tr a-z A-Z")]);
    }

    #[test]
    fn test_process_id() {
        let pid = ProcessId::from_raw(123);
        assert_eq!(pid.as_raw(), 123);
        assert_eq!(pid.to_string(), "123");
    }

    #[test]
    fn test_process_id_parse() {
        assert_eq!("42".parse::<ProcessId>().unwrap(), ProcessId::from_raw(42));
        assert!("0".parse::<ProcessId>().is_err());
        assert!("-1".parse::<ProcessId>().is_err());
        assert!("abc".parse::<ProcessId>().is_err());
    }

    #[test]
    fn test_process_id_serde() {
        let pid = ProcessId::from_raw(77);
        let json = serde_json::to_string(&pid).unwrap();
        assert_eq!(json, "77");
    }
}
