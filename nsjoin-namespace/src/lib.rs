//! Namespace entry hook for exec-into-container
//!
//! This crate moves a freshly started process into the namespaces of a
//! running target before the rest of the program starts:
//! - IPC namespace
//! - UTS namespace
//! - Network namespace
//! - PID namespace (affects children of the caller)
//! - Mount namespace
//!
//! then runs one shell command and exits.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod config;
pub mod executor;
pub mod hook;
pub mod manager;

pub use config::{NamespaceDescriptor, NamespaceKind};
pub use executor::{CommandRunner, ExitOutcome, SystemRunner};
pub use hook::{CommandOutcomeIgnored, HookDisposition, NamespaceEntryHook, init};
pub use manager::{
    Attempt, AttemptOutcome, AttemptReport, KernelNamespaces, NamespaceInfo, NamespaceJoiner,
    NamespaceOps,
};
