//! nsjoin Core - Foundation types, configuration, and errors
//!
//! This crate provides the values shared by the namespace entry hook and
//! the binary that hosts it.

#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod types;

pub use config::{CMD_ENV, HookConfig, PID_ENV};
pub use error::{Error, Result};
pub use types::{CommandSpec, ProcessId, TargetPid};
