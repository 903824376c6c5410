//! Joining the namespaces of a running process

use nix::errno::Errno;
use nix::sched::{CloneFlags, setns};
use nsjoin_core::{Error, ProcessId, Result, TargetPid};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::{NamespaceDescriptor, NamespaceKind};

/// Low-level operations used to enter a namespace
///
/// Every handle returned by `open` is handed back to `close` exactly once.
pub trait NamespaceOps {
    /// Open namespace handle
    type Handle;

    /// Open a namespace handle read-only
    fn open(&mut self, path: &Path) -> std::io::Result<Self::Handle>;

    /// Move the calling process into the namespace behind `handle`
    fn join(&mut self, handle: &Self::Handle) -> nix::Result<()>;

    /// Release a handle
    fn close(&mut self, handle: Self::Handle);
}

/// [`NamespaceOps`] backed by `open(2)`, `setns(2)` and `close(2)`
#[derive(Debug, Default, Clone, Copy)]
pub struct KernelNamespaces;

impl NamespaceOps for KernelNamespaces {
    type Handle = File;

    fn open(&mut self, path: &Path) -> std::io::Result<File> {
        File::open(path)
    }

    fn join(&mut self, handle: &File) -> nix::Result<()> {
        // No type restriction: join whatever namespace the handle refers to
        setns(handle, CloneFlags::empty())
    }

    fn close(&mut self, handle: File) {
        drop(handle);
    }
}

/// Result of one namespace entry attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The namespace was joined
    Success,
    /// The handle could not be opened
    OpenFailed(Errno),
    /// The handle was opened but `setns` failed
    JoinFailed(Errno),
}

impl AttemptOutcome {
    /// Check if the namespace was joined
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

/// One entry of an [`AttemptReport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Namespace category
    pub kind: NamespaceKind,
    /// Handle path that was tried
    pub path: PathBuf,
    /// What happened
    pub outcome: AttemptOutcome,
}

/// Per-category outcome of a namespace entry sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttemptReport {
    attempts: Vec<Attempt>,
}

impl AttemptReport {
    /// All attempts, in the order they were made
    #[must_use]
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Number of attempts made
    #[must_use]
    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    /// Check if no attempt was made
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Outcome for a given category
    #[must_use]
    pub fn outcome(&self, kind: NamespaceKind) -> Option<AttemptOutcome> {
        self.attempts
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.outcome)
    }

    /// Categories that were joined
    #[must_use]
    pub fn joined(&self) -> Vec<NamespaceKind> {
        self.attempts
            .iter()
            .filter(|a| a.outcome.is_success())
            .map(|a| a.kind)
            .collect()
    }

    /// Check if every attempt failed
    ///
    /// When this holds the command runs in the caller's own namespaces.
    #[must_use]
    pub fn all_failed(&self) -> bool {
        self.attempts.iter().all(|a| !a.outcome.is_success())
    }
}

/// Best-effort entry into the namespaces of a target process
#[derive(Debug, Default)]
pub struct NamespaceJoiner<O = KernelNamespaces> {
    ops: O,
}

impl NamespaceJoiner<KernelNamespaces> {
    /// Create a joiner using the real syscalls
    #[must_use]
    pub const fn kernel() -> Self {
        Self {
            ops: KernelNamespaces,
        }
    }
}

impl<O: NamespaceOps> NamespaceJoiner<O> {
    /// Create a joiner over the given operations
    #[must_use]
    pub const fn new(ops: O) -> Self {
        Self { ops }
    }

    /// Get the underlying operations
    #[must_use]
    pub const fn ops(&self) -> &O {
        &self.ops
    }

    /// Try to join every namespace category of `pid`, in join order
    ///
    /// Failures never stop the sequence: every category is attempted and
    /// every opened handle is closed before the next one is opened.
    pub fn enter(&mut self, pid: &TargetPid) -> AttemptReport {
        let attempts = NamespaceDescriptor::for_target(pid)
            .into_iter()
            .map(|desc| {
                let outcome = self.attempt(&desc);
                Attempt {
                    kind: desc.kind,
                    path: desc.path,
                    outcome,
                }
            })
            .collect::<Vec<_>>();

        let report = AttemptReport { attempts };

        tracing::debug!(
            pid = %pid,
            joined = ?report.joined(),
            "Namespace entry finished"
        );

        report
    }

    fn attempt(&mut self, desc: &NamespaceDescriptor) -> AttemptOutcome {
        let handle = match self.ops.open(&desc.path) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::debug!(
                    namespace = %desc.kind,
                    path = %desc.path.display(),
                    error = %e,
                    "Failed to open namespace"
                );
                return AttemptOutcome::OpenFailed(
                    e.raw_os_error().map_or(Errno::UnknownErrno, Errno::from_raw),
                );
            }
        };

        let outcome = match self.ops.join(&handle) {
            Ok(()) => {
                tracing::debug!(namespace = %desc.kind, "Joined namespace");
                AttemptOutcome::Success
            }
            Err(errno) => {
                tracing::debug!(
                    namespace = %desc.kind,
                    error = %errno,
                    "setns failed"
                );
                AttemptOutcome::JoinFailed(errno)
            }
        };

        self.ops.close(handle);
        outcome
    }
}

/// Namespace identifiers of one process, as read from `/proc/<pid>/ns`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceInfo {
    /// Process the identifiers belong to
    pub process: Option<ProcessId>,
    /// IPC namespace ID
    pub ipc: Option<String>,
    /// UTS namespace ID
    pub uts: Option<String>,
    /// Network namespace ID
    pub net: Option<String>,
    /// PID namespace ID
    pub pid: Option<String>,
    /// Mount namespace ID
    pub mnt: Option<String>,
}

impl NamespaceInfo {
    /// Get namespace IDs for the calling process
    ///
    /// # Errors
    /// Returns error if `/proc/self/ns` cannot be read
    pub fn current() -> Result<Self> {
        Self::for_pid(ProcessId::current())
    }

    /// Get namespace IDs for a specific PID
    ///
    /// Links that cannot be read are left empty.
    ///
    /// # Errors
    /// Returns error if the process has no `/proc/<pid>/ns` directory
    pub fn for_pid(pid: ProcessId) -> Result<Self> {
        let target = TargetPid::from(pid);
        let base = format!("/proc/{pid}/ns");

        if !Path::new(&base).is_dir() {
            return Err(Error::Namespace {
                message: format!("No namespace information for PID {pid}"),
            });
        }

        let read_ns = |kind: NamespaceKind| -> Option<String> {
            let desc = NamespaceDescriptor::new(&target, kind);
            match std::fs::read_link(&desc.path) {
                Ok(link) => Some(link.to_string_lossy().into_owned()),
                Err(e) => {
                    tracing::debug!(pid = %pid, namespace = %kind, error = %e, "Unreadable namespace link");
                    None
                }
            }
        };

        Ok(Self {
            process: Some(pid),
            ipc: read_ns(NamespaceKind::Ipc),
            uts: read_ns(NamespaceKind::Uts),
            net: read_ns(NamespaceKind::Net),
            pid: read_ns(NamespaceKind::Pid),
            mnt: read_ns(NamespaceKind::Mnt),
        })
    }

    /// Namespace ID for a category
    #[must_use]
    pub fn get(&self, kind: NamespaceKind) -> Option<&str> {
        match kind {
            NamespaceKind::Ipc => self.ipc.as_deref(),
            NamespaceKind::Uts => self.uts.as_deref(),
            NamespaceKind::Net => self.net.as_deref(),
            NamespaceKind::Pid => self.pid.as_deref(),
            NamespaceKind::Mnt => self.mnt.as_deref(),
        }
    }

    /// Categories where both processes are known to share a namespace
    #[must_use]
    pub fn shared_with(&self, other: &Self) -> Vec<NamespaceKind> {
        NamespaceKind::JOIN_ORDER
            .into_iter()
            .filter(|&kind| matches!((self.get(kind), other.get(kind)), (Some(a), Some(b)) if a == b))
            .collect()
    }
}

impl std::fmt::Display for NamespaceInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Namespace Info:")?;
        for kind in NamespaceKind::JOIN_ORDER {
            if let Some(id) = self.get(kind) {
                writeln!(f, "  {:<7} {id}", format!("{}:", kind.proc_name().to_uppercase()))?;
            }
        }
        Ok(())
    }
}
