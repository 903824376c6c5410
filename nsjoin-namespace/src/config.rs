//! Namespace categories joined by the hook

use nsjoin_core::TargetPid;
use serde::Serialize;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

/// Namespace category that can be joined through `/proc/<pid>/ns`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceKind {
    /// IPC namespace
    Ipc,
    /// UTS namespace (hostname and domain name)
    Uts,
    /// Network namespace
    Net,
    /// PID namespace
    Pid,
    /// Mount namespace
    Mnt,
}

impl NamespaceKind {
    /// Order in which the hook joins namespaces
    ///
    /// Mount stays last: after it is joined, `/proc` may be the target's.
    pub const JOIN_ORDER: [Self; 5] = [Self::Ipc, Self::Uts, Self::Net, Self::Pid, Self::Mnt];

    /// Entry name under `/proc/<pid>/ns`
    #[must_use]
    pub const fn proc_name(self) -> &'static str {
        match self {
            Self::Ipc => "ipc",
            Self::Uts => "uts",
            Self::Net => "net",
            Self::Pid => "pid",
            Self::Mnt => "mnt",
        }
    }
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.proc_name())
    }
}

/// A namespace category together with the handle path for one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDescriptor {
    /// Namespace category
    pub kind: NamespaceKind,

    /// Path of the namespace handle
    pub path: PathBuf,
}

impl NamespaceDescriptor {
    /// Descriptor for `/proc/<pid>/ns/<kind>`
    ///
    /// The PID token is spliced in verbatim, never normalised.
    #[must_use]
    pub fn new(pid: &TargetPid, kind: NamespaceKind) -> Self {
        let mut path = OsString::from("/proc/");
        path.push(pid.as_os_str());
        path.push("/ns/");
        path.push(kind.proc_name());

        Self {
            kind,
            path: PathBuf::from(path),
        }
    }

    /// Descriptors for every category, in join order
    #[must_use]
    pub fn for_target(pid: &TargetPid) -> Vec<Self> {
        NamespaceKind::JOIN_ORDER
            .iter()
            .map(|&kind| Self::new(pid, kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_order() {
        let names: Vec<_> = NamespaceKind::JOIN_ORDER
            .iter()
            .map(|k| k.proc_name())
            .collect();

        assert_eq!(names, vec!["ipc", "uts", "net", "pid", "mnt"]);
    }

    #[test]
    fn test_descriptor_paths() {
        let pid = TargetPid::new("1234");
        let paths: Vec<_> = NamespaceDescriptor::for_target(&pid)
            .into_iter()
            .map(|d| d.path)
            .collect();

        assert_eq!(
            paths,
            vec![
                PathBuf::from("/proc/1234/ns/ipc"),
                PathBuf::from("/proc/1234/ns/uts"),
                PathBuf::from("/proc/1234/ns/net"),
                PathBuf::from("/proc/1234/ns/pid"),
                PathBuf::from("/proc/1234/ns/mnt"),
            ]
        );
    }

    #[test]
    fn test_descriptor_keeps_token_verbatim() {
        let desc = NamespaceDescriptor::new(&TargetPid::new("/self"), NamespaceKind::Uts);
        assert_eq!(desc.path.as_os_str(), "/proc//self/ns/uts");

        let desc = NamespaceDescriptor::new(&TargetPid::new(""), NamespaceKind::Ipc);
        assert_eq!(desc.path.as_os_str(), "/proc//ns/ipc");
    }

    #[test]
    fn test_kind_display_and_serde() {
        assert_eq!(NamespaceKind::Pid.to_string(), "pid");
        assert_eq!(serde_json::to_string(&NamespaceKind::Mnt).unwrap(), "\"mnt\"");
    }
}
