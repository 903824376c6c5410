use nsjoin_core::*;
use std::ffi::OsString;

#[test]
fn test_config_without_target_never_resolves() {
    let config = HookConfig::from_lookup(|key| (key == CMD_ENV).then(|| OsString::from("true")));

    assert!(config.target_pid.is_none());
    assert!(config.command.is_some());
    assert!(config.resolve().is_none());
}

#[test]
fn test_config_lookup_is_read_once_per_variable() {
    let mut seen = Vec::new();
    let config = HookConfig::from_lookup(|key| {
        seen.push(key.to_string());
        Some(OsString::from("1"))
    });

    assert_eq!(seen, vec!["paddle_pid", "paddle_cmd"]);
    assert!(config.resolve().is_some());
}

#[test]
fn test_non_utf8_values_pass_through() {
    use std::os::unix::ffi::OsStringExt;

    let raw = OsString::from_vec(vec![b'e', b'c', b'h', b'o', b' ', 0xFE]);
    let expected = raw.clone();
    let config = HookConfig::from_lookup(|key| (key == CMD_ENV).then(|| raw.clone()));

    assert_eq!(config.command.unwrap().as_os_str(), expected.as_os_str());
}

#[test]
fn test_command_spec_display() {
    let cmd = CommandSpec::from_words(&["echo", "hi"]).unwrap();
    assert_eq!(format!("{}", cmd), "echo hi");
}

#[test]
fn test_process_id_current() {
    let pid = ProcessId::current();
    assert!(pid.as_raw() > 0);

    let target = TargetPid::from(pid);
    assert_eq!(target.to_string(), pid.to_string());
}

#[test]
fn test_error_display() {
    let err = Error::InvalidConfig {
        message: "Command cannot be empty".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid configuration: Command cannot be empty");
}
