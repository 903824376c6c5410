use nsjoin_core::{CommandSpec, HookConfig, ProcessId, TargetPid};
use nsjoin_namespace::*;

#[test]
fn test_nonexistent_pid_fails_every_open() {
    let mut joiner = NamespaceJoiner::kernel();
    let report = joiner.enter(&TargetPid::new("999999999"));

    assert_eq!(report.len(), 5);
    assert!(report.all_failed());
    for attempt in report.attempts() {
        assert!(matches!(attempt.outcome, AttemptOutcome::OpenFailed(_)));
    }
}

#[test]
fn test_garbage_pid_fails_every_open() {
    let mut joiner = NamespaceJoiner::kernel();
    let report = joiner.enter(&TargetPid::new("not-a-pid"));

    assert_eq!(report.len(), 5);
    assert!(report.all_failed());
}

#[test]
fn test_own_pid_opens_every_handle() {
    // Joining our own namespaces changes nothing; without privileges the
    // join itself is refused, but every handle must open
    let mut joiner = NamespaceJoiner::kernel();
    let report = joiner.enter(&TargetPid::from(ProcessId::current()));

    assert_eq!(report.len(), 5);
    for attempt in report.attempts() {
        assert!(
            !matches!(attempt.outcome, AttemptOutcome::OpenFailed(_)),
            "{} should open: {:?}",
            attempt.kind,
            attempt.outcome
        );
    }
}

#[test]
fn test_hook_with_missing_target_runs_command_once() {
    let mut hook = NamespaceEntryHook::kernel();
    let config = HookConfig::new(TargetPid::new("999999999"), CommandSpec::new("exit 3"));

    let HookDisposition::Terminate(outcome) = hook.run(config) else {
        panic!("hook should terminate");
    };

    assert!(outcome.report.all_failed());
    assert!(matches!(outcome.discarded, Ok(ExitOutcome::Exited(3))));
    assert_eq!(outcome.exit_code(), 0);
}

#[test]
fn test_hook_without_config_continues() {
    let mut hook = NamespaceEntryHook::kernel();
    let disposition = hook.run(HookConfig::default());

    assert_eq!(disposition.into_continue(), Some(HookConfig::default()));
}

#[test]
fn test_namespace_info_for_missing_pid() {
    assert!(NamespaceInfo::for_pid(ProcessId::from_raw(999_999_999)).is_err());
}

#[test]
fn test_namespace_info_json() {
    let info = NamespaceInfo::current().unwrap();
    let json = serde_json::to_value(&info).unwrap();

    assert!(json["process"].is_number());
    assert!(json["mnt"].as_str().unwrap().starts_with("mnt:["));
}
