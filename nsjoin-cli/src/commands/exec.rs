//! Exec command implementation
//!
//! Re-executes this binary with the hook variables set, so that the
//! namespace switch happens in a fresh single-threaded process.

use anyhow::{Context, Result};
use nsjoin_core::{CMD_ENV, CommandSpec, HookConfig, PID_ENV, ProcessId, TargetPid};
use nsjoin_namespace::ExitOutcome;
use tracing::{debug, info, warn};

const SELF_EXE: &str = "/proc/self/exe";

pub async fn execute(pid: ProcessId, command: &[String], hook_config: &HookConfig) -> Result<i32> {
    // The hook saw a target but no command and let startup continue.
    // An empty target here is treated as unset.
    if let Some(target) = hook_config
        .target_pid
        .as_ref()
        .filter(|target| !target.as_os_str().is_empty())
    {
        warn!(pid = %target, "{PID_ENV} is set but {CMD_ENV} is not, nothing to run");
        return Ok(0);
    }

    let spec = CommandSpec::from_words(command).context("Invalid command")?;
    let child_config = HookConfig::new(TargetPid::from(pid), spec);

    info!(pid = %pid, command = %command.join(" "), "Executing in target namespaces");

    let status = tokio::process::Command::new(SELF_EXE)
        .arg("exec")
        .arg("--pid")
        .arg(pid.to_string())
        .arg("--")
        .args(command)
        .envs(child_config.to_env())
        .status()
        .await
        .context("Failed to re-execute nsjoin")?;

    let outcome = ExitOutcome::from(status);
    debug!(code = outcome.code(), "Exec child finished");

    Ok(outcome.code())
}
