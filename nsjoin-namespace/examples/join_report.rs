//! Join the namespaces of a process and print what happened
//!
//! Run with: cargo run --example join_report -- <pid>
//! Run as root: sudo cargo run --example join_report -- <pid>

use nsjoin_core::{ProcessId, TargetPid};
use nsjoin_namespace::{AttemptOutcome, NamespaceInfo, NamespaceJoiner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let pid: ProcessId = std::env::args()
        .nth(1)
        .ok_or("usage: join_report <pid>")?
        .parse()?;

    println!("🔒 Joining namespaces of PID {pid}\n");

    let target = NamespaceInfo::for_pid(pid)?;
    let before = NamespaceInfo::current()?;
    println!("📊 Shared before: {:?}", before.shared_with(&target));

    // Single-threaded here, so the mount namespace can be joined too
    let report = NamespaceJoiner::kernel().enter(&TargetPid::from(pid));

    for attempt in report.attempts() {
        match attempt.outcome {
            AttemptOutcome::Success => println!("  ✅ {:<4} joined", attempt.kind),
            AttemptOutcome::OpenFailed(errno) => {
                println!("  ❌ {:<4} open failed: {errno}", attempt.kind);
            }
            AttemptOutcome::JoinFailed(errno) => {
                println!("  ⚠️  {:<4} setns failed: {errno}", attempt.kind);
            }
        }
    }

    if report.all_failed() {
        println!("\n💡 Nothing joined. Try again as root");
    }

    Ok(())
}
