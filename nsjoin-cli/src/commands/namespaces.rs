//! Namespaces command implementation

use anyhow::{Context, Result};
use nsjoin_core::ProcessId;
use nsjoin_namespace::{NamespaceInfo, NamespaceKind};

pub async fn execute(pid: Option<ProcessId>, json: bool) -> Result<()> {
    let target_pid = pid.unwrap_or_else(ProcessId::current);

    let ns_info = NamespaceInfo::for_pid(target_pid)
        .context("Failed to get namespace information")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ns_info)?);
        return Ok(());
    }

    println!("\n🔒 Namespace Information for PID {}", target_pid);
    println!("{:-<60}", "");

    print!("{}", ns_info);

    // Compare with our own namespaces
    match NamespaceInfo::current() {
        Ok(own) => {
            let shared = own.shared_with(&ns_info);
            let separate: Vec<&str> = NamespaceKind::JOIN_ORDER
                .into_iter()
                .filter(|&kind| own.get(kind).is_some() && ns_info.get(kind).is_some())
                .filter(|kind| !shared.contains(kind))
                .map(NamespaceKind::proc_name)
                .collect();

            if shared.len() == NamespaceKind::JOIN_ORDER.len() {
                println!("\n⚠️  Process shares all namespaces with nsjoin");
            } else if separate.is_empty() {
                println!("\n❓ Some namespaces could not be read (try as root)");
            } else {
                println!("\n✅ Separate namespaces: {}", separate.join(", "));
            }
        }
        Err(e) => println!("\n❌ Failed to compare namespaces: {}", e),
    }

    Ok(())
}
