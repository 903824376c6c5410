use crate::cli::Commands;
use anyhow::Result;
use nsjoin_core::HookConfig;
use nsjoin_namespace::NamespaceKind;

pub mod exec;
pub mod namespaces;

/// Dispatch command to appropriate handler, returning the exit code
pub async fn dispatch(command: Commands, hook_config: HookConfig) -> Result<i32> {
    match command {
        Commands::Exec { pid, command } => exec::execute(pid, &command, &hook_config).await,

        Commands::Namespaces { pid, json } => namespaces::execute(pid, json).await.map(|()| 0),

        Commands::Version => {
            print_version();
            Ok(0)
        }
    }
}

fn print_version() {
    println!("🦀 nsjoin");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Edition: Rust 2024");
    println!();
    println!("Hook variables:");
    println!("  • {}  target process ID", nsjoin_core::PID_ENV);
    println!("  • {}  command run through /bin/sh -c", nsjoin_core::CMD_ENV);
    println!();
    println!(
        "Namespaces joined, in order: {}",
        NamespaceKind::JOIN_ORDER.map(NamespaceKind::proc_name).join(", ")
    );
}
