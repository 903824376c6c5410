//! nsjoin CLI
//!
//! Joins the namespaces of a running process and runs a command there.

use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::Cli;

fn main() {
    // Writes to stderr so stdout stays with the executed command
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Must run while the process is still single-threaded; exits here
    // when paddle_pid and paddle_cmd are both set
    let hook_config = nsjoin_namespace::init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Error: Failed to start async runtime: {}", e);
            process::exit(1);
        }
    };

    match runtime.block_on(commands::dispatch(cli.command, hook_config)) {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            process::exit(1);
        }
    }
}
