//! CLI argument definitions

use clap::{Parser, Subcommand};
use nsjoin_core::ProcessId;

#[derive(Parser)]
#[command(name = "nsjoin")]
#[command(about = "Run commands inside the namespaces of a running process", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a command inside the namespaces of a running process
    Exec {
        /// Target process ID
        #[arg(short, long)]
        pid: ProcessId,

        /// Command to run (handed to /bin/sh -c)
        #[arg(last = true, required = true)]
        command: Vec<String>,
    },

    /// Show namespace information
    Namespaces {
        /// Process ID (default: current process)
        #[arg(short, long)]
        pid: Option<ProcessId>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}
