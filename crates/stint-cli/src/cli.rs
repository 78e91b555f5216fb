//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Terminal time tracker.
///
/// Name a task, start and stop the timer, and save the tracked time into a
/// log of entries for the current session.
#[derive(Debug, Parser)]
#[command(name = "stint", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the interactive tracker (the default).
    Run {
        /// Initial task name.
        #[arg(long)]
        task: Option<String>,
    },

    /// Print the effective configuration.
    Config,
}
