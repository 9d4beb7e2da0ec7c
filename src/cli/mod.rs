//! Command-line interface for divseq.
//!
//! Uses clap for argument parsing; all domain work is delegated to the
//! library's analyzer and scan engine.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;
mod output;

pub use output::{BarSink, Output};

use crate::config::DivseqConfig;

/// Divseq - empirical divisibility testing for Lucas-type sequences
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single recurrence for divisibility properties
    Analyze(commands::analyze::AnalyzeArgs),
    /// Scan parameter ranges for divisibility sequences
    #[command(subcommand)]
    Scan(commands::scan::ScanCommands),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let output = Output::new(self.verbose, self.quiet);
        let config = DivseqConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Analyze(args) => commands::analyze::execute(args, &config, &output),
            Commands::Scan(cmd) => commands::scan::execute(cmd, &config, &output),
        }
    }
}
