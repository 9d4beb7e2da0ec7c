use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

use super::OutputFormat;
use crate::cli::{BarSink, Output};
use crate::config::DivseqConfig;
use crate::report;
use crate::scan::{NoProgress, ScanEngine, ScanMode, ScanRange, ScanSummary};

/// Range values are parsed (and rejected) before any enumeration begins.
fn parse_range(s: &str) -> Result<ScanRange, String> {
    ScanRange::from_str(s).map_err(|e| e.to_string())
}

#[derive(Subcommand)]
pub enum ScanCommands {
    /// Scan (P, Q) ranges with fixed initial conditions
    Params(ParamScanArgs),
    /// Scan (x0, x1) ranges with fixed recurrence parameters
    Initial(InitialScanArgs),
    /// Scan the full Cartesian product of all four ranges
    All(FullScanArgs),
}

/// Options shared by every scan subcommand
#[derive(Args)]
pub struct ScanOpts {
    /// Largest index to generate and test (default from config: 20)
    #[arg(short = 'n', long = "max-n")]
    pub max_n: Option<usize>,

    /// Execution mode
    #[arg(long, value_enum)]
    pub mode: Option<ScanMode>,

    /// Maximum number of matches to list in the summary
    #[arg(long, default_value_t = 25)]
    pub limit: usize,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Write the report to a file ("auto" picks a timestamped name)
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ParamScanArgs {
    /// Inclusive P range, e.g. -5..5
    #[arg(long = "p-range", value_parser = parse_range, allow_hyphen_values = true)]
    pub p_range: ScanRange,

    /// Inclusive Q range, e.g. -5..5
    #[arg(long = "q-range", value_parser = parse_range, allow_hyphen_values = true)]
    pub q_range: ScanRange,

    /// Fixed initial term x_0
    #[arg(long, allow_hyphen_values = true)]
    pub x0: i64,

    /// Fixed initial term x_1
    #[arg(long, allow_hyphen_values = true)]
    pub x1: i64,

    #[command(flatten)]
    pub opts: ScanOpts,
}

#[derive(Args)]
pub struct InitialScanArgs {
    /// Fixed recurrence coefficient P
    #[arg(short = 'P', allow_hyphen_values = true)]
    pub p: i64,

    /// Fixed recurrence coefficient Q
    #[arg(short = 'Q', allow_hyphen_values = true)]
    pub q: i64,

    /// Inclusive x_0 range
    #[arg(long = "x0-range", value_parser = parse_range, allow_hyphen_values = true)]
    pub x0_range: ScanRange,

    /// Inclusive x_1 range
    #[arg(long = "x1-range", value_parser = parse_range, allow_hyphen_values = true)]
    pub x1_range: ScanRange,

    #[command(flatten)]
    pub opts: ScanOpts,
}

#[derive(Args)]
pub struct FullScanArgs {
    /// Inclusive P range
    #[arg(long = "p-range", value_parser = parse_range, allow_hyphen_values = true)]
    pub p_range: ScanRange,

    /// Inclusive Q range
    #[arg(long = "q-range", value_parser = parse_range, allow_hyphen_values = true)]
    pub q_range: ScanRange,

    /// Inclusive x_0 range
    #[arg(long = "x0-range", value_parser = parse_range, allow_hyphen_values = true)]
    pub x0_range: ScanRange,

    /// Inclusive x_1 range
    #[arg(long = "x1-range", value_parser = parse_range, allow_hyphen_values = true)]
    pub x1_range: ScanRange,

    #[command(flatten)]
    pub opts: ScanOpts,
}

pub fn execute(command: ScanCommands, config: &DivseqConfig, output: &Output) -> Result<()> {
    match command {
        ScanCommands::Params(args) => {
            let engine = engine_for(&args.opts, config);
            let summary = run_with_progress(&args.opts, output, |sink| {
                engine.scan_parameters(args.p_range, args.q_range, args.x0, args.x1, sink)
            })?;
            finish(&summary, &args.opts, config, output)
        }
        ScanCommands::Initial(args) => {
            let engine = engine_for(&args.opts, config);
            let summary = run_with_progress(&args.opts, output, |sink| {
                engine.scan_initial_conditions(args.p, args.q, args.x0_range, args.x1_range, sink)
            })?;
            finish(&summary, &args.opts, config, output)
        }
        ScanCommands::All(args) => {
            let engine = engine_for(&args.opts, config);
            let summary = run_with_progress(&args.opts, output, |sink| {
                engine.scan_all(args.p_range, args.q_range, args.x0_range, args.x1_range, sink)
            })?;
            finish(&summary, &args.opts, config, output)
        }
    }
}

fn engine_for(opts: &ScanOpts, config: &DivseqConfig) -> ScanEngine {
    ScanEngine::new(config.scan_config(opts.max_n, opts.mode))
}

fn run_with_progress<F>(opts: &ScanOpts, output: &Output, scan: F) -> Result<ScanSummary>
where
    F: FnOnce(&dyn crate::scan::ProgressSink) -> Result<ScanSummary>,
{
    if opts.no_progress || output.is_quiet() {
        scan(&NoProgress)
    } else {
        let sink = BarSink::new(output.progress_bar(0, "scanning"));
        let summary = scan(&sink);
        sink.finish();
        summary
    }
}

fn finish(
    summary: &ScanSummary,
    opts: &ScanOpts,
    config: &DivseqConfig,
    output: &Output,
) -> Result<()> {
    let rendered = match opts.format {
        OutputFormat::Text => report::render_summary(summary, opts.limit),
        OutputFormat::Json => report::summary_to_json(summary)?,
    };
    output.block(&rendered);

    if let Some(path) = &opts.output {
        let extension = match opts.format {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        };
        let path = if path.as_os_str() == "auto" {
            report::default_report_path(&config.report.directory, "scan", extension)
        } else {
            path.clone()
        };
        report::write_report(&path, &rendered)?;
        output.success(&format!("Report written to {}", path.display()));
    }

    Ok(())
}
