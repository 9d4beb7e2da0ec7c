use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::OutputFormat;
use crate::analyzer::analyze_sequence;
use crate::cli::Output;
use crate::config::DivseqConfig;
use crate::report;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Recurrence coefficient P in x_n = P*x_(n-1) - Q*x_(n-2)
    #[arg(short = 'P', allow_hyphen_values = true)]
    pub p: i64,

    /// Recurrence coefficient Q
    #[arg(short = 'Q', allow_hyphen_values = true)]
    pub q: i64,

    /// Initial term x_0
    #[arg(long, allow_hyphen_values = true)]
    pub x0: i64,

    /// Initial term x_1
    #[arg(long, allow_hyphen_values = true)]
    pub x1: i64,

    /// Largest index to generate and test (default from config: 20)
    #[arg(short = 'n', long = "max-n")]
    pub max_n: Option<usize>,

    /// Also analyze the U-type sequence (x0=0, x1=1) with the same P, Q
    #[arg(long)]
    pub compare_u: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Write the rendered analysis to a file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn execute(args: AnalyzeArgs, config: &DivseqConfig, output: &Output) -> Result<()> {
    let max_n = args.max_n.unwrap_or(config.analysis.max_n);
    let result = analyze_sequence(args.p, args.q, args.x0, args.x1, max_n);

    let rendered = match args.format {
        OutputFormat::Text => {
            let mut text = report::render_analysis(&result);
            if args.compare_u && (args.x0, args.x1) != (0, 1) {
                let u_result = analyze_sequence(args.p, args.q, 0, 1, max_n);
                text.push_str("\n--- U-type comparison (x0=0, x1=1) ---\n\n");
                text.push_str(&report::render_analysis(&u_result));
            }
            text
        }
        OutputFormat::Json => report::analysis_to_json(&result)?,
    };

    if args.format == OutputFormat::Text {
        output.header("Sequence Analysis");
    }
    output.block(&rendered);

    if let Some(path) = &args.output {
        report::write_report(path, &rendered)?;
        output.success(&format!("Report written to {}", path.display()));
    }

    Ok(())
}
