//! Presentation layer: renders analysis results and scan summaries as text
//! or JSON and persists report files. Consumes core values, never mutates
//! them.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

use crate::analyzer::AnalysisResult;
use crate::scan::ScanSummary;

/// Render a single analysis as a plain-text block.
pub fn render_analysis(result: &AnalysisResult) -> String {
    let p = result.params.p;
    let q = result.params.q;
    let mut out = String::new();

    out.push_str(&format!("Recurrence: x_n = {}*x_(n-1) - ({})*x_(n-2)\n", p, q));
    out.push_str(&format!(
        "Initial conditions: x_0 = {}, x_1 = {}\n",
        result.initial.x0, result.initial.x1
    ));
    out.push_str(&format!("Characteristic polynomial: x^2 - ({})x + ({}) = 0\n", p, q));
    out.push_str(&format!("Discriminant: D = {}\n\n", result.params.discriminant()));

    out.push_str(&format!("Terms x_0..x_{}:\n", result.max_n()));
    for (n, term) in result.terms.iter().enumerate() {
        out.push_str(&format!("  x_{} = {}\n", n, term));
    }
    out.push('\n');

    match result.first_failure {
        None => out.push_str(&format!(
            "[ok] divisibility property holds up to n = {}\n",
            result.max_n()
        )),
        Some((m, n)) => {
            out.push_str(&format!(
                "[FAIL] divisibility property: {} | {} but x_{} = {} does not divide x_{} = {}\n",
                m, n, m, result.terms[m], n, result.terms[n]
            ));
        }
    }

    match result.first_strong_failure {
        None => out.push_str(&format!(
            "[ok] strong divisibility property holds up to n = {}\n",
            result.max_n()
        )),
        Some((m, n)) => {
            use num_integer::Integer;
            use num_traits::Signed;
            let g = m.gcd(&n);
            out.push_str(&format!(
                "[FAIL] strong divisibility: gcd(x_{}, x_{}) = {} but |x_gcd({},{})| = |x_{}| = {}\n",
                m,
                n,
                result.terms[m].gcd(&result.terms[n]),
                m,
                n,
                g,
                result.terms[g].abs()
            ));
        }
    }

    out
}

/// Render a scan summary with at most `limit` matches listed.
pub fn render_summary(summary: &ScanSummary, limit: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Scan complete: {} combinations in {} ms\n",
        summary.total, summary.scan_duration_ms
    ));
    out.push_str(&format!("  divisibility sequences: {}\n", summary.divisibility_count));
    out.push_str(&format!("    strong divisibility:  {}\n", summary.strong_count));
    out.push_str(&format!("    with x_0 = 0:         {}\n", summary.zero_start_count));
    out.push_str(&format!("    with x_0 != 0:        {}\n", summary.nonzero_start_count));

    if summary.matches.is_empty() {
        return out;
    }

    let shown = summary.matches.len().min(limit);
    out.push_str(&format!(
        "\nMatches ({} of {}):\n",
        shown,
        summary.matches.len()
    ));
    for result in summary.matches.iter().take(limit) {
        let marker = if result.is_strong_divisibility { "  [strong]" } else { "" };
        out.push_str(&format!(
            "  P={} Q={} x0={} x1={}{}\n",
            result.params.p, result.params.q, result.initial.x0, result.initial.x1, marker
        ));
    }
    out
}

/// Serialize an analysis result as pretty JSON.
pub fn analysis_to_json(result: &AnalysisResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize analysis result")
}

/// Serialize a scan summary as pretty JSON.
pub fn summary_to_json(summary: &ScanSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize scan summary")
}

/// Timestamped default path for a report file, e.g.
/// `reports/divseq-scan-20260830-141503.txt`.
pub fn default_report_path(directory: &str, stem: &str, extension: &str) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    Path::new(directory).join(format!("divseq-{}-{}.{}", stem, timestamp, extension))
}

/// Write a report, creating parent directories as needed.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create report directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write report to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_sequence;
    use crate::scan::{NoProgress, ScanConfig, ScanEngine, ScanMode, ScanRange};

    #[test]
    fn test_render_fibonacci_analysis() {
        let text = render_analysis(&analyze_sequence(1, -1, 0, 1, 20));
        assert!(text.contains("x_n = 1*x_(n-1) - (-1)*x_(n-2)"));
        assert!(text.contains("Discriminant: D = 5"));
        assert!(text.contains("x_20 = 6765"));
        assert!(text.contains("[ok] divisibility property"));
        assert!(text.contains("[ok] strong divisibility property"));
    }

    #[test]
    fn test_render_lucas_failure() {
        let text = render_analysis(&analyze_sequence(1, -1, 2, 1, 20));
        assert!(text.contains("2 | 4 but x_2 = 3 does not divide x_4 = 7"));
        assert!(text.contains("[FAIL] strong divisibility"));
    }

    #[test]
    fn test_render_summary_counts_and_limit() {
        let engine = ScanEngine::new(ScanConfig {
            max_n: 10,
            mode: ScanMode::Sequential,
            ..ScanConfig::default()
        });
        let summary = engine
            .scan_parameters(ScanRange::new(-2, 2), ScanRange::new(-2, 2), 0, 1, &NoProgress)
            .unwrap();
        let text = render_summary(&summary, 3);
        assert!(text.contains("25 combinations"));
        assert!(text.contains("divisibility sequences:"));
        assert!(text.contains("(3 of"));
    }

    #[test]
    fn test_json_round_trips_through_serde_value() {
        let json = analysis_to_json(&analyze_sequence(1, -1, 0, 1, 5)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["params"]["p"], 1);
        assert_eq!(value["terms"][5], "5");
    }

    #[test]
    fn test_default_report_path_shape() {
        let path = default_report_path("reports", "scan", "txt");
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("divseq-scan-"));
        assert!(name.ends_with(".txt"));
        assert_eq!(path.parent().unwrap(), Path::new("reports"));
    }

    #[test]
    fn test_write_report_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.txt");
        write_report(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }
}
