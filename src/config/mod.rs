//! Layered configuration: embedded defaults, optional `divseq.toml` (or an
//! explicit `--config` path), then `DIVSEQ_`-prefixed environment variables,
//! highest priority last.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::scan::{ScanConfig, ScanMode};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Merged configuration for the whole tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivseqConfig {
    pub analysis: AnalysisSection,
    pub scan: ScanSection,
    pub report: ReportSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    /// Largest index to generate and test per tuple
    pub max_n: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSection {
    pub mode: ScanMode,
    pub max_threads: usize,
    pub thread_percentage: u8,
    pub parallel_threshold: u64,
    pub progress_frequency: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    /// Directory for auto-named report files
    pub directory: String,
}

impl DivseqConfig {
    /// Load configuration with the standard layering.
    pub fn load(custom_path: Option<&str>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(path) = custom_path {
            figment = figment.merge(Toml::file(path));
        } else {
            figment = figment.merge(Toml::file("divseq.toml"));
        }

        // Environment variables always have highest priority; sections are
        // addressed with double underscores (DIVSEQ_SCAN__MODE=parallel)
        figment = figment.merge(Env::prefixed("DIVSEQ_").split("__"));

        figment.extract().context("invalid divseq configuration")
    }

    /// Bridge to the scan engine's tuning knobs, with optional CLI overrides.
    pub fn scan_config(&self, max_n: Option<usize>, mode: Option<ScanMode>) -> ScanConfig {
        ScanConfig {
            max_n: max_n.unwrap_or(self.analysis.max_n),
            mode: mode.unwrap_or(self.scan.mode),
            max_threads: self.scan.max_threads,
            thread_percentage: self.scan.thread_percentage,
            parallel_threshold: self.scan.parallel_threshold,
            progress_frequency: self.scan.progress_frequency,
        }
    }
}
