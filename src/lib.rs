//! # Divseq - Divisibility Sequence Analyzer
//!
//! Empirical tester for divisibility properties of Lucas-type integer
//! sequences defined by the second-order recurrence
//!
//! ```text
//! x_n = P·x_{n-1} − Q·x_{n-2}
//! ```
//!
//! with arbitrary integer parameters (P, Q) and initial conditions (x0, x1).
//! For a generated prefix x_0..x_max_n, divseq checks:
//!
//! - **Divisibility property**: m | n implies x_m | x_n
//! - **Strong divisibility property**: gcd(x_m, x_n) = |x_gcd(m,n)|
//!
//! Both single-tuple analysis and Cartesian scans over parameter ranges are
//! supported; scans aggregate matches and summary statistics and report
//! progress through a pluggable sink. All arithmetic on sequence terms is
//! exact (arbitrary precision), so every integer input produces a result.
//!
//! ## Quick Start
//!
//! ```bash
//! # Fibonacci: a strong divisibility sequence
//! divseq analyze -P 1 -Q=-1 --x0 0 --x1 1
//!
//! # Scan all (P, Q) in [-5, 5]² with U-type seeds
//! divseq scan params --p-range=-5..5 --q-range=-5..5 --x0 0 --x1 1
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod report;
pub mod scan;
pub mod sequence;

pub use analyzer::{analyze_sequence, AnalysisResult, InitialConditions, RecurrenceParams};
pub use config::DivseqConfig;
pub use scan::{NoProgress, ProgressSink, ScanEngine, ScanMode, ScanRange, ScanSummary};

/// Result type alias for divseq operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
