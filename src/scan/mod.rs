//! Scan engine: Cartesian enumeration of parameter ranges with aggregation.
//!
//! Three entry points (parameter scan, initial-condition scan, full scan)
//! share one inner loop; fixed dimensions are width-1 ranges. Enumeration is
//! nested ascending in the order P, Q, x0, x1, which fixes a deterministic
//! traversal for the match list regardless of execution mode.

pub mod engine;
pub mod parallel;
pub mod types;

// Re-export main types for easier access
pub use engine::{ScanConfig, ScanEngine};
pub use types::{ScanMode, ScanRange, ScanSummary};

/// Capability handed to the engine for progress notifications.
///
/// The core performs no console or file I/O itself; callers wanting a
/// progress display implement this (the CLI backs it with an indicatif bar).
/// `Sync` is required because parallel scans report from worker threads.
pub trait ProgressSink: Sync {
    /// Called with (combinations completed, total combinations).
    fn report(&self, current: u64, total: u64);
}

/// Sink that discards all progress events.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _current: u64, _total: u64) {}
}
