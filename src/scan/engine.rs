use anyhow::{anyhow, Result};
use std::time::Instant;
use tracing::debug;

use super::parallel;
use super::types::{ScanMode, ScanRange, ScanSummary};
use super::ProgressSink;
use crate::analyzer::{analyze_sequence, DEFAULT_MAX_N};

/// Tuning knobs for a scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Largest index to generate and test per tuple
    pub max_n: usize,
    /// Execution mode selection
    pub mode: ScanMode,
    /// Hard cap on worker threads (0 = derive from thread_percentage)
    pub max_threads: usize,
    /// Percentage of CPU cores to use in parallel mode (1-100)
    pub thread_percentage: u8,
    /// Minimum combination count before auto mode goes parallel
    pub parallel_threshold: u64,
    /// Emit a progress event every N combinations
    pub progress_frequency: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_n: DEFAULT_MAX_N,
            mode: ScanMode::Auto,
            max_threads: 0,
            thread_percentage: 75,
            parallel_threshold: 512,
            progress_frequency: 64,
        }
    }
}

/// Enumerates Cartesian products of parameter ranges, analyzes each tuple,
/// and aggregates results into a [`ScanSummary`].
pub struct ScanEngine {
    config: ScanConfig,
}

impl ScanEngine {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScanConfig::default())
    }

    /// Scan (P, Q) ranges with fixed initial conditions.
    pub fn scan_parameters(
        &self,
        p_range: ScanRange,
        q_range: ScanRange,
        x0: i64,
        x1: i64,
        sink: &dyn ProgressSink,
    ) -> Result<ScanSummary> {
        self.scan(p_range, q_range, ScanRange::fixed(x0), ScanRange::fixed(x1), sink)
    }

    /// Scan (x0, x1) ranges with fixed recurrence parameters.
    pub fn scan_initial_conditions(
        &self,
        p: i64,
        q: i64,
        x0_range: ScanRange,
        x1_range: ScanRange,
        sink: &dyn ProgressSink,
    ) -> Result<ScanSummary> {
        self.scan(ScanRange::fixed(p), ScanRange::fixed(q), x0_range, x1_range, sink)
    }

    /// Scan the full Cartesian product of all four ranges.
    pub fn scan_all(
        &self,
        p_range: ScanRange,
        q_range: ScanRange,
        x0_range: ScanRange,
        x1_range: ScanRange,
        sink: &dyn ProgressSink,
    ) -> Result<ScanSummary> {
        self.scan(p_range, q_range, x0_range, x1_range, sink)
    }

    /// Shared inner loop. Enumeration order is nested ascending, outer to
    /// inner P, Q, x0, x1; the match list follows that order in every mode.
    fn scan(
        &self,
        p_range: ScanRange,
        q_range: ScanRange,
        x0_range: ScanRange,
        x1_range: ScanRange,
        sink: &dyn ProgressSink,
    ) -> Result<ScanSummary> {
        let start = Instant::now();
        let total = Self::total_combinations(&[p_range, q_range, x0_range, x1_range])?;

        let mut summary = ScanSummary::default();
        if total == 0 {
            // An empty dimension empties the scan; not an error
            summary.scan_duration_ms = start.elapsed().as_millis() as u64;
            return Ok(summary);
        }

        let mode = self.effective_mode(total);
        debug!(total, ?mode, max_n = self.config.max_n, "starting scan");

        match mode {
            ScanMode::Parallel => {
                self.scan_parallel(p_range, q_range, x0_range, x1_range, total, sink, &mut summary)?
            }
            _ => self.scan_sequential(p_range, q_range, x0_range, x1_range, total, sink, &mut summary),
        }

        summary.scan_duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            total = summary.total,
            matches = summary.divisibility_count,
            strong = summary.strong_count,
            duration_ms = summary.scan_duration_ms,
            "scan complete"
        );
        Ok(summary)
    }

    /// Product of the dimension sizes, computed before iterating so progress
    /// reporting has a known denominator.
    fn total_combinations(ranges: &[ScanRange; 4]) -> Result<u64> {
        ranges.iter().try_fold(1u64, |acc, r| {
            acc.checked_mul(r.len())
                .ok_or_else(|| anyhow!("scan space too large: combination count exceeds u64"))
        })
    }

    fn effective_mode(&self, total: u64) -> ScanMode {
        match self.config.mode {
            ScanMode::Auto => {
                if total >= self.config.parallel_threshold && num_cpus::get() > 1 {
                    ScanMode::Parallel
                } else {
                    ScanMode::Sequential
                }
            }
            explicit => explicit,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn scan_sequential(
        &self,
        p_range: ScanRange,
        q_range: ScanRange,
        x0_range: ScanRange,
        x1_range: ScanRange,
        total: u64,
        sink: &dyn ProgressSink,
        summary: &mut ScanSummary,
    ) {
        let frequency = self.config.progress_frequency.max(1);
        let mut current = 0u64;
        for p in p_range.iter() {
            for q in q_range.iter() {
                for x0 in x0_range.iter() {
                    for x1 in x1_range.iter() {
                        summary.record(analyze_sequence(p, q, x0, x1, self.config.max_n));
                        current += 1;
                        if current % frequency == 0 || current == total {
                            sink.report(current, total);
                        }
                    }
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn scan_parallel(
        &self,
        p_range: ScanRange,
        q_range: ScanRange,
        x0_range: ScanRange,
        x1_range: ScanRange,
        total: u64,
        sink: &dyn ProgressSink,
        summary: &mut ScanSummary,
    ) -> Result<()> {
        // Tuples are cheap (four i64s); only qualifying results keep their
        // sequences past the worker boundary
        let mut tuples = Vec::with_capacity(total.min(u64::from(u32::MAX)) as usize);
        for p in p_range.iter() {
            for q in q_range.iter() {
                for x0 in x0_range.iter() {
                    for x1 in x1_range.iter() {
                        tuples.push((p, q, x0, x1));
                    }
                }
            }
        }

        let workers = parallel::optimal_workers(
            tuples.len(),
            self.config.max_threads,
            self.config.thread_percentage,
        );
        let results = parallel::analyze_ordered(
            tuples,
            self.config.max_n,
            workers,
            self.config.progress_frequency.max(1),
            sink,
        )?;
        for result in results {
            summary.record(result);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::NoProgress;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct CountingSink {
        events: AtomicU64,
        last: AtomicU64,
    }

    impl CountingSink {
        fn new() -> Self {
            Self { events: AtomicU64::new(0), last: AtomicU64::new(0) }
        }
    }

    impl ProgressSink for CountingSink {
        fn report(&self, current: u64, total: u64) {
            self.events.fetch_add(1, Ordering::Relaxed);
            self.last.store(current, Ordering::Relaxed);
            assert!(current <= total);
        }
    }

    fn sequential_engine(max_n: usize) -> ScanEngine {
        ScanEngine::new(ScanConfig {
            max_n,
            mode: ScanMode::Sequential,
            ..ScanConfig::default()
        })
    }

    #[test]
    fn test_empty_range_yields_empty_summary() {
        let engine = sequential_engine(10);
        let summary = engine
            .scan_parameters(ScanRange::new(5, 3), ScanRange::fixed(0), 0, 1, &NoProgress)
            .unwrap();
        assert_eq!(summary.total, 0);
        assert!(summary.matches.is_empty());
        assert_eq!(summary.divisibility_count, 0);
    }

    #[test]
    fn test_parameter_scan_counts() {
        let engine = sequential_engine(15);
        let summary = engine
            .scan_parameters(ScanRange::new(-2, 2), ScanRange::new(-2, 2), 0, 1, &NoProgress)
            .unwrap();
        assert_eq!(summary.total, 25);
        // U-type seeds: every divisibility match has x0 = 0
        assert_eq!(summary.zero_start_count, summary.divisibility_count);
        assert_eq!(summary.nonzero_start_count, 0);
        assert!(summary.strong_count <= summary.divisibility_count);
        assert_eq!(summary.matches.len() as u64, summary.divisibility_count);
        // Fibonacci (P=1, Q=-1) is in range and must qualify as strong
        assert!(summary
            .matches
            .iter()
            .any(|r| r.params.p == 1 && r.params.q == -1 && r.is_strong_divisibility));
    }

    #[test]
    fn test_enumeration_order_is_deterministic() {
        let engine = sequential_engine(5);
        let r = ScanRange::new(-1, 1);
        let first = engine.scan_all(r, r, r, r, &NoProgress).unwrap();
        let second = engine.scan_all(r, r, r, r, &NoProgress).unwrap();
        assert_eq!(first.matches, second.matches);
        assert_eq!(first.total, 81);
    }

    #[test]
    fn test_enumeration_order_is_p_q_x0_x1_nested() {
        let engine = sequential_engine(5);
        // With x1 varying fastest and everything a divisibility match is not
        // guaranteed, so pin three dimensions and vary only x1
        let summary = engine
            .scan_initial_conditions(1, -1, ScanRange::fixed(0), ScanRange::new(1, 3), &NoProgress)
            .unwrap();
        let seeds: Vec<i64> = summary.matches.iter().map(|r| r.initial.x1).collect();
        let mut sorted = seeds.clone();
        sorted.sort_unstable();
        assert_eq!(seeds, sorted);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let r = ScanRange::new(-2, 2);
        let sequential = sequential_engine(10).scan_all(r, r, r, r, &NoProgress).unwrap();
        let parallel = ScanEngine::new(ScanConfig {
            max_n: 10,
            mode: ScanMode::Parallel,
            ..ScanConfig::default()
        })
        .scan_all(r, r, r, r, &NoProgress)
        .unwrap();

        assert_eq!(sequential.total, parallel.total);
        assert_eq!(sequential.divisibility_count, parallel.divisibility_count);
        assert_eq!(sequential.strong_count, parallel.strong_count);
        assert_eq!(sequential.zero_start_count, parallel.zero_start_count);
        assert_eq!(sequential.matches, parallel.matches);
    }

    #[test]
    fn test_progress_reaches_total() {
        let engine = ScanEngine::new(ScanConfig {
            max_n: 5,
            mode: ScanMode::Sequential,
            progress_frequency: 7,
            ..ScanConfig::default()
        });
        let sink = CountingSink::new();
        let summary = engine
            .scan_parameters(ScanRange::new(0, 4), ScanRange::new(0, 4), 0, 1, &sink)
            .unwrap();
        assert_eq!(summary.total, 25);
        assert!(sink.events.load(Ordering::Relaxed) >= 1);
        assert_eq!(sink.last.load(Ordering::Relaxed), 25);
    }

    #[test]
    fn test_fixed_dimensions_are_constant() {
        let engine = sequential_engine(8);
        let summary = engine
            .scan_parameters(ScanRange::new(1, 3), ScanRange::new(-1, 1), 0, 1, &NoProgress)
            .unwrap();
        assert!(summary.matches.iter().all(|r| r.initial.x0 == 0 && r.initial.x1 == 1));
    }
}
