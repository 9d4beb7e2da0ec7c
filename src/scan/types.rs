use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analyzer::AnalysisResult;

/// Inclusive integer interval for one scan dimension.
///
/// `hi < lo` is legal and denotes an empty dimension: it contributes zero
/// combinations and makes the whole scan empty, which is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRange {
    pub lo: i64,
    pub hi: i64,
}

impl ScanRange {
    pub fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    /// Width-1 range pinning a dimension to a constant
    pub fn fixed(value: i64) -> Self {
        Self { lo: value, hi: value }
    }

    /// Number of values in the range (0 when hi < lo, saturating at u64::MAX)
    pub fn len(&self) -> u64 {
        if self.hi < self.lo {
            0
        } else {
            u64::try_from(self.hi as i128 - self.lo as i128 + 1).unwrap_or(u64::MAX)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hi < self.lo
    }

    /// Ascending iteration over the contained values
    pub fn iter(&self) -> std::ops::RangeInclusive<i64> {
        self.lo..=self.hi
    }
}

impl fmt::Display for ScanRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lo == self.hi {
            write!(f, "{}", self.lo)
        } else {
            write!(f, "{}..{}", self.lo, self.hi)
        }
    }
}

impl FromStr for ScanRange {
    type Err = anyhow::Error;

    /// Parse `lo..hi` (both bounds inclusive) or a single integer.
    ///
    /// Malformed input is rejected here, before any enumeration begins.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some((lo, hi)) = s.split_once("..") {
            let lo = lo
                .trim()
                .parse::<i64>()
                .map_err(|_| anyhow!("invalid lower bound {:?} in range {:?}", lo.trim(), s))?;
            let hi = hi
                .trim()
                .parse::<i64>()
                .map_err(|_| anyhow!("invalid upper bound {:?} in range {:?}", hi.trim(), s))?;
            Ok(Self::new(lo, hi))
        } else {
            let value = s
                .parse::<i64>()
                .map_err(|_| anyhow!("invalid range {:?}: expected an integer or lo..hi", s))?;
            Ok(Self::fixed(value))
        }
    }
}

/// Execution mode for a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Parallel above a combination-count threshold, sequential below
    #[default]
    Auto,
    /// Single-threaded enumeration
    Sequential,
    /// Worker-pool execution preserving enumeration order
    Parallel,
}

/// Aggregate outcome of a scan, owned by the caller that initiated it.
///
/// Only tuples satisfying at least the divisibility property are retained in
/// `matches`, in enumeration order; everything else contributes to counts
/// only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanSummary {
    /// Combinations tested
    pub total: u64,
    /// Tuples satisfying the divisibility property
    pub divisibility_count: u64,
    /// Tuples additionally satisfying the strong property
    pub strong_count: u64,
    /// Divisibility matches with x_0 = 0
    pub zero_start_count: u64,
    /// Divisibility matches with x_0 ≠ 0
    pub nonzero_start_count: u64,
    /// Qualifying results in enumeration order
    pub matches: Vec<AnalysisResult>,
    /// Wall-clock duration of the scan
    pub scan_duration_ms: u64,
}

impl ScanSummary {
    /// Fold one result into the summary. Counts are plain sums, so the fold
    /// is order-independent; the match list order is whatever order results
    /// are fed in (the engine feeds them in enumeration order).
    pub(crate) fn record(&mut self, result: AnalysisResult) {
        self.total += 1;
        if result.is_divisibility {
            self.divisibility_count += 1;
            if result.initial.x0 == 0 {
                self.zero_start_count += 1;
            } else {
                self.nonzero_start_count += 1;
            }
            if result.is_strong_divisibility {
                self.strong_count += 1;
            }
            self.matches.push(result);
        }
    }
}
