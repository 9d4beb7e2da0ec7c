//! Worker-pool execution for large scans.
//!
//! Tuples are indexed at enumeration time and results are re-sorted by that
//! index before aggregation, so a parallel scan produces a match list
//! bit-identical to a sequential run. Counts are plain sums and need no
//! ordering at all.

use anyhow::{anyhow, Result};
use crossbeam::channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::ProgressSink;
use crate::analyzer::{analyze_sequence, AnalysisResult};

/// Channel buffer size multiplier (buffer = workers * multiplier)
const CHANNEL_BUFFER_MULTIPLIER: usize = 2;

/// Calculate the worker count from system resources and configuration.
///
/// `max_threads = 0` means no hard cap; `thread_percentage` limits the share
/// of CPU cores used. Never more workers than work items.
pub(crate) fn optimal_workers(work_count: usize, max_threads: usize, thread_percentage: u8) -> usize {
    let cpu_cores = num_cpus::get();
    let max_by_percentage = std::cmp::max(1, (cpu_cores * thread_percentage as usize) / 100);
    let max_workers = if max_threads > 0 {
        std::cmp::min(max_threads, max_by_percentage)
    } else {
        max_by_percentage
    };
    std::cmp::min(max_workers, work_count.max(1))
}

/// Analyze all tuples on a worker pool, returning results in enumeration
/// order. Progress is reported through `sink` from the worker threads every
/// `progress_frequency` completions.
pub(crate) fn analyze_ordered(
    tuples: Vec<(i64, i64, i64, i64)>,
    max_n: usize,
    workers: usize,
    progress_frequency: u64,
    sink: &dyn ProgressSink,
) -> Result<Vec<AnalysisResult>> {
    let work_count = tuples.len();
    if work_count == 0 {
        return Ok(Vec::new());
    }

    let buffer = workers * CHANNEL_BUFFER_MULTIPLIER;
    let (work_tx, work_rx): (Sender<(usize, (i64, i64, i64, i64))>, Receiver<_>) = bounded(buffer);
    let (result_tx, result_rx): (Sender<(usize, AnalysisResult)>, Receiver<_>) = bounded(buffer * 2);

    let progress_counter = Arc::new(AtomicU64::new(0));
    let total = work_count as u64;

    let mut indexed = crossbeam::thread::scope(|s| {
        for _ in 0..workers {
            let work_rx = work_rx.clone();
            let result_tx = result_tx.clone();
            let progress_counter = progress_counter.clone();

            s.spawn(move |_| {
                while let Ok((index, (p, q, x0, x1))) = work_rx.recv() {
                    let mut result = analyze_sequence(p, q, x0, x1, max_n);
                    // Non-qualifying sequences are never reported; drop the
                    // terms so large scans only retain matches
                    if !result.is_divisibility {
                        result.terms = Vec::new();
                    }
                    if result_tx.send((index, result)).is_err() {
                        break; // Receiver dropped
                    }
                    let current = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
                    if current % progress_frequency == 0 || current == total {
                        sink.report(current, total);
                    }
                }
            });
        }

        // Producer: feed indexed tuples to the pool
        let work_tx_clone = work_tx.clone();
        s.spawn(move |_| {
            for item in tuples.into_iter().enumerate() {
                if work_tx_clone.send(item).is_err() {
                    break; // Workers dropped
                }
            }
            drop(work_tx_clone);
        });

        // Drop the original senders so receivers know when work is done
        drop(work_tx);
        drop(result_tx);

        let mut results = Vec::with_capacity(work_count);
        while let Ok(item) = result_rx.recv() {
            results.push(item);
            if results.len() >= work_count {
                break;
            }
        }
        results
    })
    .map_err(|_| anyhow!("thread panic occurred during parallel scan"))?;

    // Restore enumeration order regardless of completion order
    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, result)| result).collect())
}
