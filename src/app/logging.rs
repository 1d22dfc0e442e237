//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Logs how many domains have been resolved so far and the current rate.
///
/// # Arguments
///
/// * `start_time` - When the pipeline started
/// * `completed` - Domains that produced an output line
/// * `failed` - Domains that failed
pub fn log_progress(start_time: Instant, completed: &AtomicUsize, failed: &AtomicUsize) {
    let completed = completed.load(Ordering::SeqCst);
    let failed = failed.load(Ordering::SeqCst);
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let done = completed + failed;
    let rate = if elapsed_secs > 0.0 {
        done as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Processed {} domains ({} failed) in {:.2} seconds (~{:.2} domains/sec)",
        done, failed, elapsed_secs, rate
    );
}
