//! Worker pipeline.
//!
//! A fixed pool of workers shares one bounded input channel and one bounded
//! output channel. The feeder closes the input after the last domain; the
//! output closes only once every worker has exited, so the writer always sees
//! every result before end of stream.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::{mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;

use crate::app::{log_progress, print_error_statistics, print_run_summary, shutdown_gracefully};
use crate::config::{Config, CHANNEL_CAPACITY, LOGGING_INTERVAL};
use crate::dns::{Exchanger, Session, Transport};
use crate::error_handling::{update_error_stats, ProcessingStats};
use crate::initialization::init_cache;
use crate::mode::Mode;

use super::input::feed_domains;
use super::RunReport;

type SharedInput = Arc<Mutex<mpsc::Receiver<String>>>;

/// Counters shared by all workers.
#[derive(Default)]
struct Counters {
    completed: AtomicUsize,
    failed: AtomicUsize,
    stats: ProcessingStats,
}

/// Pulls domains until the input is drained and closed.
async fn worker<T: Transport>(
    id: usize,
    session: Session<T>,
    mode: Arc<Mode>,
    input: SharedInput,
    output: mpsc::Sender<String>,
    counters: Arc<Counters>,
) {
    loop {
        // Only the wait for the next domain is serialized; resolution runs unlocked
        let next = input.lock().await.recv().await;
        let Some(domain) = next else {
            break;
        };

        match mode.run(&domain, &session).await {
            Ok(line) => {
                counters.completed.fetch_add(1, Ordering::SeqCst);
                if output.send(line).await.is_err() {
                    warn!("Worker {id}: output closed, stopping");
                    break;
                }
            }
            Err(e) => {
                counters.failed.fetch_add(1, Ordering::SeqCst);
                update_error_stats(&counters.stats, &e);
                warn!("{e}");
            }
        }
    }
    debug!("Worker {id} finished");
}

/// Logs progress every [`LOGGING_INTERVAL`] seconds until stopped.
fn spawn_progress_logger(
    start_time: Instant,
    counters: Arc<Counters>,
) -> (oneshot::Sender<()>, JoinHandle<()>) {
    let (stop, mut stopped) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL));
        // The first tick completes immediately
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    log_progress(start_time, &counters.completed, &counters.failed);
                }
                _ = &mut stopped => break,
            }
        }
    });
    (stop, task)
}

/// Runs the pipeline over `input`, writing one line per resolved domain to `output`.
///
/// Every worker gets its own transport from `make_transport`; the delegation
/// cache (unless disabled) is shared between them.
///
/// # Arguments
///
/// * `config` - Mode, record type, concurrency, cache and root server settings
/// * `make_transport` - Called once per worker
/// * `input` - Line-oriented domain source
/// * `output` - Result sink
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input cannot be read
/// or the output cannot be written. Per-domain failures are logged and counted,
/// never returned.
pub async fn run_with<T, F, R, W>(
    config: &Config,
    mut make_transport: F,
    input: R,
    mut output: W,
) -> Result<RunReport>
where
    T: Transport + 'static,
    F: FnMut() -> T,
    R: AsyncBufRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin,
{
    config.validate().context("Invalid configuration")?;

    let mode = Arc::new(Mode::from_config(config));
    let cache = init_cache(!config.no_cache && mode.walks_delegations());
    info!(
        "Starting {} workers in {:?} mode (cache {})",
        config.concurrency,
        config.mode,
        if cache.is_some() { "enabled" } else { "disabled" }
    );

    let start_time = Instant::now();
    let counters = Arc::new(Counters::default());

    let (input_tx, input_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
    let (output_tx, mut output_rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
    let input_rx: SharedInput = Arc::new(Mutex::new(input_rx));

    let feeder = tokio::spawn(feed_domains(input, input_tx));

    let workers = FuturesUnordered::new();
    for id in 0..config.concurrency {
        let session = Session::new(
            Exchanger::new(make_transport(), cache.clone()),
            config.root_server.clone(),
        );
        workers.push(tokio::spawn(worker(
            id,
            session,
            Arc::clone(&mode),
            Arc::clone(&input_rx),
            output_tx.clone(),
            Arc::clone(&counters),
        )));
    }

    // Close the output only after every worker is done
    let supervisor = tokio::spawn(async move {
        let mut workers = workers;
        while let Some(result) = workers.next().await {
            if let Err(join_error) = result {
                warn!("Worker panicked: {join_error:?}");
            }
        }
        drop(output_tx);
    });

    let (stop_progress, progress_task) =
        spawn_progress_logger(start_time, Arc::clone(&counters));

    let mut write_result = Ok(());
    while let Some(line) = output_rx.recv().await {
        let written = async {
            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await
        }
        .await;
        if let Err(e) = written {
            write_result = Err(e);
            break;
        }
    }
    // Unblocks any worker still waiting to send
    drop(output_rx);

    let flushed = output.flush().await;
    if let Err(e) = supervisor.await {
        warn!("Worker supervisor panicked: {e:?}");
    }
    shutdown_gracefully(stop_progress, progress_task).await;

    write_result.context("Failed to write results")?;
    flushed.context("Failed to flush results")?;
    let submitted = feeder
        .await
        .context("Input reader panicked")?
        .context("Failed to read input")?;

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    let successful = counters.completed.load(Ordering::SeqCst);
    let failed = counters.failed.load(Ordering::SeqCst);

    log_progress(start_time, &counters.completed, &counters.failed);
    print_error_statistics(&counters.stats);
    print_run_summary(submitted, successful, failed, elapsed_seconds);

    Ok(RunReport {
        total: submitted,
        successful,
        failed,
        elapsed_seconds,
    })
}
