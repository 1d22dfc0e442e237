//! Background task shutdown.

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Stops the progress logging task and waits for it to finish.
pub async fn shutdown_gracefully(stop: oneshot::Sender<()>, logging_task: JoinHandle<()>) {
    // The task may already be gone; nothing to signal then
    let _ = stop.send(());
    if let Err(e) = logging_task.await {
        log::debug!("Progress logging task ended abnormally: {e}");
    }
}
