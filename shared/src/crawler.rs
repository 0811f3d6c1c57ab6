use std::future::Future;
use std::sync::atomic::{self, AtomicBool};
use std::sync::Arc;

use tokio::signal;
use tokio_retry::strategy::{jitter, FixedInterval};
use tokio_retry::RetryIf;

use crate::block::BlockHeight;
use crate::error::MainError;

/// Drives `f` until shutdown is requested. Each call processes the next
/// height; retryable failures are retried after `interval` milliseconds.
/// The flag is only checked between calls, so a commit in flight always
/// finishes.
pub async fn crawl<F, Fut>(
    f: F,
    interval: Option<u64>,
    must_exit: Arc<AtomicBool>,
) -> Result<(), MainError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<BlockHeight, MainError>>,
{
    let interval = interval.unwrap_or(5000);
    let retry_strategy = FixedInterval::from_millis(interval).map(jitter);

    while !must_exit.load(atomic::Ordering::Relaxed) {
        let outcome = RetryIf::spawn(
            retry_strategy.clone(),
            &f,
            |e: &MainError| {
                !must_exit.load(atomic::Ordering::Relaxed) && e.is_retryable()
            },
        )
        .await;

        match outcome {
            Ok(height) => {
                tracing::trace!(height, "Crawler step done");
            }
            Err(MainError::Config) => return Err(MainError::Config),
            Err(error) => {
                tracing::debug!(%error, "Crawler interrupted");
            }
        }
    }

    Ok(())
}

/// Flag raised once the process receives Ctrl-C.
pub fn must_exit_handle() -> Arc<AtomicBool> {
    let handle = Arc::new(AtomicBool::new(false));
    let task_handle = Arc::clone(&handle);
    tokio::spawn(async move {
        if let Err(reason) = signal::ctrl_c().await {
            tracing::error!(?reason, "Error receiving interrupt signal");
            return;
        }
        tracing::info!("Shutdown requested");
        task_handle.store(true, atomic::Ordering::Relaxed);
    });
    handle
}
