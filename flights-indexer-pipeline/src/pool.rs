//! Bounded worker pool for the fan-out fetch stages.
//!
//! A producer task streams work items into a bounded channel; a fixed
//! number of workers pull from it until it is closed. A worker whose
//! handler returns an error records it and stops consuming, while its
//! siblings keep draining the channel. Results flow over an unbounded
//! channel collected concurrently, and errors land in a write-once slot:
//! the first one recorded becomes the pool's error, with a counter
//! keeping the total for summary reporting.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};

/// Combined result of a pool run: everything the workers produced, the
/// first error recorded (if any) and how many errors there were in
/// total. Result order across workers is unspecified.
pub struct PoolOutcome<R, E> {
    pub results: Vec<R>,
    pub first_error: Option<E>,
    pub error_count: usize,
}

/// Run `handler` over every item using `worker_count` parallel workers.
///
/// All workers are awaited before returning, so by the time the outcome
/// is produced no handler is still running. Items left in the channel
/// when every worker has stopped are dropped unprocessed.
pub async fn run_pool<T, R, E, F, Fut>(
    items: Vec<T>,
    worker_count: usize,
    handler: F,
) -> PoolOutcome<R, E>
where
    T: Send + 'static,
    R: Send + 'static,
    E: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
{
    let worker_count = worker_count.max(1);
    let (work_tx, work_rx) = mpsc::channel::<T>(worker_count);
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<R>();

    let producer = tokio::spawn(async move {
        for item in items {
            // Send fails once every worker has stopped and the receiver
            // is gone; the remaining items are dropped.
            if work_tx.send(item).await.is_err() {
                break;
            }
        }
    });

    let work_rx = Arc::new(Mutex::new(work_rx));
    let handler = Arc::new(handler);
    let first_error: Arc<std::sync::Mutex<Option<E>>> = Arc::new(std::sync::Mutex::new(None));
    let error_count = Arc::new(AtomicUsize::new(0));

    let mut workers = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let work_rx = Arc::clone(&work_rx);
        let handler = Arc::clone(&handler);
        let result_tx = result_tx.clone();
        let first_error = Arc::clone(&first_error);
        let error_count = Arc::clone(&error_count);

        workers.push(tokio::spawn(async move {
            loop {
                let item = work_rx.lock().await.recv().await;
                let Some(item) = item else {
                    break;
                };

                match handler(item).await {
                    Ok(result) => {
                        let _ = result_tx.send(result);
                    }
                    Err(error) => {
                        error_count.fetch_add(1, Ordering::Relaxed);
                        let mut slot = first_error.lock().unwrap();
                        if slot.is_none() {
                            *slot = Some(error);
                        }
                        // This worker stops; siblings keep consuming.
                        break;
                    }
                }
            }
        }));
    }
    drop(result_tx);

    let collector = tokio::spawn(async move {
        let mut results = Vec::new();
        while let Some(result) = result_rx.recv().await {
            results.push(result);
        }
        results
    });

    for worker in workers {
        let _ = worker.await;
    }
    // Dropping the last receiver handle unblocks the producer if items
    // remain after all workers stopped.
    drop(work_rx);
    let _ = producer.await;

    let results = collector.await.unwrap_or_default();
    let first_error = first_error.lock().unwrap().take();
    let error_count = error_count.load(Ordering::Relaxed);

    PoolOutcome {
        results,
        first_error,
        error_count,
    }
}
