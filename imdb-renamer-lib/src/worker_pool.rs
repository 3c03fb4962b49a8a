//! Fixed-size worker pool for folder tasks.
//!
//! Spawns N persistent tokio tasks that pull work items from a bounded
//! async-channel. Results are sent to an unbounded channel for consumption
//! by the caller. Completion order across items is not guaranteed.
//!
//! There is no per-item timeout: an item may legitimately sit waiting on
//! interactive input for as long as the user takes.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A pool of worker tasks that process items concurrently.
///
/// # Example
///
/// ```ignore
/// let mut pool = WorkerPool::start(4, folders, |folder| async move {
///     process(folder).await
/// });
///
/// while let Some(entry) = pool.recv().await {
///     entries.push(entry);
/// }
/// ```
pub struct WorkerPool<R: Send + 'static> {
    result_rx: mpsc::UnboundedReceiver<R>,
    _handles: Vec<JoinHandle<()>>,
}

impl<R: Send + 'static> WorkerPool<R> {
    /// Spawn `n` workers (at least one), submit all items, and return a pool
    /// for receiving results.
    ///
    /// Items go through a bounded channel of capacity `n`, so submission
    /// waits whenever every worker is busy. Submission runs in a background
    /// task so the caller can start receiving results immediately.
    pub fn start<W, F, Fut>(n: usize, items: Vec<W>, process_fn: F) -> Self
    where
        W: Send + 'static,
        F: Fn(W) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        let n = n.max(1);
        let (work_tx, work_rx) = async_channel::bounded::<W>(n);
        let (result_tx, result_rx) = mpsc::unbounded_channel::<R>();
        let process_fn = Arc::new(process_fn);

        let handles: Vec<JoinHandle<()>> = (0..n)
            .map(|worker| {
                let work_rx = work_rx.clone();
                let result_tx = result_tx.clone();
                let process_fn = process_fn.clone();
                tokio::spawn(async move {
                    while let Ok(item) = work_rx.recv().await {
                        if result_tx.send(process_fn(item).await).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    log::debug!("Worker {} finished", worker);
                })
            })
            .collect();

        // Drop our copy of result_tx so the channel closes when all workers finish
        drop(result_tx);

        tokio::spawn(async move {
            for item in items {
                if work_tx.send(item).await.is_err() {
                    break;
                }
            }
            // work_tx dropped here -> channel closes -> workers drain remaining items then stop
        });

        Self {
            result_rx,
            _handles: handles,
        }
    }

    /// Receive the next result. Returns `None` when all items have been
    /// processed and all workers have shut down.
    pub async fn recv(&mut self) -> Option<R> {
        self.result_rx.recv().await
    }
}
