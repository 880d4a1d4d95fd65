//! Bounded-concurrency batch execution
//!
//! Backs the "Add Sector" bulk action: many independent remote writes, at
//! most a fixed number in flight at once, and per-task outcomes that never
//! abort the rest of the batch.

use crate::error::{AppError, Result};
use futures_util::future::join_all;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Run `tasks` with at most `max_concurrent` in flight.
///
/// Workers share a claim cursor: each repeatedly takes the next unclaimed
/// index and records that task's outcome at the same index, so the output is
/// index-exact regardless of completion order. A failing task records an `Err`
/// at its slot; siblings keep running and the batch always runs to completion.
pub async fn run_bounded<T, F, Fut>(tasks: Vec<F>, max_concurrent: usize) -> Vec<Result<T>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let total = tasks.len();
    if total == 0 {
        return Vec::new();
    }

    let worker_count = max_concurrent.max(1).min(total);
    debug!(total, worker_count, "running bounded batch");

    let cursor = AtomicUsize::new(0);
    let slots: Mutex<Vec<Option<F>>> = Mutex::new(tasks.into_iter().map(Some).collect());
    let results: Mutex<Vec<Option<Result<T>>>> =
        Mutex::new((0..total).map(|_| None).collect());

    let workers = (0..worker_count).map(|_| {
        let cursor = &cursor;
        let slots = &slots;
        let results = &results;

        async move {
            loop {
                let index = cursor.fetch_add(1, Ordering::SeqCst);
                if index >= total {
                    break;
                }

                // The cursor hands each index to exactly one worker.
                let task = slots.lock()[index].take();
                let Some(task) = task else { break };

                let outcome = task().await;
                results.lock()[index] = Some(outcome);
            }
        }
    });

    join_all(workers).await;

    results
        .into_inner()
        .into_iter()
        .map(|slot| {
            slot.unwrap_or_else(|| Err(AppError::Internal("task recorded no outcome".to_string())))
        })
        .collect()
}
