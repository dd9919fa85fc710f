//! Calendar backends.
//!
//! A [`CalendarBackend`] lists the events currently in the target calendar
//! and applies the creates and deletes a reconciliation plan asks for.
//! Writes report per-item results; one failed item never stops the rest.

mod google;

use std::future::Future;

use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::SyncResult;
use crate::models::{CalendarEvent, NewCalendarEvent};

pub use google::GoogleCalendar;

/// A single item a batch failed to write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFailure {
    /// Human-readable label of the item (identity or event id).
    pub item: String,
    /// What went wrong.
    pub message: String,
}

/// Per-item results of a batched write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Items written successfully.
    pub succeeded: usize,
    /// Items that failed.
    pub failures: Vec<ItemFailure>,
}

impl BatchOutcome {
    /// Number of items attempted.
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    /// Returns true if every item succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The target calendar.
#[async_trait]
pub trait CalendarBackend: Send + Sync {
    /// Lists every managed event in the calendar, across all pages.
    async fn list_events(&self, calendar_id: &str) -> SyncResult<Vec<CalendarEvent>>;

    /// Creates events, reporting per-item results.
    async fn create_events(&self, calendar_id: &str, events: &[NewCalendarEvent]) -> BatchOutcome;

    /// Deletes events, reporting per-item results.
    async fn delete_events(&self, calendar_id: &str, events: &[CalendarEvent]) -> BatchOutcome;
}

/// Runs `op` over `items` in fixed-size batches.
///
/// Items within a batch run concurrently; a batch completes before the next
/// one starts. Failures are logged and collected, never propagated.
///
/// # Example
///
/// ```
/// use leave_calendar_sync::calendar::run_in_batches;
/// use leave_calendar_sync::error::SyncError;
///
/// # let runtime = tokio::runtime::Runtime::new().unwrap();
/// # runtime.block_on(async {
/// let items = vec![1, 2, 3, 4, 5];
/// let outcome = run_in_batches(&items, 2, |n| n.to_string(), |n| async move {
///     if *n == 3 { Err(SyncError::calendar("rejected")) } else { Ok(()) }
/// })
/// .await;
///
/// assert_eq!(outcome.succeeded, 4);
/// assert_eq!(outcome.failures[0].item, "3");
/// # });
/// ```
pub async fn run_in_batches<'a, T, L, F, Fut>(
    items: &'a [T],
    batch_size: usize,
    label: L,
    op: F,
) -> BatchOutcome
where
    L: Fn(&'a T) -> String,
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = SyncResult<()>>,
{
    let mut outcome = BatchOutcome::default();
    let batch_size = batch_size.max(1);

    for (batch_number, batch) in items.chunks(batch_size).enumerate() {
        let results = join_all(batch.iter().map(&op)).await;

        for (item, result) in batch.iter().zip(results) {
            match result {
                Ok(()) => outcome.succeeded += 1,
                Err(err) => {
                    let item = label(item);
                    error!(item = %item, error = %err, "Calendar write failed");
                    outcome.failures.push(ItemFailure {
                        item,
                        message: err.to_string(),
                    });
                }
            }
        }

        debug!(
            batch = batch_number + 1,
            size = batch.len(),
            failures = outcome.failures.len(),
            "Calendar batch finished"
        );
    }

    outcome
}
