//! Pass reports.
//!
//! Every reconciliation pass produces a [`PassReport`], kept for the status
//! endpoint and printed by the console mode.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::BatchOutcome;

/// Counts from a pass that ran to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    /// Employee rows in the leave report.
    pub employees: usize,
    /// Leave entries in the leave report.
    pub leave_entries: usize,
    /// Managed events found in the calendar.
    pub existing_events: usize,
    /// Periods merged from the report.
    pub periods: usize,
    /// Existing events left untouched.
    pub unchanged: usize,
    /// Duplicate events scheduled for deletion.
    pub duplicates: usize,
    /// Stale events scheduled for deletion.
    pub stale: usize,
    /// Result of the create batch.
    pub created: BatchOutcome,
    /// Result of the delete batch.
    pub deleted: BatchOutcome,
}

/// How a pass ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PassOutcome {
    /// The plan was computed and applied (individual writes may have failed).
    Completed(PassSummary),
    /// The leave report was empty; the calendar was left alone.
    SkippedEmptyReport,
    /// The pass aborted before writing anything further.
    Failed {
        /// What went wrong.
        error: String,
    },
}

impl PassOutcome {
    /// Returns true for [`PassOutcome::Failed`].
    pub fn is_failed(&self) -> bool {
        matches!(self, PassOutcome::Failed { .. })
    }
}

/// The record of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassReport {
    /// Correlation id, also attached to the pass's log lines.
    pub pass_id: Uuid,
    /// When the pass started.
    pub started_at: DateTime<Utc>,
    /// When the pass finished.
    pub finished_at: DateTime<Utc>,
    /// How it ended.
    pub outcome: PassOutcome,
}
