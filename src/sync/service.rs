//! The reconciliation pass runner.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use chrono::Utc;
use futures::FutureExt;
use tokio::sync::{Mutex, RwLock};
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::calendar::CalendarBackend;
use crate::config::CalendarConfig;
use crate::error::SyncResult;
use crate::reconcile::{DeleteReason, Reconciler};
use crate::source::LeaveSource;

use super::report::{PassOutcome, PassReport, PassSummary};

/// Per-service settings passed in at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Calendar to reconcile.
    pub calendar_id: String,
    /// Location stamped on created events.
    pub event_location: String,
}

impl SyncSettings {
    /// Takes the relevant fields from the calendar configuration.
    pub fn from_config(config: &CalendarConfig) -> Self {
        Self {
            calendar_id: config.calendar_id.clone(),
            event_location: config.event_location.clone(),
        }
    }
}

/// Runs reconciliation passes, one at a time.
///
/// Each pass lists the calendar, fetches the leave report, reconciles, then
/// applies creates followed by deletes. Passes are serialised: a pass never
/// starts while another is in flight. Nothing but the last report is kept
/// between passes.
pub struct SyncService {
    source: Arc<dyn LeaveSource>,
    calendar: Arc<dyn CalendarBackend>,
    settings: SyncSettings,
    pass_lock: Mutex<()>,
    last_report: RwLock<Option<PassReport>>,
}

impl SyncService {
    /// Creates a service over the given collaborators.
    pub fn new(
        source: Arc<dyn LeaveSource>,
        calendar: Arc<dyn CalendarBackend>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            source,
            calendar,
            settings,
            pass_lock: Mutex::new(()),
            last_report: RwLock::new(None),
        }
    }

    /// The service settings.
    pub fn settings(&self) -> &SyncSettings {
        &self.settings
    }

    /// Runs a pass, waiting for any in-flight pass to finish first.
    ///
    /// Never fails: errors end the pass and are recorded in the report.
    pub async fn run_pass(&self) -> PassReport {
        let _guard = self.pass_lock.lock().await;
        self.execute_pass().await
    }

    /// Runs a pass unless one is already in flight, in which case returns
    /// `None` immediately.
    pub async fn try_run_pass(&self) -> Option<PassReport> {
        let _guard = self.pass_lock.try_lock().ok()?;
        Some(self.execute_pass().await)
    }

    /// Returns true while a pass is running.
    pub fn is_running(&self) -> bool {
        self.pass_lock.try_lock().is_err()
    }

    /// The report of the most recent finished pass.
    pub async fn last_report(&self) -> Option<PassReport> {
        self.last_report.read().await.clone()
    }

    async fn execute_pass(&self) -> PassReport {
        let pass_id = Uuid::new_v4();
        let started_at = Utc::now();
        let span = info_span!("sync_pass", pass_id = %pass_id);

        let result = AssertUnwindSafe(self.reconcile_and_apply().instrument(span))
            .catch_unwind()
            .await;

        let outcome = match result {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(err)) => {
                error!(pass_id = %pass_id, error = %err, "Sync pass failed");
                PassOutcome::Failed {
                    error: err.to_string(),
                }
            }
            Err(_) => {
                error!(pass_id = %pass_id, "Sync pass panicked");
                PassOutcome::Failed {
                    error: "sync pass panicked".to_string(),
                }
            }
        };

        let report = PassReport {
            pass_id,
            started_at,
            finished_at: Utc::now(),
            outcome,
        };

        info!(
            pass_id = %pass_id,
            duration_ms = (report.finished_at - report.started_at).num_milliseconds(),
            failed = report.outcome.is_failed(),
            "Sync pass finished"
        );

        *self.last_report.write().await = Some(report.clone());
        report
    }

    async fn reconcile_and_apply(&self) -> SyncResult<PassOutcome> {
        info!(calendar_id = %self.settings.calendar_id, "Sync pass started");

        let existing = self
            .calendar
            .list_events(&self.settings.calendar_id)
            .await?;
        let report = self.source.fetch_report().await;

        if report.is_empty() {
            warn!("Leave report is empty, leaving the calendar untouched");
            return Ok(PassOutcome::SkippedEmptyReport);
        }

        let plan = Reconciler::new(self.source.as_ref(), self.settings.event_location.as_str())
            .reconcile(&report, &existing)?;

        info!(
            existing_events = existing.len(),
            periods = plan.periods,
            to_create = plan.to_create.len(),
            to_delete = plan.to_delete.len(),
            unchanged = plan.unchanged,
            "Reconciliation plan ready"
        );

        // Deletes wait for creates so a replacement exists before its
        // predecessor goes away.
        let created = self
            .calendar
            .create_events(&self.settings.calendar_id, &plan.to_create)
            .await;
        let deleted = self
            .calendar
            .delete_events(&self.settings.calendar_id, &plan.events_to_delete())
            .await;

        if !created.is_complete() || !deleted.is_complete() {
            warn!(
                create_failures = created.failures.len(),
                delete_failures = deleted.failures.len(),
                "Some calendar writes failed"
            );
        }

        Ok(PassOutcome::Completed(PassSummary {
            employees: report.employees.len(),
            leave_entries: report.entry_count(),
            existing_events: existing.len(),
            periods: plan.periods,
            unchanged: plan.unchanged,
            duplicates: plan.delete_count(DeleteReason::Duplicate),
            stale: plan.delete_count(DeleteReason::Stale),
            created,
            deleted,
        }))
    }
}
