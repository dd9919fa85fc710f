//! The reconciliation engine.
//!
//! Diffs a leave report against a snapshot of the calendar and produces the
//! creates and deletes that make the calendar match the report.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SyncResult;
use crate::models::{CalendarEvent, LeaveReport, NewCalendarEvent, TimeOffPeriod};

use super::identity::{EventIdentity, IdentityScheme};
use super::index::CalendarIndex;
use super::merge::merge_periods;

/// Why an existing event is scheduled for deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteReason {
    /// A later copy of an event with the same summary and dates.
    Duplicate,
    /// The report no longer contains the period this event shows.
    Stale,
}

impl std::fmt::Display for DeleteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteReason::Duplicate => write!(f, "duplicate"),
            DeleteReason::Stale => write!(f, "stale"),
        }
    }
}

/// An existing event to delete, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDeletion {
    /// The event to remove.
    pub event: CalendarEvent,
    /// Why it is being removed.
    pub reason: DeleteReason,
}

/// The output of one reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationPlan {
    /// Events to add to the calendar.
    pub to_create: Vec<NewCalendarEvent>,
    /// Existing events to remove: duplicates first, then stale events.
    pub to_delete: Vec<EventDeletion>,
    /// Number of periods merged from the report.
    pub periods: usize,
    /// Existing events that already match the report and are left alone.
    pub unchanged: usize,
}

impl ReconciliationPlan {
    /// Returns true if the calendar already matches the report.
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_delete.is_empty()
    }

    /// Number of deletions for the given reason.
    pub fn delete_count(&self, reason: DeleteReason) -> usize {
        self.to_delete.iter().filter(|d| d.reason == reason).count()
    }

    /// The events to delete, without reasons.
    pub fn events_to_delete(&self) -> Vec<CalendarEvent> {
        self.to_delete.iter().map(|d| d.event.clone()).collect()
    }
}

/// Reconciles leave reports against calendar snapshots.
///
/// Holds no state between calls; every call builds fresh indices from the
/// snapshots it is given.
///
/// # Example
///
/// ```
/// use leave_calendar_sync::models::{EmployeeLeave, LeaveEntry, LeaveReport};
/// use leave_calendar_sync::reconcile::{DefaultIdentity, Reconciler};
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let report = LeaveReport::new(vec![EmployeeLeave {
///     employee_name: "Alice".to_string(),
///     entries: vec![LeaveEntry::new("Alice", "Vacation", day)],
/// }]);
///
/// let reconciler = Reconciler::new(&DefaultIdentity, "Out of Office");
/// let plan = reconciler.reconcile(&report, &[]).unwrap();
/// assert_eq!(plan.to_create.len(), 1);
/// assert_eq!(plan.to_create[0].summary, "Alice - Vacation");
/// assert!(plan.to_delete.is_empty());
/// ```
#[derive(Debug)]
pub struct Reconciler<'s, S: ?Sized> {
    scheme: &'s S,
    event_location: String,
}

impl<'s, S> Reconciler<'s, S>
where
    S: IdentityScheme + ?Sized,
{
    /// Creates a reconciler that derives identities with `scheme` and stamps
    /// created events with `event_location`.
    pub fn new(scheme: &'s S, event_location: impl Into<String>) -> Self {
        Self {
            scheme,
            event_location: event_location.into(),
        }
    }

    /// Computes the plan that converges `existing` onto `report`.
    ///
    /// An empty report yields an empty plan: the source signals a failed
    /// fetch that way, and it must not wipe the calendar.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::MissingEventDate`] if an existing event has no
    /// usable start or end.
    ///
    /// [`SyncError::MissingEventDate`]: crate::error::SyncError::MissingEventDate
    pub fn reconcile(
        &self,
        report: &LeaveReport,
        existing: &[CalendarEvent],
    ) -> SyncResult<ReconciliationPlan> {
        if report.is_empty() {
            debug!("Leave report is empty, nothing to reconcile");
            return Ok(ReconciliationPlan::default());
        }

        let index = CalendarIndex::build(existing, self.scheme)?;

        let mut live: HashSet<EventIdentity> = HashSet::new();
        let mut to_create = Vec::new();
        let mut periods = 0;

        for employee in &report.employees {
            let entries = employee.sorted_entries();
            for period in merge_periods(&entries) {
                periods += 1;
                let identity = self.identity_of(&period);

                // The same period reported twice is one event.
                if !live.insert(identity.clone()) {
                    continue;
                }
                if index.contains_identity(&identity) {
                    continue;
                }

                to_create.push(NewCalendarEvent {
                    summary: period.summary(),
                    location: self.event_location.clone(),
                    start_date: period.start_date,
                    end_date: period.end_date,
                    identity,
                });
            }
        }

        let mut to_delete: Vec<EventDeletion> = index
            .duplicates()
            .iter()
            .map(|&event| EventDeletion {
                event: event.clone(),
                reason: DeleteReason::Duplicate,
            })
            .collect();

        let mut unchanged = 0;
        for indexed in index.first_occurrences() {
            match &indexed.identity {
                Some(identity) if live.contains(identity) => unchanged += 1,
                _ => to_delete.push(EventDeletion {
                    event: indexed.event.clone(),
                    reason: DeleteReason::Stale,
                }),
            }
        }

        let plan = ReconciliationPlan {
            to_create,
            to_delete,
            periods,
            unchanged,
        };

        debug!(
            employees = report.employees.len(),
            entries = report.entry_count(),
            existing_events = existing.len(),
            periods = plan.periods,
            to_create = plan.to_create.len(),
            duplicates = plan.delete_count(DeleteReason::Duplicate),
            stale = plan.delete_count(DeleteReason::Stale),
            unchanged = plan.unchanged,
            "Reconciliation plan computed"
        );

        Ok(plan)
    }

    fn identity_of(&self, period: &TimeOffPeriod) -> EventIdentity {
        self.scheme.derive_identity(
            &period.employee_name,
            &period.leave_type,
            period.start_date,
            period.end_date,
        )
    }
}
