//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use leave_calendar_sync::calendar::{BatchOutcome, CalendarBackend, run_in_batches};
use leave_calendar_sync::error::{SyncError, SyncResult};
use leave_calendar_sync::models::{CalendarEvent, EmployeeLeave, LeaveEntry, LeaveReport, NewCalendarEvent};
use leave_calendar_sync::reconcile::IdentityScheme;
use leave_calendar_sync::source::LeaveSource;
use leave_calendar_sync::sync::{SyncService, SyncSettings};

pub const CALENDAR_ID: &str = "ooo@example.com";
pub const LOCATION: &str = "Out of Office";

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Builds an employee row from `(leave_type, day)` pairs.
pub fn employee(name: &str, days: &[(&str, &str)]) -> EmployeeLeave {
    EmployeeLeave {
        employee_name: name.to_string(),
        entries: days
            .iter()
            .map(|(leave_type, day)| LeaveEntry::new(name, *leave_type, date(day)))
            .collect(),
    }
}

pub fn event(id: &str, summary: &str, start: &str, end: &str) -> CalendarEvent {
    CalendarEvent::all_day(id, summary, date(start), date(end))
}

/// A leave source whose report the test sets directly.
#[derive(Default)]
pub struct StaticLeaveSource {
    report: Mutex<LeaveReport>,
    fetches: AtomicUsize,
}

impl StaticLeaveSource {
    pub fn new(report: LeaveReport) -> Self {
        Self {
            report: Mutex::new(report),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn set_report(&self, report: LeaveReport) {
        *self.report.lock().unwrap() = report;
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl IdentityScheme for StaticLeaveSource {}

#[async_trait]
impl LeaveSource for StaticLeaveSource {
    async fn fetch_report(&self) -> LeaveReport {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.report.lock().unwrap().clone()
    }
}

/// A calendar held in memory.
///
/// Every call is appended to a journal (`list`, `create:<summary>`,
/// `delete:<id>`) so tests can check ordering.
#[derive(Default)]
pub struct InMemoryCalendar {
    events: Mutex<Vec<CalendarEvent>>,
    journal: Mutex<Vec<String>>,
    next_id: AtomicUsize,
    fail_list: AtomicBool,
    rejected_summaries: Mutex<HashSet<String>>,
    rejected_deletes: Mutex<HashSet<String>>,
    list_gate: Mutex<Option<Arc<Notify>>>,
}

impl InMemoryCalendar {
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        let calendar = Self::default();
        *calendar.events.lock().unwrap() = events;
        calendar
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        self.events.lock().unwrap().clone()
    }

    /// `(summary, start, end)` for every event, sorted.
    pub fn contents(&self) -> Vec<(String, NaiveDate, NaiveDate)> {
        let mut contents: Vec<_> = self
            .events()
            .into_iter()
            .map(|e| {
                (
                    e.summary.clone(),
                    e.start.resolve_day().unwrap(),
                    e.end.resolve_day().unwrap(),
                )
            })
            .collect();
        contents.sort();
        contents
    }

    pub fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    pub fn clear_journal(&self) {
        self.journal.lock().unwrap().clear();
    }

    pub fn fail_listing(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn reject_create(&self, summary: &str) {
        self.rejected_summaries.lock().unwrap().insert(summary.to_string());
    }

    pub fn reject_delete(&self, id: &str) {
        self.rejected_deletes.lock().unwrap().insert(id.to_string());
    }

    pub fn accept_all(&self) {
        self.rejected_summaries.lock().unwrap().clear();
        self.rejected_deletes.lock().unwrap().clear();
    }

    /// Makes the next `list_events` call wait until the returned handle is
    /// notified.
    pub fn hold_listing(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.list_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn record(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }

    async fn insert(&self, event: &NewCalendarEvent) -> SyncResult<()> {
        self.record(format!("create:{}", event.summary));
        if self.rejected_summaries.lock().unwrap().contains(&event.summary) {
            return Err(SyncError::calendar(format!("rejected {}", event.summary)));
        }
        let id = format!("mem-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut created = CalendarEvent::all_day(id, &event.summary, event.start_date, event.end_date);
        created.location = Some(event.location.clone());
        self.events.lock().unwrap().push(created);
        Ok(())
    }

    async fn remove(&self, event: &CalendarEvent) -> SyncResult<()> {
        self.record(format!("delete:{}", event.id));
        if self.rejected_deletes.lock().unwrap().contains(&event.id) {
            return Err(SyncError::calendar(format!("rejected {}", event.id)));
        }
        self.events.lock().unwrap().retain(|e| e.id != event.id);
        Ok(())
    }
}

#[async_trait]
impl CalendarBackend for InMemoryCalendar {
    async fn list_events(&self, _calendar_id: &str) -> SyncResult<Vec<CalendarEvent>> {
        let gate = self.list_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.record("list".to_string());
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(SyncError::calendar("list request returned HTTP 503"));
        }
        Ok(self.events())
    }

    async fn create_events(&self, _calendar_id: &str, events: &[NewCalendarEvent]) -> BatchOutcome {
        run_in_batches(events, 2, |e| e.identity.to_string(), |e| self.insert(e)).await
    }

    async fn delete_events(&self, _calendar_id: &str, events: &[CalendarEvent]) -> BatchOutcome {
        run_in_batches(events, 2, |e| e.id.clone(), |e| self.remove(e)).await
    }
}

pub fn settings() -> SyncSettings {
    SyncSettings {
        calendar_id: CALENDAR_ID.to_string(),
        event_location: LOCATION.to_string(),
    }
}

pub fn service(source: &Arc<StaticLeaveSource>, calendar: &Arc<InMemoryCalendar>) -> SyncService {
    SyncService::new(source.clone(), calendar.clone(), settings())
}
