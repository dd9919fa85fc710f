//! Reconciliation passes and their scheduling.
//!
//! [`SyncService`] runs one pass at a time against a [`LeaveSource`] and a
//! [`CalendarBackend`]; [`spawn_scheduler`] drives it on a fixed interval.
//!
//! [`LeaveSource`]: crate::source::LeaveSource
//! [`CalendarBackend`]: crate::calendar::CalendarBackend

mod report;
mod scheduler;
mod service;

pub use report::{PassOutcome, PassReport, PassSummary};
pub use scheduler::spawn_scheduler;
pub use service::{SyncService, SyncSettings};
