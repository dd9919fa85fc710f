//! Core data models for the sync service.
//!
//! This module contains the leave report rows, merged time-off periods,
//! and calendar events that flow through reconciliation.

mod event;
mod leave;
mod period;

pub use event::{CalendarEvent, EventDate, NewCalendarEvent, SUMMARY_SEPARATOR};
pub use leave::{EmployeeLeave, LeaveEntry, LeaveReport};
pub use period::TimeOffPeriod;
