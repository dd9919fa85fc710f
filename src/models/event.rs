//! Calendar event models.
//!
//! [`CalendarEvent`] is an event already present in the target calendar;
//! [`NewCalendarEvent`] is one the reconciler wants created.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::reconcile::EventIdentity;

/// Separator between employee name and leave type in event summaries.
pub const SUMMARY_SEPARATOR: &str = " - ";

/// The start or end of a calendar event.
///
/// Whole-day events carry `date`; timed events carry `date_time`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    /// Date-only boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Date-time boundary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
}

impl EventDate {
    /// A whole-day boundary.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            date_time: None,
        }
    }

    /// A timed boundary.
    pub fn at(date_time: DateTime<FixedOffset>) -> Self {
        Self {
            date: None,
            date_time: Some(date_time),
        }
    }

    /// Resolves the calendar day, preferring the date-only field.
    ///
    /// A date-time resolves to its local date in its own offset.
    pub fn resolve_day(&self) -> Option<NaiveDate> {
        self.date
            .or_else(|| self.date_time.map(|dt| dt.date_naive()))
    }
}

/// An event that exists in the target calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Backend identifier, used for deletion.
    pub id: String,
    /// Event title, conventionally `"{employee} - {leave_type}"`.
    #[serde(default)]
    pub summary: String,
    /// Event location, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Event start.
    pub start: EventDate,
    /// Event end.
    pub end: EventDate,
}

impl CalendarEvent {
    /// Creates a whole-day event.
    pub fn all_day(
        id: impl Into<String>,
        summary: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            location: None,
            start: EventDate::day(start),
            end: EventDate::day(end),
        }
    }

    /// Splits the summary into `(employee_name, leave_type)`.
    ///
    /// Returns `None` when the summary does not follow the
    /// `"{employee} - {leave_type}"` convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_calendar_sync::models::CalendarEvent;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let event = CalendarEvent::all_day("e1", "Alice - Out of Office", day, day);
    /// assert_eq!(event.summary_parts(), Some(("Alice", "Out of Office")));
    ///
    /// let other = CalendarEvent::all_day("e2", "Team offsite", day, day);
    /// assert_eq!(other.summary_parts(), None);
    /// ```
    pub fn summary_parts(&self) -> Option<(&str, &str)> {
        self.summary.split_once(SUMMARY_SEPARATOR)
    }
}

/// An event the reconciler wants added to the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCalendarEvent {
    /// Event title.
    pub summary: String,
    /// Out-of-office location marker.
    pub location: String,
    /// First day.
    pub start_date: NaiveDate,
    /// End day, matching the period it was built from.
    pub end_date: NaiveDate,
    /// Identity of the period; doubles as the creation idempotency key.
    pub identity: EventIdentity,
}
