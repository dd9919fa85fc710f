//! Event identity and content keys.
//!
//! An [`EventIdentity`] names a period by `(employee, leave type, start, end)`
//! and is what the leave report is matched against. A [`ContentKey`] names a
//! calendar event by `(summary, start, end)` and is only used to find exact
//! duplicates inside the calendar.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format shared by identities and content keys.
pub const KEY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Deterministic key for a time-off period or the calendar event showing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventIdentity(String);

impl EventIdentity {
    /// Wraps an already-derived identity string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Duplicate-detection key for an existing calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey(String);

impl ContentKey {
    /// Builds the key `"{summary} {start} {end}"`.
    pub fn new(summary: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self(format!(
            "{} {} {}",
            summary,
            start.format(KEY_DATE_FORMAT),
            end.format(KEY_DATE_FORMAT)
        ))
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives event identities.
///
/// The leave source owns the identity format, so adapters implement this
/// trait; the default method is the format every built-in adapter uses.
/// Any override must stay deterministic and injective over its inputs.
pub trait IdentityScheme {
    /// Derives the identity of a period or event.
    fn derive_identity(
        &self,
        employee_name: &str,
        leave_type: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> EventIdentity {
        event_identity(employee_name, leave_type, start_date, end_date)
    }
}

/// The stock identity scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIdentity;

impl IdentityScheme for DefaultIdentity {}

/// Formats `"{employee} - {leave_type} {start:yyyy-MM-dd} {end:yyyy-MM-dd}"`.
///
/// # Example
///
/// ```
/// use leave_calendar_sync::reconcile::event_identity;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
/// let identity = event_identity("Alice", "Vacation", start, end);
/// assert_eq!(identity.as_str(), "Alice - Vacation 2024-01-01 2024-01-04");
/// ```
pub fn event_identity(
    employee_name: &str,
    leave_type: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> EventIdentity {
    EventIdentity(format!(
        "{} - {} {} {}",
        employee_name,
        leave_type,
        start_date.format(KEY_DATE_FORMAT),
        end_date.format(KEY_DATE_FORMAT)
    ))
}
