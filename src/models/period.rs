//! Time-off period model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A merged contiguous run of same-type leave for one employee.
///
/// Multi-day periods use an exclusive `end_date` (one day past the last
/// leave day). A single-day period has `end_date == start_date`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOffPeriod {
    /// The employee on leave.
    pub employee_name: String,
    /// The leave type shared by every day in the run.
    pub leave_type: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// End of the period (see type docs for the exclusive/inclusive rule).
    pub end_date: NaiveDate,
}

impl TimeOffPeriod {
    /// The calendar summary for this period: `"{employee} - {leave_type}"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_calendar_sync::models::TimeOffPeriod;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    /// let period = TimeOffPeriod {
    ///     employee_name: "Alice".to_string(),
    ///     leave_type: "Vacation".to_string(),
    ///     start_date: day,
    ///     end_date: day,
    /// };
    /// assert_eq!(period.summary(), "Alice - Vacation");
    /// ```
    pub fn summary(&self) -> String {
        format!("{} - {}", self.employee_name, self.leave_type)
    }
}
