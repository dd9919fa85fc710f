//! Leave report models.
//!
//! This module defines the rows of a time-off report: one [`EmployeeLeave`]
//! per employee, each holding whole-day [`LeaveEntry`] values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One employee/day/leave-type record from the source report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEntry {
    /// The employee's display name as it appears in the report.
    pub employee_name: String,
    /// The leave type label (e.g., "Vacation").
    pub leave_type: String,
    /// The day of leave.
    pub date: NaiveDate,
}

impl LeaveEntry {
    /// Creates a new leave entry.
    pub fn new(
        employee_name: impl Into<String>,
        leave_type: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            employee_name: employee_name.into(),
            leave_type: leave_type.into(),
            date,
        }
    }
}

/// All leave entries reported for a single employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeLeave {
    /// The employee's display name.
    pub employee_name: String,
    /// Leave entries in report order.
    #[serde(default)]
    pub entries: Vec<LeaveEntry>,
}

impl EmployeeLeave {
    /// Returns the entries stably sorted by date.
    ///
    /// The report does not promise date order, and period merging is only
    /// meaningful over date-ordered input.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_calendar_sync::models::{EmployeeLeave, LeaveEntry};
    /// use chrono::NaiveDate;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
    /// let row = EmployeeLeave {
    ///     employee_name: "Alice".to_string(),
    ///     entries: vec![
    ///         LeaveEntry::new("Alice", "Vacation", d(3)),
    ///         LeaveEntry::new("Alice", "Vacation", d(1)),
    ///     ],
    /// };
    /// let sorted = row.sorted_entries();
    /// assert_eq!(sorted[0].date, d(1));
    /// assert_eq!(sorted[1].date, d(3));
    /// ```
    pub fn sorted_entries(&self) -> Vec<LeaveEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|entry| entry.date);
        entries
    }
}

/// A full time-off report.
///
/// A report with no employee rows at all is the sentinel the leave source
/// returns when it could not produce a trustworthy report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveReport {
    /// One row per employee.
    #[serde(default)]
    pub employees: Vec<EmployeeLeave>,
}

impl LeaveReport {
    /// Creates a report from employee rows.
    pub fn new(employees: Vec<EmployeeLeave>) -> Self {
        Self { employees }
    }

    /// Returns true if the report carries no employee rows.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Total number of leave entries across all employees.
    pub fn entry_count(&self) -> usize {
        self.employees.iter().map(|e| e.entries.len()).sum()
    }
}
