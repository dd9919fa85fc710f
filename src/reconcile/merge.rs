//! Period merging.
//!
//! Groups one employee's leave entries into maximal runs of consecutive
//! days with the same leave type.

use std::iter::Peekable;
use std::slice;

use chrono::Days;

use crate::models::{LeaveEntry, TimeOffPeriod};

/// Lazy iterator over the periods of one employee's leave entries.
///
/// Created by [`merge_periods`].
#[derive(Debug, Clone)]
pub struct TimeOffPeriods<'a> {
    entries: Peekable<slice::Iter<'a, LeaveEntry>>,
}

/// Merges leave entries into time-off periods.
///
/// Entries are scanned in the order given. A new period starts at every
/// entry whose date is not exactly one day after the previous entry's date,
/// or whose leave type differs from it. Callers are expected to pass
/// date-sorted entries (see [`EmployeeLeave::sorted_entries`]); unsorted
/// input is merged as-is.
///
/// A run spanning two or more days ends one day past its last entry; a
/// single-entry run ends on its start date.
///
/// [`EmployeeLeave::sorted_entries`]: crate::models::EmployeeLeave::sorted_entries
///
/// # Example
///
/// ```
/// use leave_calendar_sync::models::LeaveEntry;
/// use leave_calendar_sync::reconcile::merge_periods;
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let entries = vec![
///     LeaveEntry::new("Alice", "Vacation", d(1)),
///     LeaveEntry::new("Alice", "Vacation", d(2)),
///     LeaveEntry::new("Alice", "Vacation", d(3)),
/// ];
///
/// let periods: Vec<_> = merge_periods(&entries).collect();
/// assert_eq!(periods.len(), 1);
/// assert_eq!(periods[0].start_date, d(1));
/// assert_eq!(periods[0].end_date, d(4));
/// ```
pub fn merge_periods(entries: &[LeaveEntry]) -> TimeOffPeriods<'_> {
    TimeOffPeriods {
        entries: entries.iter().peekable(),
    }
}

impl Iterator for TimeOffPeriods<'_> {
    type Item = TimeOffPeriod;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.entries.next()?;
        let mut last = first;
        while let Some(entry) = self.entries.next_if(|next| is_sequential(last, next)) {
            last = entry;
        }
        Some(period_from_run(first, last))
    }
}

/// Two entries continue the same run when `next` falls exactly one day after
/// `previous` and carries the same leave type.
fn is_sequential(previous: &LeaveEntry, next: &LeaveEntry) -> bool {
    (next.date - previous.date).num_days() == 1 && next.leave_type == previous.leave_type
}

fn period_from_run(first: &LeaveEntry, last: &LeaveEntry) -> TimeOffPeriod {
    let end_date = if (last.date - first.date).num_days() >= 1 {
        last.date.checked_add_days(Days::new(1)).unwrap_or(last.date)
    } else {
        last.date
    };

    TimeOffPeriod {
        employee_name: first.employee_name.clone(),
        leave_type: last.leave_type.clone(),
        start_date: first.date,
        end_date,
    }
}
