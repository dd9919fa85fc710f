//! Property-based tests for period merging and reconciliation.
//!
//! These check invariants that hold for any leave report and any starting
//! calendar, not just the hand-written cases in the unit tests.

use std::collections::{BTreeMap, HashSet};

use chrono::{Days, NaiveDate};
use proptest::prelude::*;

use leave_calendar_sync::models::{CalendarEvent, EmployeeLeave, LeaveEntry, LeaveReport};
use leave_calendar_sync::reconcile::{DefaultIdentity, ReconciliationPlan, Reconciler, merge_periods};

const LOCATION: &str = "Out of Office";

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn day(offset: u32) -> NaiveDate {
    base_date() + Days::new(u64::from(offset))
}

fn arb_leave_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("Vacation"), Just("Sick")]
}

/// Distinct leave days for one employee, keyed by offset from the base date.
fn arb_days() -> impl Strategy<Value = BTreeMap<u32, &'static str>> {
    proptest::collection::btree_map(0u32..40, arb_leave_type(), 0..15)
}

fn to_entries(name: &str, days: &BTreeMap<u32, &'static str>) -> Vec<LeaveEntry> {
    days.iter()
        .map(|(&offset, &leave_type)| LeaveEntry::new(name, leave_type, day(offset)))
        .collect()
}

fn arb_report() -> impl Strategy<Value = LeaveReport> {
    (arb_days(), arb_days()).prop_map(|(alice, bob)| {
        LeaveReport::new(vec![
            EmployeeLeave {
                employee_name: "Alice".to_string(),
                entries: to_entries("Alice", &alice),
            },
            EmployeeLeave {
                employee_name: "Bob".to_string(),
                entries: to_entries("Bob", &bob),
            },
        ])
    })
}

fn arb_summary() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("Alice - Vacation"),
        Just("Alice - Sick"),
        Just("Bob - Sick"),
        Just("Team offsite"),
    ]
}

/// Existing calendar events, possibly duplicated, stale, or unparseable.
fn arb_existing() -> impl Strategy<Value = Vec<CalendarEvent>> {
    proptest::collection::vec((arb_summary(), 0u32..40, 0u32..5), 0..20).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (summary, start, len))| {
                CalendarEvent::all_day(format!("e{}", i), summary, day(start), day(start + len))
            })
            .collect()
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn reconcile(report: &LeaveReport, existing: &[CalendarEvent]) -> ReconciliationPlan {
    Reconciler::new(&DefaultIdentity, LOCATION)
        .reconcile(report, existing)
        .unwrap()
}

/// The calendar after a plan is applied in full.
fn apply(existing: &[CalendarEvent], plan: &ReconciliationPlan) -> Vec<CalendarEvent> {
    let deleted: HashSet<&str> = plan.to_delete.iter().map(|d| d.event.id.as_str()).collect();
    let mut after: Vec<CalendarEvent> = existing
        .iter()
        .filter(|e| !deleted.contains(e.id.as_str()))
        .cloned()
        .collect();
    for (i, new) in plan.to_create.iter().enumerate() {
        after.push(CalendarEvent::all_day(
            format!("new-{}", i),
            new.summary.as_str(),
            new.start_date,
            new.end_date,
        ));
    }
    after
}

fn contents(events: &[CalendarEvent]) -> Vec<(String, NaiveDate, NaiveDate)> {
    let mut contents: Vec<_> = events
        .iter()
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

fn expected_contents(report: &LeaveReport) -> Vec<(String, NaiveDate, NaiveDate)> {
    let mut expected: Vec<_> = report
        .employees
        .iter()
        .flat_map(|employee| merge_periods(&employee.entries).collect::<Vec<_>>())
        .map(|p| (p.summary(), p.start_date, p.end_date))
        .collect();
    expected.sort();
    expected
}

// ---------------------------------------------------------------------------
// Merge invariants
// ---------------------------------------------------------------------------

proptest! {
    /// Every entry lands in exactly one period.
    #[test]
    fn prop_periods_cover_every_entry(days in arb_days()) {
        let entries = to_entries("Alice", &days);
        let covered: i64 = merge_periods(&entries)
            .map(|p| {
                if p.start_date == p.end_date {
                    1
                } else {
                    (p.end_date - p.start_date).num_days()
                }
            })
            .sum();
        prop_assert_eq!(covered, entries.len() as i64);
    }

    /// Multi-day periods have an exclusive end of at least two days out.
    #[test]
    fn prop_period_bounds_are_well_formed(days in arb_days()) {
        let entries = to_entries("Alice", &days);
        for period in merge_periods(&entries) {
            if period.start_date != period.end_date {
                prop_assert!((period.end_date - period.start_date).num_days() >= 2);
            }
        }
    }

    /// Adjacent periods could not have been merged further.
    #[test]
    fn prop_adjacent_periods_are_maximal(days in arb_days()) {
        let entries = to_entries("Alice", &days);
        let periods: Vec<_> = merge_periods(&entries).collect();
        for pair in periods.windows(2) {
            let last_day = if pair[0].start_date == pair[0].end_date {
                pair[0].end_date
            } else {
                pair[0].end_date - Days::new(1)
            };
            let contiguous = (pair[1].start_date - last_day).num_days() == 1;
            prop_assert!(!contiguous || pair[0].leave_type != pair[1].leave_type);
            prop_assert!(pair[1].start_date > last_day);
        }
    }
}

// ---------------------------------------------------------------------------
// Reconciliation invariants
// ---------------------------------------------------------------------------

proptest! {
    /// Applying a plan leaves exactly one event per period.
    #[test]
    fn prop_applied_plan_matches_report(report in arb_report(), existing in arb_existing()) {
        let plan = reconcile(&report, &existing);
        let after = apply(&existing, &plan);
        prop_assert_eq!(contents(&after), expected_contents(&report));
    }

    /// A second pass over the converged calendar has nothing to do.
    #[test]
    fn prop_reconcile_is_idempotent(report in arb_report(), existing in arb_existing()) {
        let plan = reconcile(&report, &existing);
        let after = apply(&existing, &plan);
        let second = reconcile(&report, &after);
        prop_assert!(second.is_empty(), "second plan was {:?}", second);
    }

    /// Nothing the plan creates is already in the calendar.
    #[test]
    fn prop_creates_are_new(report in arb_report(), existing in arb_existing()) {
        let plan = reconcile(&report, &existing);
        let present: HashSet<_> = contents(&existing).into_iter().collect();
        for new in &plan.to_create {
            prop_assert!(!present.contains(&(new.summary.clone(), new.start_date, new.end_date)));
        }
    }

    /// An empty report never deletes anything.
    #[test]
    fn prop_empty_report_is_a_no_op(existing in arb_existing()) {
        let plan = reconcile(&LeaveReport::default(), &existing);
        prop_assert!(plan.is_empty());
    }
}
