//! Reconciliation of a leave report against a calendar.
//!
//! This module contains period merging, event identity derivation, calendar
//! state indexing, and the engine that ties them together into a plan of
//! creates and deletes.

mod engine;
mod identity;
mod index;
mod merge;

pub use engine::{DeleteReason, EventDeletion, ReconciliationPlan, Reconciler};
pub use identity::{
    ContentKey, DefaultIdentity, EventIdentity, IdentityScheme, KEY_DATE_FORMAT, event_identity,
};
pub use index::{CalendarIndex, IndexedEvent};
pub use merge::{TimeOffPeriods, merge_periods};
