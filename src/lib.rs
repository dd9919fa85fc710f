//! Leave calendar sync
//!
//! Keeps a shared out-of-office calendar in step with a time-off report.
//! Each pass merges the report's daily leave entries into periods, matches
//! them against the calendar's events by identity, creates what is missing,
//! and removes duplicates and events no longer backed by the report.

#![warn(missing_docs)]

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod source;
pub mod sync;
