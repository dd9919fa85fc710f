//! Leave report sources.
//!
//! A [`LeaveSource`] produces the authoritative time-off report for a pass
//! and owns the identity format used to match periods to calendar events.

mod workday;

use async_trait::async_trait;

use crate::models::LeaveReport;
use crate::reconcile::IdentityScheme;

pub use workday::{WorkdaySource, parse_workday_report};

/// Supplies the time-off report.
///
/// Implementations never return a partial report: any fetch or decode
/// failure is logged and surfaced as an empty [`LeaveReport`], which the
/// reconciler treats as "nothing to do this pass".
#[async_trait]
pub trait LeaveSource: IdentityScheme + Send + Sync {
    /// Fetches the current report.
    async fn fetch_report(&self) -> LeaveReport;
}
