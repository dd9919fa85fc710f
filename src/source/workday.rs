//! Workday custom-report adapter.
//!
//! Fetches a JSON custom report of employee time off over HTTP basic auth.
//! The report shape is:
//!
//! ```text
//! {
//!   "Report_Entry": [
//!     {
//!       "Name": "Alice Smith",
//!       "Time_Off_Request_group": [
//!         { "Time_Off_Entry": "2024-01-01-08:00", "Time_Off_Type": "Vacation" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::config::LeaveSourceConfig;
use crate::error::{SyncError, SyncResult};
use crate::models::{EmployeeLeave, LeaveEntry, LeaveReport};
use crate::reconcile::IdentityScheme;

use super::LeaveSource;

#[derive(Debug, Deserialize)]
struct WorkdayRoot {
    #[serde(rename = "Report_Entry")]
    report_entry: Vec<WorkdayReportEntry>,
}

#[derive(Debug, Deserialize)]
struct WorkdayReportEntry {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Time_Off_Request_group", default)]
    time_off_request_group: Option<Vec<WorkdayTimeOff>>,
}

#[derive(Debug, Deserialize)]
struct WorkdayTimeOff {
    #[serde(rename = "Time_Off_Entry", deserialize_with = "deserialize_report_date")]
    time_off_entry: NaiveDate,
    #[serde(rename = "Time_Off_Type")]
    time_off_type: String,
}

/// Report dates start with `yyyy-MM-dd`; anything after (a time, an offset)
/// is ignored since leave is whole-day.
fn deserialize_report_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid time off date: {}", raw)))
}

/// Decodes a Workday time-off report body.
///
/// # Example
///
/// ```
/// use leave_calendar_sync::source::parse_workday_report;
///
/// let body = r#"{"Report_Entry": [
///     {"Name": "Alice", "Time_Off_Request_group": [
///         {"Time_Off_Entry": "2024-01-01", "Time_Off_Type": "Vacation"}
///     ]},
///     {"Name": "Bob"}
/// ]}"#;
///
/// let report = parse_workday_report(body).unwrap();
/// assert_eq!(report.employees.len(), 2);
/// assert_eq!(report.entry_count(), 1);
/// ```
pub fn parse_workday_report(body: &str) -> SyncResult<LeaveReport> {
    let root: WorkdayRoot = serde_json::from_str(body)
        .map_err(|e| SyncError::leave_source(format!("invalid report body: {}", e)))?;

    let employees = root
        .report_entry
        .into_iter()
        .map(|row| {
            let entries = row
                .time_off_request_group
                .unwrap_or_default()
                .into_iter()
                .map(|request| {
                    LeaveEntry::new(row.name.clone(), request.time_off_type, request.time_off_entry)
                })
                .collect();
            EmployeeLeave {
                employee_name: row.name,
                entries,
            }
        })
        .collect();

    Ok(LeaveReport::new(employees))
}

/// Fetches the time-off report from a Workday custom report URL.
#[derive(Debug, Clone)]
pub struct WorkdaySource {
    client: reqwest::Client,
    config: LeaveSourceConfig,
}

impl WorkdaySource {
    /// Creates a source with its own HTTP client.
    pub fn new(config: LeaveSourceConfig) -> SyncResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SyncError::leave_source(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    async fn try_fetch(&self) -> SyncResult<LeaveReport> {
        let mut request = self.client.get(&self.config.url);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_deref());
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::leave_source(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::leave_source(format!(
                "report request returned HTTP {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SyncError::leave_source(format!("failed to read body: {}", e)))?;

        parse_workday_report(&body)
    }
}

impl IdentityScheme for WorkdaySource {}

#[async_trait]
impl LeaveSource for WorkdaySource {
    async fn fetch_report(&self) -> LeaveReport {
        match self.try_fetch().await {
            Ok(report) => {
                info!(
                    employees = report.employees.len(),
                    entries = report.entry_count(),
                    "Leave report fetched"
                );
                report
            }
            Err(err) => {
                warn!(error = %err, "Leave report unavailable, treating as empty");
                LeaveReport::default()
            }
        }
    }
}
