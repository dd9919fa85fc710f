//! Configuration types for the sync service.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default Google Calendar v3 API root.
pub const DEFAULT_CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Default location stamped on created events.
pub const DEFAULT_EVENT_LOCATION: &str = "Out of Office";

/// Largest page the calendar list endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 2500;

/// Largest number of calendar writes grouped into one batch.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Connection settings for the time-off report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveSourceConfig {
    /// URL of the report, returning JSON.
    pub url: String,
    /// Basic-auth user name.
    #[serde(default)]
    pub username: Option<String>,
    /// Basic-auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl LeaveSourceConfig {
    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Settings for the target calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Root of the calendar REST API.
    #[serde(default = "default_calendar_api_url")]
    pub api_base_url: String,
    /// Identifier of the out-of-office calendar.
    pub calendar_id: String,
    /// OAuth bearer token for the calendar API.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Events requested per list page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Writes grouped per batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Events whose summary or location contains one of these are managed,
    /// as are events carrying `event_location`. An empty list manages every
    /// event in the calendar.
    #[serde(default = "default_summary_markers")]
    pub summary_markers: Vec<String>,
    /// Location stamped on created events.
    #[serde(default = "default_event_location")]
    pub event_location: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CalendarConfig {
    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Pass scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Seconds to wait after a pass completes before starting the next.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl ScheduleConfig {
    /// The wait between passes.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// Status server binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `"{bind_address}:{port}"`.
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

/// The complete service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Time-off report connection.
    pub leave_source: LeaveSourceConfig,
    /// Target calendar.
    pub calendar: CalendarConfig,
    /// Pass scheduling.
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Status server.
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_calendar_api_url() -> String {
    DEFAULT_CALENDAR_API_URL.to_string()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_batch_size() -> usize {
    500
}

fn default_summary_markers() -> Vec<String> {
    [
        "Out of office",
        "Out of Office",
        "Professional Development",
        "Work From Home",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_event_location() -> String {
    DEFAULT_EVENT_LOCATION.to_string()
}

fn default_interval_secs() -> u64 {
    60 * 60
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}
