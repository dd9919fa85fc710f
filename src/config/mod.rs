//! Configuration loading and management for the sync service.
//!
//! This module loads the service configuration from a YAML file: the leave
//! report connection, the target calendar, the pass schedule, and the status
//! server binding.
//!
//! # Example
//!
//! ```no_run
//! use leave_calendar_sync::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sync.yaml").unwrap();
//! println!("Syncing into: {}", config.config().calendar.calendar_id);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalendarConfig, DEFAULT_CALENDAR_API_URL, DEFAULT_EVENT_LOCATION, LeaveSourceConfig,
    MAX_BATCH_SIZE, MAX_PAGE_SIZE, ScheduleConfig, ServerConfig, SyncConfig,
};
