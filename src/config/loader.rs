//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{SyncError, SyncResult};

use super::types::{MAX_BATCH_SIZE, MAX_PAGE_SIZE, SyncConfig};

/// Loads and validates the service configuration.
///
/// # File Layout
///
/// ```text
/// leave_source:
///   url: https://example.workday.com/ccx/service/customreport2/acme/time_off?format=json
///   username: integration_user
///   password: secret
/// calendar:
///   calendar_id: out-of-office@group.calendar.google.com
///   access_token: ya29.token
/// schedule:
///   interval_secs: 3600
/// server:
///   port: 8080
/// ```
///
/// # Example
///
/// ```no_run
/// use leave_calendar_sync::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sync.yaml").unwrap();
/// println!("Calendar: {}", loader.config().calendar.calendar_id);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: SyncConfig,
}

impl ConfigLoader {
    /// Loads configuration from the file at `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing or unreadable
    /// - The file contains invalid YAML or is missing a required field
    /// - A value is out of range (see [`ConfigLoader::validate`])
    pub fn load<P: AsRef<Path>>(path: P) -> SyncResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| SyncError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    ///
    /// `origin` names the source in error messages.
    pub fn parse(content: &str, origin: &str) -> SyncResult<Self> {
        let config: SyncConfig =
            serde_yaml::from_str(content).map_err(|e| SyncError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(config: &SyncConfig) -> SyncResult<()> {
        if config.leave_source.url.trim().is_empty() {
            return Err(invalid("leave_source.url", "must not be empty"));
        }
        if config.calendar.calendar_id.trim().is_empty() {
            return Err(invalid("calendar.calendar_id", "must not be empty"));
        }
        if config.calendar.api_base_url.trim().is_empty() {
            return Err(invalid("calendar.api_base_url", "must not be empty"));
        }
        if config.calendar.batch_size == 0 || config.calendar.batch_size > MAX_BATCH_SIZE {
            return Err(invalid(
                "calendar.batch_size",
                format!("must be between 1 and {}", MAX_BATCH_SIZE),
            ));
        }
        if config.calendar.page_size == 0 || config.calendar.page_size > MAX_PAGE_SIZE {
            return Err(invalid(
                "calendar.page_size",
                format!("must be between 1 and {}", MAX_PAGE_SIZE),
            ));
        }
        if config.schedule.interval_secs == 0 {
            return Err(invalid("schedule.interval_secs", "must be greater than zero"));
        }
        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> SyncConfig {
        self.config
    }
}

fn invalid(field: &str, message: impl Into<String>) -> SyncError {
    SyncError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}
