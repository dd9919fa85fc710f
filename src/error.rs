//! Error types for the leave calendar sync service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration,
//! reading external data, and reconciling the calendar.

use thiserror::Error;

/// The main error type for the sync service.
///
/// # Example
///
/// ```
/// use leave_calendar_sync::error::SyncError;
///
/// let error = SyncError::ConfigNotFound {
///     path: "/missing/sync.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/sync.yaml");
/// ```
#[derive(Debug, Error)]
pub enum SyncError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field, dotted from the document root.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// An existing calendar event carries neither a date nor a date-time.
    #[error("Calendar event '{event_id}' has no date information on its {field}")]
    MissingEventDate {
        /// The calendar id of the malformed event.
        event_id: String,
        /// Which boundary was missing (`start` or `end`).
        field: &'static str,
    },

    /// The leave report could not be fetched or decoded.
    #[error("Leave source error: {message}")]
    LeaveSource {
        /// A description of the failure.
        message: String,
    },

    /// A calendar API call failed.
    #[error("Calendar error: {message}")]
    Calendar {
        /// A description of the failure.
        message: String,
    },
}

impl SyncError {
    /// Builds a [`SyncError::Calendar`] from anything displayable.
    pub fn calendar(message: impl Into<String>) -> Self {
        SyncError::Calendar {
            message: message.into(),
        }
    }

    /// Builds a [`SyncError::LeaveSource`] from anything displayable.
    pub fn leave_source(message: impl Into<String>) -> Self {
        SyncError::LeaveSource {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return SyncError.
pub type SyncResult<T> = Result<T, SyncError>;
