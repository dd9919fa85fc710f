//! Shared state for the status API.

use std::sync::Arc;

use crate::sync::SyncService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    service: Arc<SyncService>,
}

impl AppState {
    /// Creates state around the service the scheduler also drives.
    pub fn new(service: Arc<SyncService>) -> Self {
        Self { service }
    }

    /// The sync service.
    pub fn service(&self) -> &SyncService {
        &self.service
    }
}
