//! HTTP status API.
//!
//! Exposes liveness, the last pass report, and a manual trigger that goes
//! through the same single-flight guard as the scheduler.

mod handlers;
mod response;
mod state;

pub use handlers::create_router;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
