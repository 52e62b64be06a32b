//! API handlers for the Web API.

pub mod mail;
pub mod user;

pub use mail::*;
pub use user::*;

use std::sync::Arc;

use crate::config::ProvisionConfig;
use crate::db::Database;

/// Shared database handle for handlers.
pub type SharedDatabase = Arc<Database>;

/// Application state shared by all handlers.
pub struct AppState {
    /// Database handle.
    pub db: SharedDatabase,
    /// Auto-provisioning settings.
    pub provision: ProvisionConfig,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: SharedDatabase, provision: ProvisionConfig) -> Self {
        Self { db, provision }
    }
}
