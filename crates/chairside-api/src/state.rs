//! Shared application state.

use std::sync::{Arc, Mutex, MutexGuard};

use chairside_core::Database;

use crate::error::ApiError;

/// State handed to every handler.
///
/// A single SQLite connection serves all requests; each handler takes the
/// lock for the duration of its own storage work.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Lock the database for one request.
    pub fn db(&self) -> Result<MutexGuard<'_, Database>, ApiError> {
        self.db
            .lock()
            .map_err(|e| ApiError::Internal(format!("Lock poisoned: {e}")))
    }
}
