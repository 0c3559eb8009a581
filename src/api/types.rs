//! Shared state for the API router.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::advisor::ReferenceData;
use crate::api::error::ApiError;
use crate::upstream::AdvisorClient;

/// Shared context for all API routes and middleware.
///
/// Handlers take the database guard in a scope that ends before any
/// `.await`, so the mutex is never held across suspension points.
#[derive(Clone)]
pub struct ApiContext {
    db: Arc<Mutex<Connection>>,
    pub reference: Arc<ReferenceData>,
    pub advisor: Option<Arc<AdvisorClient>>,
    pub api_token: Arc<String>,
}

impl ApiContext {
    pub fn new(
        db: Connection,
        reference: ReferenceData,
        advisor: Option<AdvisorClient>,
        api_token: String,
    ) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            reference: Arc::new(reference),
            advisor: advisor.map(Arc::new),
            api_token: Arc::new(api_token),
        }
    }

    /// Lock the database. Poisoning means a handler panicked mid-query.
    pub fn db(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }
}
