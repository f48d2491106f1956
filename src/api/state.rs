//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::api::error::{ApiError, ApiResult};
use crate::config::ApiConfig;
use crate::query::{ActiveStation, QueryResult};
use crate::store::SqliteStore;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only dataset handle, injected into every query
    pub store: Arc<SqliteStore>,
    /// Station reported by `/tobs`
    pub active_station: ActiveStation,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the pinned default station
    pub fn new(store: Arc<SqliteStore>, config: ApiConfig) -> Self {
        Self::with_active_station(store, config, ActiveStation::default())
    }

    /// Create AppState with an explicit active-station policy
    pub fn with_active_station(
        store: Arc<SqliteStore>,
        config: ApiConfig,
        active_station: ActiveStation,
    ) -> Self {
        Self {
            store,
            active_station,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Run a blocking query against the store off the async runtime
    pub async fn query<T, F>(&self, f: F) -> ApiResult<T>
    where
        F: FnOnce(&SqliteStore) -> QueryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);

        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| ApiError::Internal(format!("Query task failed: {}", e)))?
            .map_err(ApiError::from)
    }
}
