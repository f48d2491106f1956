//! Data Transfer Objects
//!
//! Response types owned by the API layer. Query results are serialized
//! directly from the store's record types.

use serde::Serialize;

use crate::store::DatasetSummary;

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// "ok" or "error"
    pub store: String,
    /// Dataset overview, absent when the store cannot be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<DatasetSummary>,
    pub uptime_seconds: u64,
    pub version: String,
}
