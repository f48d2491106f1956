//! SurfsUp Data Store
//!
//! Read-only access to the climate dataset:
//!
//! - **types**: Record shapes (Measurement, Station) and query results
//! - **schema**: The declared table layout and its startup check
//! - **sqlite**: `SqliteStore`, the rusqlite-backed adapter
//! - **error**: Error types
//!
//! # Sessions
//!
//! ```text
//! SqliteStore (path only) ──open_session()──▶ SqliteSession (one connection)
//!                                                 │
//!                                       queries, then drop = close
//! ```
//!
//! Query code is written against the `ClimateStore` and `StoreSession`
//! traits, so the adapter can be swapped for a test double.

pub mod error;
pub mod schema;
pub mod sqlite;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::{StoreError, StoreResult};
pub use sqlite::{SqliteSession, SqliteStore};
pub use types::{
    DatasetSummary, DateRange, Measurement, PrecipitationReading, Station, TemperatureReading,
    TemperatureStats,
};

use chrono::NaiveDate;

/// A dataset that can hand out read-only sessions
pub trait ClimateStore: Send + Sync {
    type Session: StoreSession;

    /// Open a session; it is released when the returned value is dropped
    fn open_session(&self) -> StoreResult<Self::Session>;
}

/// Filter and aggregate queries available within one session
pub trait StoreSession {
    /// Most recent measurement date, optionally restricted to one station
    fn latest_date(&self, station: Option<&str>) -> StoreResult<Option<NaiveDate>>;

    /// Non-null precipitation readings dated on or after `cutoff`
    fn precipitation_since(&self, cutoff: NaiveDate) -> StoreResult<Vec<PrecipitationReading>>;

    /// Distinct station ids appearing in the measurement table
    fn station_ids(&self) -> StoreResult<Vec<String>>;

    /// Station with the most measurement rows, ties broken by smallest id
    fn most_active_station(&self) -> StoreResult<Option<String>>;

    /// Temperature readings for one station dated on or after `since`
    fn temperature_observations(
        &self,
        station: &str,
        since: NaiveDate,
    ) -> StoreResult<Vec<TemperatureReading>>;

    /// MIN/MAX/AVG of temperature over a date range
    fn temperature_stats(&self, range: DateRange) -> StoreResult<TemperatureStats>;

    /// Station metadata, ordered by id
    fn stations(&self) -> StoreResult<Vec<Station>>;

    /// Row counts and date span of the dataset
    fn summary(&self) -> StoreResult<DatasetSummary>;
}
