//! # SurfsUp
//!
//! A read-only climate API over the Hawaii precipitation and temperature
//! dataset.
//!
//! ## Features
//!
//! - **Rolling windows**: 12 calendar months back from the dataset's own latest date
//! - **Strict input**: caller dates must be exactly `YYYY-MM-DD`
//! - **Scoped sessions**: one read-only SQLite connection per query, closed before responding
//! - **Declared schema**: record shapes are fixed and checked at startup
//!
//! ## Modules
//!
//! - [`store`]: Read-only SQLite adapter and record types
//! - [`query`]: The query service behind each endpoint
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use surfsup::query;
//! use surfsup::store::SqliteStore;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = SqliteStore::open("Resources/hawaii.sqlite")?;
//!
//!     let stats = query::temperature_stats(&store, "2016-08-23", Some("2017-08-23"))?;
//!     println!("min={:?} avg={:?} max={:?}", stats.tmin, stats.tavg, stats.tmax);
//!
//!     let rain = query::precipitation(&store)?;
//!     println!("{} precipitation readings in the last year", rain.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod query;
pub mod store;

// Re-export top-level types for convenience
pub use store::{
    ClimateStore, DatasetSummary, DateRange, Measurement, PrecipitationReading, SqliteStore,
    Station, StoreError, StoreResult, StoreSession, TemperatureReading, TemperatureStats,
};

pub use query::{ActiveStation, DateField, QueryError, QueryResult};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{
    ApiConfig, Config, ConfigError, LoggingConfig, ObservationsConfig, StoreConfig,
};
