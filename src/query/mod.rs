//! SurfsUp Query Service
//!
//! Computes the result sets behind each API endpoint.
//!
//! # Queries
//!
//! - `precipitation`: last 12 months of non-null precipitation
//! - `stations`: distinct station ids
//! - `most_active_station_observations`: last 12 months of temperatures for one station
//! - `temperature_stats`: MIN/AVG/MAX temperature over a caller-supplied range
//!
//! # Rolling windows
//!
//! Windows are anchored on the dataset's own latest date, not on today:
//!
//! ```text
//! latest = MAX(date)            2017-08-23
//! cutoff = latest - 12 months   2016-08-23   (calendar months, not 365 days)
//! rows   = date >= cutoff
//! ```

pub mod dates;
pub mod error;
pub mod service;

pub use dates::{months_before, parse_date, rolling_window_start, DATE_FORMAT, ROLLING_WINDOW_MONTHS};
pub use error::{DateField, QueryError, QueryResult};
pub use service::{
    list_routes, most_active_station_observations, precipitation, station_metadata, stations,
    summary, temperature_stats, ActiveStation, API_ROUTES, DEFAULT_ACTIVE_STATION,
};
