//! Query Service
//!
//! The five climate queries, written against an injected `ClimateStore`.
//! Each call opens its own session and drops it before returning, on
//! success and on every error path alike.

use crate::query::dates::{parse_date, rolling_window_start};
use crate::query::{DateField, QueryResult};
use crate::store::{
    ClimateStore, DatasetSummary, DateRange, PrecipitationReading, Station, StoreSession,
    TemperatureReading, TemperatureStats,
};
use std::fmt;
use std::str::FromStr;

/// Station whose observations `/tobs` reports when the station is pinned
pub const DEFAULT_ACTIVE_STATION: &str = "USC00519281";

/// API routes listed on the index page, in display order
pub const API_ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// How the "most active" station is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveStation {
    /// Always use this station id
    Pinned(String),
    /// Use the station with the most measurement rows
    Computed,
}

impl Default for ActiveStation {
    fn default() -> Self {
        ActiveStation::Pinned(DEFAULT_ACTIVE_STATION.to_string())
    }
}

impl FromStr for ActiveStation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("computed") {
            Ok(ActiveStation::Computed)
        } else {
            Ok(ActiveStation::Pinned(s.to_string()))
        }
    }
}

impl fmt::Display for ActiveStation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveStation::Pinned(id) => write!(f, "{}", id),
            ActiveStation::Computed => write!(f, "computed"),
        }
    }
}

/// Route paths served by the API
pub fn list_routes() -> &'static [&'static str] {
    API_ROUTES
}

/// Non-null precipitation for the 12 months ending at the dataset's latest date
pub fn precipitation<S: ClimateStore>(store: &S) -> QueryResult<Vec<PrecipitationReading>> {
    let session = store.open_session()?;

    let Some(latest) = session.latest_date(None)? else {
        tracing::debug!("Dataset has no measurements, precipitation window is empty");
        return Ok(Vec::new());
    };

    let cutoff = rolling_window_start(latest);
    let readings = session.precipitation_since(cutoff)?;

    tracing::debug!(%latest, %cutoff, rows = readings.len(), "Precipitation query");
    Ok(readings)
}

/// Distinct station ids appearing in the measurements
pub fn stations<S: ClimateStore>(store: &S) -> QueryResult<Vec<String>> {
    let session = store.open_session()?;
    let ids = session.station_ids()?;

    tracing::debug!(count = ids.len(), "Stations query");
    Ok(ids)
}

/// Temperature observations of the most active station over its last 12 months
///
/// A station without rows yields an empty list.
pub fn most_active_station_observations<S: ClimateStore>(
    store: &S,
    active: &ActiveStation,
) -> QueryResult<Vec<TemperatureReading>> {
    let session = store.open_session()?;

    let station = match active {
        ActiveStation::Pinned(id) => id.clone(),
        ActiveStation::Computed => match session.most_active_station()? {
            Some(id) => id,
            None => {
                tracing::warn!("No measurements available to select an active station");
                return Ok(Vec::new());
            }
        },
    };

    let Some(latest) = session.latest_date(Some(&station))? else {
        tracing::warn!(station = %station, "Active station has no measurements");
        return Ok(Vec::new());
    };

    let cutoff = rolling_window_start(latest);
    let readings = session.temperature_observations(&station, cutoff)?;

    tracing::debug!(
        station = %station,
        %latest,
        %cutoff,
        rows = readings.len(),
        "Active station observations query"
    );
    Ok(readings)
}

/// Min/avg/max temperature from `start`, up to and including `end` when given
///
/// Both bounds are validated before the store is touched.
pub fn temperature_stats<S: ClimateStore>(
    store: &S,
    start: &str,
    end: Option<&str>,
) -> QueryResult<TemperatureStats> {
    let start = parse_date(DateField::Start, start)?;
    let range = match end {
        Some(end) => DateRange::between(start, parse_date(DateField::End, end)?),
        None => DateRange::from(start),
    };

    let session = store.open_session()?;
    let stats = session.temperature_stats(range)?;

    tracing::debug!(range = %range, empty = stats.is_empty(), "Temperature stats query");
    Ok(stats)
}

/// Row counts and date span of the dataset
pub fn summary<S: ClimateStore>(store: &S) -> QueryResult<DatasetSummary> {
    let session = store.open_session()?;
    Ok(session.summary()?)
}

/// Station metadata, ordered by id
pub fn station_metadata<S: ClimateStore>(store: &S) -> QueryResult<Vec<Station>> {
    let session = store.open_session()?;
    Ok(session.stations()?)
}
