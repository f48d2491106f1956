//! Climate Routes
//!
//! Read-only endpoints over the climate dataset.
//!
//! - GET /api/v1.0/precipitation - Last 12 months of precipitation
//! - GET /api/v1.0/stations - Distinct station ids
//! - GET /api/v1.0/tobs - Last 12 months of temperatures for the active station
//! - GET /api/v1.0/:start - Temperature stats from a date onward
//! - GET /api/v1.0/:start/:end - Temperature stats for an inclusive range

use axum::{
    extract::{path::ErrorKind, rejection::PathRejection, Path, State},
    http::Uri,
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::query::{self, DateField};
use crate::store::{PrecipitationReading, TemperatureReading, TemperatureStats};

/// GET /api/v1.0/precipitation
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PrecipitationReading>>> {
    let readings = state.query(|store| query::precipitation(store)).await?;
    Ok(Json(readings))
}

/// GET /api/v1.0/stations
pub async fn stations(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<String>>> {
    let ids = state.query(|store| query::stations(store)).await?;
    Ok(Json(ids))
}

/// GET /api/v1.0/tobs
///
/// Observations for the configured active station. A station with no
/// data produces an empty array.
pub async fn observations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TemperatureReading>>> {
    let active = state.active_station.clone();
    let readings = state
        .query(move |store| query::most_active_station_observations(store, &active))
        .await?;
    Ok(Json(readings))
}

/// GET /api/v1.0/:start
///
/// No upper bound: every row dated on or after `start`.
pub async fn temperature_from(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<TemperatureStats>> {
    let Path(start) = path.map_err(|rejection| rejected_date(rejection, &uri, 1))?;
    let stats = state
        .query(move |store| query::temperature_stats(store, &start, None))
        .await?;
    Ok(Json(stats))
}

/// GET /api/v1.0/:start/:end
pub async fn temperature_between(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    path: Result<Path<(String, String)>, PathRejection>,
) -> ApiResult<Json<TemperatureStats>> {
    let Path((start, end)) = path.map_err(|rejection| rejected_date(rejection, &uri, 2))?;
    let stats = state
        .query(move |store| query::temperature_stats(store, &start, Some(&end)))
        .await?;
    Ok(Json(stats))
}

/// Map a segment axum could not decode (e.g. invalid UTF-8) to the same
/// `INVALID_DATE` error a malformed date produces. `dates` is how many
/// trailing segments of the route are dates.
fn rejected_date(rejection: PathRejection, uri: &Uri, dates: usize) -> ApiError {
    let field = match &rejection {
        PathRejection::FailedToDeserializePathParams(err) => match err.kind() {
            ErrorKind::InvalidUtf8InPathParam { key } if key == "end" => DateField::End,
            _ => DateField::Start,
        },
        _ => DateField::Start,
    };
    tracing::debug!(%rejection, %field, "Date path segment rejected");

    let segments: Vec<&str> = uri.path().split('/').collect();
    let from_end = match field {
        DateField::Start => dates,
        DateField::End => 1,
    };
    let input = segments
        .len()
        .checked_sub(from_end)
        .and_then(|i| segments.get(i))
        .copied()
        .unwrap_or_default()
        .to_string();

    ApiError::InvalidDate { field, input }
}
