//! Record types for the climate dataset
//!
//! Statically declared shapes for the two stored tables and for the
//! result sets the query service hands back:
//! - `Measurement`: one station reading on one calendar date
//! - `Station`: a weather-observation site
//! - `PrecipitationReading`, `TemperatureReading`, `TemperatureStats`: query results
//! - `DateRange`: inclusive date bounds, open-ended when `end` is `None`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single row of the `measurement` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Measurement {
    /// Station identifier (e.g. "USC00519281")
    pub station: String,
    /// Calendar date of the reading
    pub date: NaiveDate,
    /// Precipitation in inches, absent when not recorded
    pub precipitation: Option<f64>,
    /// Observed temperature in degrees Fahrenheit
    pub temperature_observation: f64,
}

/// A single row of the `station` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    /// Station identifier, matches `Measurement::station`
    pub id: String,
    /// Human-readable site name
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in feet
    pub elevation: f64,
}

/// Date/precipitation pair returned by the precipitation query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrecipitationReading {
    pub date: NaiveDate,
    pub precipitation: f64,
}

/// Date/temperature pair returned by the observations query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemperatureReading {
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Min/max/average temperature over a date range
///
/// All three fields are `None` when the range holds no rows; an empty
/// aggregate is never reported as zero.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TemperatureStats {
    pub tmin: Option<f64>,
    pub tmax: Option<f64>,
    pub tavg: Option<f64>,
}

impl TemperatureStats {
    /// True when the underlying range matched no rows
    pub fn is_empty(&self) -> bool {
        self.tmin.is_none() && self.tmax.is_none() && self.tavg.is_none()
    }
}

/// Inclusive date range, unbounded above when `end` is `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Range from `start` with no upper bound
    pub fn from(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Range covering `start..=end`
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}..={}", self.start, end),
            None => write!(f, "{}..", self.start),
        }
    }
}

/// Overview of the loaded dataset, used by health checks and `surfsup check`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetSummary {
    /// Rows in the `station` table
    pub stations: usize,
    /// Rows in the `measurement` table
    pub measurements: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl std::fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} stations, {} measurements",
            self.stations, self.measurements
        )?;
        if let (Some(first), Some(last)) = (self.first_date, self.last_date) {
            write!(f, ", {} to {}", first, last)?;
        }
        Ok(())
    }
}
