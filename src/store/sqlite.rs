//! SQLite adapter for the climate dataset
//!
//! `SqliteStore` only remembers where the file is. Every call to
//! `open_session` opens a fresh read-only connection, and the connection
//! is closed when the returned `SqliteSession` is dropped, so a session
//! never outlives the request that opened it.

use crate::store::{
    schema, ClimateStore, DatasetSummary, DateRange, PrecipitationReading, Station, StoreError,
    StoreResult, StoreSession, TemperatureReading, TemperatureStats,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default time to wait on a locked database file
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Handle to a read-only SQLite dataset
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteStore {
    /// Open a dataset and verify it against the schema contract
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open a dataset with a custom busy timeout
    pub fn open_with_timeout(path: impl AsRef<Path>, busy_timeout: Duration) -> StoreResult<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout,
        };

        let session = store.open_session()?;
        schema::verify(&session.conn)?;

        tracing::debug!(path = ?store.path, "Dataset schema verified");
        Ok(store)
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ClimateStore for SqliteStore {
    type Session = SqliteSession;

    fn open_session(&self) -> StoreResult<SqliteSession> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StoreError::Open {
            path: self.path.clone(),
            source,
        })?;

        conn.busy_timeout(self.busy_timeout)?;

        Ok(SqliteSession { conn })
    }
}

/// A single read-only connection, closed on drop
pub struct SqliteSession {
    conn: Connection,
}

impl StoreSession for SqliteSession {
    fn latest_date(&self, station: Option<&str>) -> StoreResult<Option<NaiveDate>> {
        let latest = match station {
            Some(station) => self.conn.query_row(
                "SELECT MAX(date) FROM measurement WHERE station = ?1",
                [station],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?,
        };

        Ok(latest)
    }

    fn precipitation_since(&self, cutoff: NaiveDate) -> StoreResult<Vec<PrecipitationReading>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT date, prcp FROM measurement
             WHERE date >= ?1 AND prcp IS NOT NULL",
        )?;

        let readings = stmt
            .query_map(params![cutoff], |row| {
                Ok(PrecipitationReading {
                    date: row.get(0)?,
                    precipitation: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(readings)
    }

    fn station_ids(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT station FROM measurement GROUP BY station")?;

        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;

        Ok(ids)
    }

    fn most_active_station(&self) -> StoreResult<Option<String>> {
        let station = self
            .conn
            .query_row(
                "SELECT station FROM measurement
                 GROUP BY station
                 ORDER BY COUNT(*) DESC, station ASC
                 LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(station)
    }

    fn temperature_observations(
        &self,
        station: &str,
        since: NaiveDate,
    ) -> StoreResult<Vec<TemperatureReading>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT date, tobs FROM measurement
             WHERE station = ?1 AND date >= ?2",
        )?;

        let readings = stmt
            .query_map(params![station, since], |row| {
                Ok(TemperatureReading {
                    date: row.get(0)?,
                    temperature: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(readings)
    }

    fn temperature_stats(&self, range: DateRange) -> StoreResult<TemperatureStats> {
        let stats = self.conn.query_row(
            "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement
             WHERE date >= ?1 AND (?2 IS NULL OR date <= ?2)",
            params![range.start, range.end],
            |row| {
                Ok(TemperatureStats {
                    tmin: row.get(0)?,
                    tmax: row.get(1)?,
                    tavg: row.get(2)?,
                })
            },
        )?;

        Ok(stats)
    }

    fn stations(&self) -> StoreResult<Vec<Station>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT station, name, latitude, longitude, elevation FROM station
             ORDER BY station",
        )?;

        let stations = stmt
            .query_map([], |row| {
                Ok(Station {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    latitude: row.get(2)?,
                    longitude: row.get(3)?,
                    elevation: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(stations)
    }

    fn summary(&self) -> StoreResult<DatasetSummary> {
        let stations: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM station", [], |row| row.get(0))?;

        let (measurements, first_date, last_date): (i64, Option<NaiveDate>, Option<NaiveDate>) =
            self.conn.query_row(
                "SELECT COUNT(*), MIN(date), MAX(date) FROM measurement",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

        Ok(DatasetSummary {
            stations: stations as usize,
            measurements: measurements as usize,
            first_date,
            last_date,
        })
    }
}
