//! Test fixtures: small SQLite datasets built from the schema contract

use crate::store::{schema, Measurement, Station};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Builds a dataset file row by row
#[derive(Default)]
pub struct DatasetBuilder {
    stations: Vec<Station>,
    measurements: Vec<Measurement>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn station(mut self, id: &str, name: &str) -> Self {
        self.stations.push(Station {
            id: id.to_string(),
            name: name.to_string(),
            latitude: 21.3,
            longitude: -157.8,
            elevation: 3.0,
        });
        self
    }

    pub fn measurement(
        mut self,
        station: &str,
        day: &str,
        precipitation: Option<f64>,
        temperature: f64,
    ) -> Self {
        self.measurements.push(Measurement {
            station: station.to_string(),
            date: date(day),
            precipitation,
            temperature_observation: temperature,
        });
        self
    }

    /// Write the dataset to `hawaii.sqlite` inside `dir`
    pub fn build(self, dir: &Path) -> PathBuf {
        let path = dir.join("hawaii.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(schema::SCHEMA_SQL).unwrap();

        for s in &self.stations {
            conn.execute(
                "INSERT INTO station (station, name, latitude, longitude, elevation)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![s.id, s.name, s.latitude, s.longitude, s.elevation],
            )
            .unwrap();
        }

        for m in &self.measurements {
            conn.execute(
                "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
                params![m.station, m.date, m.precipitation, m.temperature_observation],
            )
            .unwrap();
        }

        path
    }
}

/// Three stations, twelve measurements, latest date 2017-08-23.
///
/// USC00519281 has the most rows and its own latest date is 2017-08-18.
pub fn sample_dataset(dir: &Path) -> PathBuf {
    DatasetBuilder::new()
        .station("USC00519397", "WAIKIKI 717.2, HI US")
        .station("USC00513117", "KANEOHE 838.1, HI US")
        .station("USC00519281", "WAIHEE 837.5, HI US")
        .measurement("USC00519397", "2016-08-01", Some(0.08), 77.0)
        .measurement("USC00519397", "2016-08-23", Some(0.0), 81.0)
        .measurement("USC00519397", "2017-08-22", None, 82.0)
        .measurement("USC00519397", "2017-08-23", Some(0.0), 81.0)
        .measurement("USC00513117", "2016-08-22", Some(0.4), 76.0)
        .measurement("USC00513117", "2017-07-31", Some(0.02), 79.0)
        .measurement("USC00513117", "2017-08-23", Some(0.45), 82.0)
        .measurement("USC00519281", "2016-08-17", Some(0.01), 75.0)
        .measurement("USC00519281", "2016-08-18", Some(0.0), 80.0)
        .measurement("USC00519281", "2017-01-15", Some(0.12), 68.0)
        .measurement("USC00519281", "2017-05-10", None, 74.0)
        .measurement("USC00519281", "2017-08-18", Some(0.06), 79.0)
        .build(dir)
}
