//! Schema contract for the climate dataset
//!
//! The adapter never introspects the file to discover record shapes. The
//! two tables and the columns it reads are declared here, and `verify`
//! checks an opened file against that declaration once at startup.

use crate::store::{StoreError, StoreResult};
use rusqlite::Connection;

/// Table holding one row per station per date
pub const MEASUREMENT_TABLE: &str = "measurement";

/// Table holding station metadata
pub const STATION_TABLE: &str = "station";

/// Columns of `measurement` read by the adapter
pub const MEASUREMENT_COLUMNS: &[&str] = &["station", "date", "prcp", "tobs"];

/// Columns of `station` read by the adapter
pub const STATION_COLUMNS: &[&str] = &["station", "name", "latitude", "longitude", "elevation"];

/// DDL matching the layout of the published Hawaii dataset.
///
/// Dates are `TEXT` in `YYYY-MM-DD` form so that string comparison is
/// calendar comparison.
pub const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp FLOAT,
        tobs FLOAT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS station (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude FLOAT NOT NULL,
        longitude FLOAT NOT NULL,
        elevation FLOAT NOT NULL
    );
";

/// Check that both tables exist and carry every declared column
pub fn verify(conn: &Connection) -> StoreResult<()> {
    for (table, columns) in [
        (MEASUREMENT_TABLE, MEASUREMENT_COLUMNS),
        (STATION_TABLE, STATION_COLUMNS),
    ] {
        let present = table_columns(conn, table)?;

        if present.is_empty() {
            return Err(StoreError::Schema(format!("table '{}' not found", table)));
        }

        if let Some(missing) = columns
            .iter()
            .find(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
        {
            return Err(StoreError::Schema(format!(
                "table '{}' is missing column '{}'",
                table, missing
            )));
        }
    }

    Ok(())
}

/// Column names of a table, empty if the table does not exist
fn table_columns(conn: &Connection, table: &str) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(columns)
}
