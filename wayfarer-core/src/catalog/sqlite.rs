//! SQLite-backed catalogue implementation.
//!
//! Rows are validated into [`Destination`] values when the catalogue is
//! opened, so scoring code downstream never sees an out-of-scale value.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

use crate::{Destination, Feature, FeatureValueError};

use super::{Catalog, CatalogError};

const SELECT_DESTINATIONS: &str = "SELECT id, city, country, flight_price, avg_budget_per_day, \
     safety, english_level, crowds, beach, culture, nature, food, nightlife, \
     adventure, romance, family \
     FROM destinations ORDER BY id";

/// Error raised when opening or reading a destination database.
#[derive(Debug, Error)]
pub enum SqliteCatalogError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A row carried an id outside the unsigned range.
    #[error("destination id {id} is out of range")]
    IdOutOfRange {
        /// Raw signed id from the database.
        id: i64,
    },
    /// A stored feature value failed validation.
    #[error("destination {id} carries an invalid feature value")]
    InvalidFeature {
        /// Identifier of the offending row.
        id: u64,
        /// The validation failure.
        #[source]
        source: FeatureValueError,
    },
    /// Generic SQLite error when reading destination rows.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Read-only catalogue backed by a `destinations` table.
pub struct SqliteCatalog {
    destinations: Vec<Destination>,
}

impl fmt::Debug for SqliteCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalog")
            .field("entries", &self.destinations.len())
            .finish_non_exhaustive()
    }
}

impl SqliteCatalog {
    /// Open a catalogue and eagerly load every validated destination.
    ///
    /// # Errors
    /// Returns [`SqliteCatalogError`] when the database cannot be opened,
    /// queried, or a row fails validation.
    pub fn open<P: AsRef<Path>>(database_path: P) -> Result<Self, SqliteCatalogError> {
        let database_path = database_path.as_ref();
        let connection =
            Connection::open_with_flags(database_path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| SqliteCatalogError::OpenDatabase {
                    path: database_path.to_path_buf(),
                    source,
                },
            )?;
        let destinations = load_destinations(&connection)?;
        Ok(Self { destinations })
    }

    /// Number of destinations in the catalogue.
    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    /// Whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

impl Catalog for SqliteCatalog {
    fn all(&self) -> Result<Vec<Destination>, CatalogError> {
        Ok(self.destinations.clone())
    }
}

/// Column order mirrors `SELECT_DESTINATIONS` from index 5 onwards.
const FEATURE_COLUMNS: [Feature; 11] = [
    Feature::Safety,
    Feature::EnglishLevel,
    Feature::Crowds,
    Feature::Beach,
    Feature::Culture,
    Feature::Nature,
    Feature::Food,
    Feature::Nightlife,
    Feature::Adventure,
    Feature::Romance,
    Feature::Family,
];

struct RawRow {
    id: i64,
    city: String,
    country: String,
    flight_price: Option<f64>,
    daily_budget: Option<f64>,
    features: Vec<Option<f64>>,
}

fn load_destinations(connection: &Connection) -> Result<Vec<Destination>, SqliteCatalogError> {
    let mut statement = connection.prepare(SELECT_DESTINATIONS)?;
    let rows = statement.query_map([], |row| {
        let mut features = Vec::with_capacity(FEATURE_COLUMNS.len());
        for (offset, _) in FEATURE_COLUMNS.iter().enumerate() {
            features.push(row.get::<_, Option<f64>>(5 + offset)?);
        }
        Ok(RawRow {
            id: row.get(0)?,
            city: row.get(1)?,
            country: row.get(2)?,
            flight_price: row.get(3)?,
            daily_budget: row.get(4)?,
            features,
        })
    })?;

    let mut destinations = Vec::new();
    for row in rows {
        destinations.push(into_destination(row?)?);
    }
    Ok(destinations)
}

fn into_destination(row: RawRow) -> Result<Destination, SqliteCatalogError> {
    let id = u64::try_from(row.id).map_err(|_| SqliteCatalogError::IdOutOfRange { id: row.id })?;
    let mut dest = Destination::new(id, row.city, row.country);
    if let Some(flight) = row.flight_price {
        dest.flight_price = Some(flight as f32);
    }
    let invalid = |source| SqliteCatalogError::InvalidFeature { id, source };
    if let Some(daily) = row.daily_budget {
        dest.set_feature(Feature::DailyBudget, daily as f32)
            .map_err(invalid)?;
    }
    for (feature, value) in FEATURE_COLUMNS.iter().zip(row.features) {
        if let Some(value) = value {
            dest.set_feature(*feature, value as f32).map_err(invalid)?;
        }
    }
    Ok(dest)
}

impl From<SqliteCatalogError> for CatalogError {
    fn from(err: SqliteCatalogError) -> Self {
        match err {
            SqliteCatalogError::InvalidFeature { id, source } => {
                Self::InvalidDestination { id, source }
            }
            other => Self::Storage {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn seed_database(path: &Path, rows: &[(i64, f64, f64)]) {
        let connection = Connection::open(path).expect("open sqlite database");
        connection
            .execute(
                "CREATE TABLE destinations (
                    id INTEGER PRIMARY KEY,
                    city TEXT,
                    country TEXT,
                    flight_price REAL,
                    avg_budget_per_day REAL,
                    safety REAL,
                    english_level REAL,
                    crowds REAL,
                    beach REAL,
                    culture REAL,
                    nature REAL,
                    food REAL,
                    nightlife REAL,
                    adventure REAL,
                    romance REAL,
                    family REAL
                )",
                [],
            )
            .expect("create destinations table");
        for (id, beach, budget) in rows {
            connection
                .execute(
                    "INSERT INTO destinations (id, city, country, beach, avg_budget_per_day)
                     VALUES (?1, 'City', 'Country', ?2, ?3)",
                    (id, beach, budget),
                )
                .expect("insert destination");
        }
    }

    #[rstest]
    fn loads_and_validates_rows() {
        let temp = TempDir::new().expect("tempdir");
        let db_path = temp.path().join("travel.db");
        seed_database(&db_path, &[(1, 4.0, 120.0), (2, 2.0, 60.0)]);

        let catalog = SqliteCatalog::open(&db_path).expect("open catalogue");
        assert_eq!(catalog.len(), 2);

        let all = catalog.all().expect("read catalogue");
        let first = all.first().expect("first destination");
        assert_eq!(first.feature(Feature::Beach), Some(4.0));
        assert_eq!(first.daily_budget(), Some(120.0));
        // Columns left NULL stay absent rather than becoming zero.
        assert_eq!(first.feature(Feature::Crowds), None);
    }

    #[rstest]
    fn rejects_out_of_scale_rows() {
        let temp = TempDir::new().expect("tempdir");
        let db_path = temp.path().join("travel.db");
        seed_database(&db_path, &[(1, 9.5, 120.0)]);

        let err = SqliteCatalog::open(&db_path).expect_err("invalid beach rating");
        assert!(matches!(err, SqliteCatalogError::InvalidFeature { id: 1, .. }));
    }

    #[rstest]
    fn missing_database_fails_to_open() {
        let temp = TempDir::new().expect("tempdir");
        let err = SqliteCatalog::open(temp.path().join("absent.db")).expect_err("missing file");
        assert!(matches!(err, SqliteCatalogError::OpenDatabase { .. }));
    }
}
