//! Loads the box-office dataset from its CSV backing file.
//!
//! The first row is always treated as a header and skipped; columns are read positionally in
//! the order of [`MovieRecord`]'s fields. No caching happens here: callers reload per request.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::movie::{MovieRecord, COLUMN_COUNT};
use crate::errors::InsightError;

/// Ordered, read-only list of records from one load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<MovieRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, InsightError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| InsightError::DataLoad {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        let store = Self::from_reader(file, path)?;

        info!(
            event_name = "data.store.loaded",
            path = %path.display(),
            record_count = store.len(),
            "movie dataset loaded"
        );
        Ok(store)
    }

    /// Reads records from any reader; `origin` only labels errors.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self, InsightError> {
        let load_error = |message: String| InsightError::DataLoad {
            path: origin.to_path_buf(),
            message,
        };

        let mut reader =
            csv::ReaderBuilder::new().has_headers(true).flexible(true).from_reader(reader);

        let header_len = reader
            .headers()
            .map_err(|error| load_error(format!("unreadable header row: {error}")))?
            .len();
        if header_len != COLUMN_COUNT {
            return Err(load_error(format!(
                "header row has {header_len} columns, expected {COLUMN_COUNT}"
            )));
        }

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row.map_err(|error| load_error(format!("row {}: {error}", index + 2)))?;
            if row.len() != COLUMN_COUNT {
                return Err(load_error(format!(
                    "row {} has {} columns, expected {COLUMN_COUNT}",
                    index + 2,
                    row.len()
                )));
            }

            let field = |position: usize| row.get(position).unwrap_or_default().to_string();
            records.push(MovieRecord {
                rank: field(0),
                title: field(1),
                distributor: field(2),
                release_date: field(3),
                domestic_sales: field(4),
                international_sales: field(5),
                world_sales: field(6),
                genre: field(7),
                runtime: field(8),
                rating: field(9),
            });
        }

        debug!(event_name = "data.store.parsed", record_count = records.len(), "parsed csv rows");
        Ok(Self { records })
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<MovieRecord>> for RecordStore {
    fn from(records: Vec<MovieRecord>) -> Self {
        Self::new(records)
    }
}
