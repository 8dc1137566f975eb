use crate::domain::DirectoryRecord;
use crate::error::{LedgerError, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Read-only source of directory rows. The core never writes; ingest is a
/// separate, single-writer process that produced the dataset file.
pub trait DirectoryStore: Send + Sync {
    fn records(&self) -> &[DirectoryRecord];

    /// Distinct years present in the dataset, ascending. Computed once at
    /// load so repeated queries never rescan the rows.
    fn years(&self) -> &[i32];
}

fn distinct_years(records: &[DirectoryRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// File-backed store over a JSON array or NDJSON export of the directory.
#[derive(Debug)]
pub struct JsonFileStore {
    records: Vec<DirectoryRecord>,
    years: Vec<i32>,
}

impl JsonFileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LedgerError::Dataset {
            message: format!("Failed to read dataset '{}': {}", path.display(), e),
        })?;
        let records = Self::parse(&content)?;
        info!(count = records.len(), path = %path.display(), "Loaded directory dataset");
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<DirectoryRecord>) -> Self {
        let years = distinct_years(&records);
        Self { records, years }
    }

    /// Accept either a top-level JSON array or one JSON object per line.
    fn parse(content: &str) -> Result<Vec<DirectoryRecord>> {
        if content.trim_start().starts_with('[') {
            return Ok(serde_json::from_str(content)?);
        }
        let mut records = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            records.push(serde_json::from_str(line)?);
        }
        Ok(records)
    }
}

impl DirectoryStore for JsonFileStore {
    fn records(&self) -> &[DirectoryRecord] {
        &self.records
    }

    fn years(&self) -> &[i32] {
        &self.years
    }
}

/// Store reading the original `directory` table from a local SQLite file.
#[cfg(feature = "db")]
pub struct SqliteStore {
    records: Vec<DirectoryRecord>,
    years: Vec<i32>,
}

#[cfg(feature = "db")]
impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        use rusqlite::{Connection, OpenFlags};

        let path = path.as_ref();
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

        let mut stmt = conn.prepare(
            "SELECT last_name, first_name, occupation, business_address, home_address, \
             year, publisher, printed_page FROM directory",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(DirectoryRecord {
                last_name: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                first_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                occupation: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                business_address: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                home_address: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                year: row.get(5)?,
                publisher: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                printed_page: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
            })
        })?;

        let records = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        info!(count = records.len(), path = %path.display(), "Loaded directory database");

        let years = distinct_years(&records);
        Ok(Self { records, years })
    }
}

#[cfg(feature = "db")]
impl DirectoryStore for SqliteStore {
    fn records(&self) -> &[DirectoryRecord] {
        &self.records
    }

    fn years(&self) -> &[i32] {
        &self.years
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> DirectoryRecord {
        DirectoryRecord {
            last_name: "Smith".to_string(),
            first_name: "John".to_string(),
            year: 1850,
            ..Default::default()
        }
    }

    #[test]
    fn test_years_are_distinct_and_ascending() {
        let mut a = sample();
        a.year = 1852;
        let b = sample();
        let c = sample();
        let store = JsonFileStore::from_records(vec![a, b, c]);
        assert_eq!(store.years(), &[1850, 1852]);
    }

    #[test]
    fn test_open_json_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"last_name":"Smith","first_name":"John","year":1850}}]"#
        )
        .unwrap();
        let store = JsonFileStore::open(file.path()).unwrap();
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.records()[0].last_name, "Smith");
    }

    #[test]
    fn test_open_ndjson() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"last_name":"Smith","year":1850}}"#).unwrap();
        writeln!(file, r#"{{"last_name":"Jones","year":1851}}"#).unwrap();
        let store = JsonFileStore::open(file.path()).unwrap();
        assert_eq!(store.records().len(), 2);
        assert_eq!(store.years(), &[1850, 1851]);
    }

    #[test]
    fn test_missing_file_is_a_dataset_error() {
        let err = JsonFileStore::open("no_such_file.json").unwrap_err();
        assert!(matches!(err, LedgerError::Dataset { .. }));
    }
}
