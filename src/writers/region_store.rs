//! SQLite persistence for region-sorted landing records.
//!
//! Every region owns one table named after [`Region::table_name`]. Table
//! names only ever come from the enum, so they are spliced into SQL text
//! directly; row values are always bound as parameters.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Transaction};
use tracing::debug;

use crate::error::{ProcessingError, Result};
use crate::models::{Region, RegionRow};
use crate::utils::constants::REGION_COLUMNS;

/// Anything the classifier can hand matched rows to.
pub trait RegionSink {
    fn insert_row(&mut self, region: Region, row: &RegionRow) -> Result<()>;
}

pub struct RegionStore {
    connection: Connection,
    path: PathBuf,
}

impl RegionStore {
    /// Open or create the store. Failure here is fatal for a run.
    pub fn open(path: &Path) -> Result<Self> {
        let connection = Connection::open(path).map_err(|source| ProcessingError::StorageInit {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Opened region store");

        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }

    /// Open an existing store without creating or modifying it.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(path, flags).map_err(|source| {
            ProcessingError::StorageInit {
                path: path.to_path_buf(),
                source,
            }
        })?;

        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }

    /// In-memory store, used by tests and benchmarks.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().map_err(|source| ProcessingError::StorageInit {
                path: PathBuf::from(":memory:"),
                source,
            })?;

        Ok(Self {
            connection,
            path: PathBuf::from(":memory:"),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Make sure each region table exists and holds no rows.
    ///
    /// Runs as one transaction, so either every table is reset or none is.
    pub fn ensure_and_clear(&mut self, regions: &[Region]) -> Result<()> {
        let transaction = self
            .connection
            .transaction()
            .map_err(ProcessingError::storage("begin schema transaction"))?;

        for region in regions {
            create_table(&transaction, *region)?;
            let cleared = transaction
                .execute(&format!("DELETE FROM {}", region.table_name()), [])
                .map_err(ProcessingError::storage("clear region table"))?;
            debug!(table = region.table_name(), cleared, "Region table reset");
        }

        transaction
            .commit()
            .map_err(ProcessingError::storage("commit schema transaction"))
    }

    /// Append a single row outside any batch.
    pub fn insert_row(&mut self, region: Region, row: &RegionRow) -> Result<()> {
        insert(&self.connection, region, row)
    }

    /// Start the load transaction all inserts of a run go through.
    pub fn begin_load(&mut self) -> Result<RegionBatch<'_>> {
        let transaction = self
            .connection
            .transaction()
            .map_err(ProcessingError::storage("begin load transaction"))?;

        Ok(RegionBatch {
            transaction,
            inserted: 0,
        })
    }

    pub fn table_exists(&self, region: Region) -> Result<bool> {
        self.connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [region.table_name()],
                |_| Ok(()),
            )
            .optional()
            .map(|found| found.is_some())
            .map_err(ProcessingError::storage("look up region table"))
    }

    pub fn row_count(&self, region: Region) -> Result<usize> {
        self.require_table(region)?;
        let count: i64 = self
            .connection
            .query_row(
                &format!("SELECT COUNT(*) FROM {}", region.table_name()),
                [],
                |row| row.get(0),
            )
            .map_err(ProcessingError::storage("count region rows"))?;

        Ok(count.max(0) as usize)
    }

    /// First `limit` rows of a region table, in insertion order.
    pub fn sample_rows(&self, region: Region, limit: usize) -> Result<Vec<RegionRow>> {
        self.require_table(region)?;
        let sql = format!(
            "SELECT {} FROM {} ORDER BY rowid LIMIT ?1",
            REGION_COLUMNS.join(", "),
            region.table_name()
        );
        let mut statement = self
            .connection
            .prepare(&sql)
            .map_err(ProcessingError::storage("prepare sample query"))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = statement
            .query_map([limit], |row| {
                Ok(RegionRow {
                    name: row.get(0)?,
                    mass: row.get(1)?,
                    reclat: row.get(2)?,
                    reclong: row.get(3)?,
                })
            })
            .map_err(ProcessingError::storage("query sample rows"))?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(ProcessingError::storage("read sample row"))
    }

    fn require_table(&self, region: Region) -> Result<()> {
        if self.table_exists(region)? {
            Ok(())
        } else {
            Err(ProcessingError::MissingTable {
                table: region.table_name(),
            })
        }
    }
}

/// Open load transaction. Dropping it without [`RegionBatch::commit`]
/// rolls every insert back.
pub struct RegionBatch<'conn> {
    transaction: Transaction<'conn>,
    inserted: usize,
}

impl RegionBatch<'_> {
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    pub fn commit(self) -> Result<usize> {
        let inserted = self.inserted;
        self.transaction
            .commit()
            .map_err(ProcessingError::storage("commit load transaction"))?;
        Ok(inserted)
    }
}

impl RegionSink for RegionBatch<'_> {
    fn insert_row(&mut self, region: Region, row: &RegionRow) -> Result<()> {
        insert(&self.transaction, region, row)?;
        self.inserted += 1;
        Ok(())
    }
}

fn create_table(connection: &Connection, region: Region) -> Result<()> {
    let columns = REGION_COLUMNS
        .iter()
        .map(|column| format!("{column} TEXT"))
        .collect::<Vec<_>>()
        .join(", ");

    connection
        .execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {} ({columns})",
                region.table_name()
            ),
            [],
        )
        .map(|_| ())
        .map_err(ProcessingError::storage("create region table"))
}

fn insert(connection: &Connection, region: Region, row: &RegionRow) -> Result<()> {
    let mut statement = connection
        .prepare_cached(&format!(
            "INSERT INTO {} VALUES (?1, ?2, ?3, ?4)",
            region.table_name()
        ))
        .map_err(ProcessingError::storage("prepare region insert"))?;

    statement
        .execute(params![row.name, row.mass, row.reclat, row.reclong])
        .map(|_| ())
        .map_err(ProcessingError::storage("insert region row"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn row(name: &str, mass: Option<&str>) -> RegionRow {
        RegionRow {
            name: name.to_string(),
            mass: mass.map(str::to_string),
            reclat: "10.0".to_string(),
            reclong: "0.0".to_string(),
        }
    }

    #[test]
    fn test_ensure_and_clear_creates_every_table() -> Result<()> {
        let mut store = RegionStore::open_in_memory()?;
        store.ensure_and_clear(&Region::ALL)?;

        for region in Region::ALL {
            assert!(store.table_exists(region)?);
            assert_eq!(store.row_count(region)?, 0);
        }
        Ok(())
    }

    #[test]
    fn test_ensure_and_clear_removes_prior_rows() -> Result<()> {
        let mut store = RegionStore::open_in_memory()?;
        store.ensure_and_clear(&Region::ALL)?;
        store.insert_row(Region::Europe, &row("Old", Some("1")))?;
        assert_eq!(store.row_count(Region::Europe)?, 1);

        store.ensure_and_clear(&Region::ALL)?;
        assert_eq!(store.row_count(Region::Europe)?, 0);
        Ok(())
    }

    #[test]
    fn test_duplicate_rows_are_kept() -> Result<()> {
        let mut store = RegionStore::open_in_memory()?;
        store.ensure_and_clear(&Region::ALL)?;
        let duplicate = row("Twin", Some("3"));
        store.insert_row(Region::Australia, &duplicate)?;
        store.insert_row(Region::Australia, &duplicate)?;

        assert_eq!(store.row_count(Region::Australia)?, 2);
        Ok(())
    }

    #[test]
    fn test_missing_mass_is_stored_as_null() -> Result<()> {
        let mut store = RegionStore::open_in_memory()?;
        store.ensure_and_clear(&Region::ALL)?;
        store.insert_row(Region::AfricaMiddleEast, &row("NoMass", None))?;

        let is_null: bool = store
            .connection
            .query_row(
                "SELECT mass IS NULL FROM Africa_MiddleEast_Meteorites",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert!(is_null);
        assert_eq!(
            store.sample_rows(Region::AfricaMiddleEast, 10)?,
            vec![row("NoMass", None)]
        );
        Ok(())
    }

    #[test]
    fn test_schema_is_four_text_columns() -> Result<()> {
        let mut store = RegionStore::open_in_memory()?;
        store.ensure_and_clear(&[Region::Europe])?;

        let mut statement = store
            .connection
            .prepare("SELECT name, type FROM pragma_table_info('Europe_Meteorites') ORDER BY cid")
            .unwrap();
        let columns: Vec<(String, String)> = statement
            .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        let expected: Vec<(String, String)> = REGION_COLUMNS
            .iter()
            .map(|c| (c.to_string(), "TEXT".to_string()))
            .collect();
        assert_eq!(columns, expected);
        Ok(())
    }

    #[test]
    fn test_batch_commit_and_rollback() -> Result<()> {
        let mut store = RegionStore::open_in_memory()?;
        store.ensure_and_clear(&Region::ALL)?;

        {
            let mut batch = store.begin_load()?;
            batch.insert_row(Region::NorthAmerica, &row("Dropped", None))?;
            assert_eq!(batch.inserted(), 1);
        }
        assert_eq!(store.row_count(Region::NorthAmerica)?, 0);

        let mut batch = store.begin_load()?;
        batch.insert_row(Region::NorthAmerica, &row("Kept", None))?;
        assert_eq!(batch.commit()?, 1);
        assert_eq!(store.row_count(Region::NorthAmerica)?, 1);
        Ok(())
    }

    #[test]
    fn test_read_only_store_reports_missing_table() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("partial.db");
        RegionStore::open(&path)?.ensure_and_clear(&[Region::Europe])?;

        let store = RegionStore::open_read_only(&path)?;
        assert_eq!(store.row_count(Region::Europe)?, 0);
        assert!(matches!(
            store.row_count(Region::Australia),
            Err(ProcessingError::MissingTable {
                table: "Australia_Meteorites"
            })
        ));
        Ok(())
    }

    #[test]
    fn test_unopenable_path_is_storage_init_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("store.db");
        assert!(matches!(
            RegionStore::open(&path),
            Err(ProcessingError::StorageInit { .. })
        ));
    }
}
