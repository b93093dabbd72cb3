//! TestDeck pattern for declarative store-fixture setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated data directory
//! - Seeding store files with producer schemas and rows
//! - Backdating store files for freshness scenarios
//! - Handing out catalogs and readers wired to the fixture

use std::path::Path;
use std::time::{Duration, SystemTime};

use filetime::FileTime;
use rusqlite::Connection;
use tempfile::TempDir;

use opsdeck_store::{Store, StoreCatalog, StoreReader};

/// Declarative store-fixture builder.
///
/// # Example
/// ```no_run
/// use opsdeck_store::Store;
/// use opsdeck_testing::TestDeck;
///
/// let deck = TestDeck::new();
/// deck.seed_schema(Store::CronLog)
///     .seed(Store::CronLog, "INSERT INTO cron_runs (job_name, status) VALUES ('backup', 'success');");
///
/// let reader = deck.reader();
/// ```
pub struct TestDeck {
    temp_dir: TempDir,
}

impl Default for TestDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDeck {
    /// Create a new isolated data directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        TestDeck { temp_dir }
    }

    /// The data directory holding the seeded store files.
    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A catalog resolving every store under this fixture's data directory.
    pub fn catalog(&self) -> StoreCatalog {
        StoreCatalog::new(self.data_dir())
    }

    /// A reader over this fixture's catalog.
    pub fn reader(&self) -> StoreReader {
        StoreReader::new(self.catalog())
    }

    /// Create the store file (if needed) and run `sql` against it as a batch.
    ///
    /// The fixture plays the producer here, so the connection is writable;
    /// everything under test only ever opens these files read-only.
    pub fn seed(&self, store: Store, sql: &str) -> &Self {
        let path = self.catalog().path_for(store);
        let conn = Connection::open(&path).expect("Failed to open store for seeding");
        conn.execute_batch(sql).expect("Failed to seed store");
        self
    }

    /// Create the store file carrying its producer schema and zero rows.
    pub fn seed_schema(&self, store: Store) -> &Self {
        self.seed(store, crate::schemas::ddl(store))
    }

    /// Backdate a store file's modification time by whole minutes.
    ///
    /// A few extra seconds are added so the elapsed-minute floor stays at
    /// `minutes_old` even after the test itself spends a moment running.
    pub fn age_store(&self, store: Store, minutes_old: u64) -> &Self {
        let path = self.catalog().path_for(store);
        let mtime = SystemTime::now() - Duration::from_secs(minutes_old * 60 + 5);
        filetime::set_file_mtime(&path, FileTime::from_system_time(mtime))
            .expect("Failed to set store mtime");
        self
    }

    /// Drop an arbitrary file into the data directory (for non-store noise).
    pub fn write_file(&self, name: &str, contents: &str) -> &Self {
        std::fs::write(self.data_dir().join(name), contents).expect("Failed to write file");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opsdeck_types::Value;

    #[test]
    fn seeded_store_is_readable_through_the_catalog() {
        let deck = TestDeck::new();
        deck.seed_schema(Store::CronLog).seed(
            Store::CronLog,
            "INSERT INTO cron_runs (job_name, started_at, status, duration_seconds)
             VALUES ('backup', '2020-05-01 06:00:00', 'success', 12.5);",
        );

        let reader = deck.reader();
        let count = reader
            .scalar(
                Store::CronLog,
                "SELECT COUNT(*) FROM cron_runs",
                &[],
                Value::Integer(0),
            )
            .unwrap();
        assert_eq!(count, Value::Integer(1));
    }

    #[test]
    fn unseeded_stores_stay_missing() {
        let deck = TestDeck::new();
        deck.seed_schema(Store::CronLog);
        assert!(deck.catalog().path_for(Store::CronLog).exists());
        assert!(!deck.catalog().path_for(Store::Crm).exists());
    }

    #[test]
    fn aged_store_reports_its_age_in_minutes() {
        let deck = TestDeck::new();
        deck.seed_schema(Store::UsageTracking).age_store(Store::UsageTracking, 42);
        assert_eq!(deck.reader().freshness(), Some(42));
    }
}
