use std::collections::HashMap;
use std::path::Path;

use rusqlite::{named_params, Connection, OptionalExtension};
use thiserror::Error;

use crate::config::AppConfig;
use crate::model::{Category, TaskStore};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to open task store at {path}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to read record '{key}'")]
    Read {
        key: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to write record '{key}'")]
    Write {
        key: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to encode record '{key}'")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal key-value surface the gateway needs from a backing store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn initialize(config: &AppConfig) -> Result<Self, PersistenceError> {
        Self::open(config.db_path())
    }

    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        let open_err = |source| PersistenceError::Open {
            path: path.display().to_string(),
            source,
        };
        let conn = Connection::open(path).map_err(open_err)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(open_err)?;

        let store = Self { conn };
        store.apply_migrations().map_err(open_err)?;
        Ok(store)
    }

    fn apply_migrations(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
             );",
        )
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.conn
            .query_row(
                "SELECT value FROM records WHERE key = :key",
                named_params![":key": key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|source| PersistenceError::Read {
                key: key.to_string(),
                source,
            })
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.conn
            .execute(
                "INSERT INTO records (key, value) VALUES (:key, :value)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                named_params![":key": key, ":value": value],
            )
            .map(|_| ())
            .map_err(|source| PersistenceError::Write {
                key: key.to_string(),
                source,
            })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.records.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.records.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Translates task lists to and from one record per category.
///
/// Records are JSON arrays, so order, duplicates and embedded newlines survive a
/// round trip.
pub struct PersistenceGateway {
    store: Box<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn open(config: &AppConfig) -> Result<Self, PersistenceError> {
        Ok(Self::new(SqliteStore::initialize(config)?))
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Read all three categories. Unreadable records come back empty.
    pub fn load(&self) -> TaskStore {
        let [personal, work, other] = Category::ALL.map(|category| self.load_category(category));
        TaskStore::new(personal, work, other)
    }

    pub fn load_category(&self, category: Category) -> Vec<String> {
        let key = category.storage_key();
        match self.store.get(key) {
            Ok(Some(raw)) => decode_record(key, &raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read task record");
                Vec::new()
            }
        }
    }

    pub fn save(&mut self, category: Category, tasks: &[String]) -> Result<(), PersistenceError> {
        let key = category.storage_key();
        let value = serde_json::to_string(tasks).map_err(|source| PersistenceError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.put(key, &value)?;
        tracing::debug!(key, count = tasks.len(), "saved task record");
        Ok(())
    }
}

fn decode_record(key: &str, raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(tasks) => tasks.into_iter().filter(|task| !task.is_empty()).collect(),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding malformed task record");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Read {
                key: key.to_string(),
                source: rusqlite::Error::InvalidQuery,
            })
        }

        fn put(&mut self, key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Write {
                key: key.to_string(),
                source: rusqlite::Error::InvalidQuery,
            })
        }
    }

    #[rstest]
    #[case(Category::Personal)]
    #[case(Category::Work)]
    #[case(Category::Other)]
    fn sqlite_round_trip_keeps_order_and_duplicates(#[case] category: Category) {
        let (config, _dir) = temp_config();
        let tasks = strings(&["Pay rent", "Call bank", "Pay rent", "two\nlines", " padded "]);
        {
            let mut gateway = PersistenceGateway::open(&config).expect("open");
            gateway.save(category, &tasks).expect("save");
        }

        let gateway = PersistenceGateway::open(&config).expect("reopen");
        let store = gateway.load();
        assert_eq!(store.tasks(category), tasks.as_slice());
        for other in Category::ALL.into_iter().filter(|c| *c != category) {
            assert!(store.tasks(other).is_empty());
        }
    }

    #[test]
    fn categories_are_saved_independently() {
        let mut gateway = PersistenceGateway::in_memory();
        gateway
            .save(Category::Personal, &strings(&["a", "b"]))
            .unwrap();
        gateway.save(Category::Work, &strings(&["c"])).unwrap();
        gateway.save(Category::Personal, &strings(&["b", "a"])).unwrap();

        let store = gateway.load();
        assert_eq!(store.tasks(Category::Personal), strings(&["b", "a"]).as_slice());
        assert_eq!(store.tasks(Category::Work), strings(&["c"]).as_slice());
        assert!(store.tasks(Category::Other).is_empty());
    }

    #[test]
    fn missing_and_malformed_records_load_empty() {
        let mut raw = MemoryStore::new();
        raw.put(Category::Work.storage_key(), "not json at all")
            .unwrap();
        raw.put(Category::Other.storage_key(), r#"["keep", "", "me"]"#)
            .unwrap();
        let gateway = PersistenceGateway::new(raw);

        let store = gateway.load();
        assert!(store.tasks(Category::Personal).is_empty());
        assert!(store.tasks(Category::Work).is_empty());
        assert_eq!(store.tasks(Category::Other), strings(&["keep", "me"]).as_slice());
    }

    #[test]
    fn write_failures_are_surfaced() {
        let mut gateway = PersistenceGateway::new(FailingStore);
        let err = gateway
            .save(Category::Personal, &strings(&["x"]))
            .unwrap_err();
        assert!(matches!(err, PersistenceError::Write { .. }));
        assert_eq!(gateway.load(), TaskStore::default());
    }
}
