use crate::{error::Result, schema};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "TRACKER_DB_PATH";

const DEFAULT_DB_PATH: &str = "tracker.db";
const IN_MEMORY: &str = ":memory:";

/// Where the parcel database lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file, or `:memory:`
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    /// Read the path from `TRACKER_DB_PATH`, falling back to `tracker.db`.
    pub fn from_env() -> Self {
        match std::env::var_os(DB_PATH_ENV) {
            Some(path) if !path.is_empty() => Self::new(path),
            _ => Self::default(),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == IN_MEMORY
    }

    /// Open a connection with the parcel table in place. The caller owns it.
    pub fn open(&self) -> Result<Connection> {
        info!(path = %self.db_path.display(), "opening parcel database");
        let conn = if self.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&self.db_path)?
        };
        schema::initialize(&conn)?;
        Ok(conn)
    }
}
