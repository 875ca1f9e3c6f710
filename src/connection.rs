//! Database connection management.
//!
//! The connection provider is an injected collaborator: callers build a
//! [`ConnectionConfig`] once at process start and open a [`Database`] from
//! it — no hidden environment lookups inside the core. Handlers share the
//! connection through an `Arc<Mutex<Connection>>`; each operation takes the
//! lock for its own duration.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, OpenFlags};

use crate::{error::QueryError, selection::Target};

/// Explicit connection descriptor, constructed once and passed by
/// reference.
#[derive(Clone, Debug, Default)]
pub struct ConnectionConfig {
    /// Path to the database file; `None` opens an in-memory database.
    pub db_path: Option<PathBuf>,
    pub read_only: bool,
    /// Enable WAL journaling on file-backed databases.
    pub wal: bool,
}

impl ConnectionConfig {
    /// A file-backed database with WAL enabled.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
            read_only: false,
            wal: true,
        }
    }

    /// An in-memory database.
    pub fn in_memory() -> Self {
        Self::default()
    }
}

/// A ready-to-use engine handle shared across requests.
#[derive(Debug)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens a database per the given configuration.
    pub fn open(config: &ConnectionConfig) -> Result<Self, QueryError> {
        let conn = match &config.db_path {
            Some(path) => {
                let flags = if config.read_only {
                    OpenFlags::SQLITE_OPEN_READ_ONLY
                        | OpenFlags::SQLITE_OPEN_URI
                        | OpenFlags::SQLITE_OPEN_NO_MUTEX
                } else {
                    OpenFlags::default()
                };
                Connection::open_with_flags(path, flags)
                    .map_err(|e| QueryError::Connection(e.to_string()))?
            }
            None => Connection::open_in_memory()
                .map_err(|e| QueryError::Connection(e.to_string()))?,
        };

        // WAL mode for better concurrent access
        if config.wal && config.db_path.is_some() && !config.read_only {
            let _: String = conn
                .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
                .map_err(|e| QueryError::Connection(e.to_string()))?;
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory database.
    pub fn in_memory() -> Result<Self, QueryError> {
        Self::open(&ConnectionConfig::in_memory())
    }

    /// Creates the backing tables for every entity in `targets` from their
    /// declared schemas. Raw table handles have no schema and are skipped.
    pub fn create_all(&self, targets: &[Target]) -> Result<(), QueryError> {
        let conn = self.conn.lock()?;
        for target in targets {
            if let Some(def) = target.schema() {
                conn.execute_batch(def.schema)?;
            }
        }
        Ok(())
    }

    /// A shareable handle for constructing requests.
    pub fn handle(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }
}
