use std::fs;
use std::time::{Duration, Instant};

use rusqlite::{Connection, ErrorCode};
use tracing::{debug, warn};

use crate::config::DatabaseSettings;
use crate::error::{Error, ErrorKind, Result};

/// SQLite VM instructions between two deadline checks.
const DEADLINE_CHECK_INTERVAL: i32 = 1_000;
/// Used when a handle is opened without explicit settings (tests, tooling).
const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Live handle to the relational store. Every data-access call goes through
/// [`Database::run`] so it inherits the per-statement deadline.
pub struct Database {
    conn: Connection,
    query_timeout: Duration,
}

impl Database {
    /// Open the database file described by `settings`, create the schema if
    /// needed and make sure the store answers within the connect timeout.
    pub fn open(settings: &DatabaseSettings) -> Result<Self> {
        if let Some(parent) = settings.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                Error::wrap(
                    err,
                    ErrorKind::DatabaseConnection,
                    "failed to create data directory",
                )
            })?;
        }

        let conn = Connection::open(&settings.path).map_err(|err| {
            Error::wrap(
                err,
                ErrorKind::DatabaseConnection,
                "failed to open SQLite database",
            )
        })?;
        conn.busy_timeout(settings.connect_timeout).map_err(|err| {
            Error::wrap(err, ErrorKind::DatabaseConnection, "failed to set busy timeout")
        })?;

        let db = Self::prepare(conn, settings.query_timeout)?;
        debug!(path = %settings.path.display(), "database ready");
        Ok(db)
    }

    /// Private in-memory store, mostly useful for tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|err| {
            Error::wrap(
                err,
                ErrorKind::DatabaseConnection,
                "failed to open in-memory database",
            )
        })?;
        Self::prepare(conn, DEFAULT_QUERY_TIMEOUT)
    }

    fn prepare(conn: Connection, query_timeout: Duration) -> Result<Self> {
        conn.execute("PRAGMA foreign_keys = ON", []).map_err(|err| {
            Error::wrap(err, ErrorKind::DatabaseConnection, "failed to enable foreign keys")
        })?;

        let db = Self {
            conn,
            query_timeout,
        };
        db.ensure_schema()?;
        db.ping()?;
        Ok(db)
    }

    /// Replace the per-statement deadline.
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Raw connection for maintenance work that sits outside the record
    /// stores.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Round-trip a trivial query to prove the store is readable.
    pub fn ping(&self) -> Result<()> {
        self.run(|conn| {
            conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
                row.get::<_, i64>(0)
            })
        })
        .map(|_| ())
        .map_err(|err| Error::wrap(err, ErrorKind::DatabaseConnection, "error pinging database"))
    }

    /// Remove every record. Shoots go first even though the cascade would
    /// take them anyway.
    pub fn clear(&self) -> Result<()> {
        self.run(|conn| conn.execute_batch("DELETE FROM shoots; DELETE FROM clients;"))
            .map_err(|err| Error::wrap(err, ErrorKind::DatabaseDelete, "failed to clean tables"))
    }

    /// Execute `op` with the configured deadline armed. Once the deadline
    /// passes SQLite aborts the running statement with `SQLITE_INTERRUPT`.
    pub(crate) fn run<T, F>(&self, op: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let deadline = Instant::now() + self.query_timeout;
        self.conn
            .progress_handler(DEADLINE_CHECK_INTERVAL, Some(move || Instant::now() >= deadline));
        let result = op(&self.conn);
        self.conn.progress_handler(0, None::<fn() -> bool>);

        if let Err(err) = &result {
            if err.sqlite_error_code() == Some(ErrorCode::OperationInterrupted) {
                warn!(timeout = ?self.query_timeout, "statement exceeded its deadline");
            }
        }
        result
    }

    fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS clients (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    first_name TEXT NOT NULL,
                    last_name TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    social_network_url TEXT NOT NULL DEFAULT '',
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )
            .map_err(|err| {
                Error::wrap(err, ErrorKind::DatabaseQuery, "failed to create clients table")
            })?;

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS shoots (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    client_id INTEGER NOT NULL,
                    date TEXT NOT NULL,
                    start_time TEXT NOT NULL,
                    end_time TEXT NOT NULL,
                    shoot_price INTEGER NOT NULL CHECK (shoot_price >= 0),
                    location TEXT NOT NULL,
                    client_first_name TEXT NOT NULL,
                    client_last_name TEXT NOT NULL,
                    shoot_type TEXT NOT NULL,
                    notes TEXT NOT NULL DEFAULT '',
                    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    FOREIGN KEY(client_id) REFERENCES clients(id) ON DELETE CASCADE
                )",
                [],
            )
            .map_err(|err| {
                Error::wrap(err, ErrorKind::DatabaseQuery, "failed to create shoots table")
            })?;

        Ok(())
    }
}
