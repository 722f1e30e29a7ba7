//! # Storage Handle and Schema Bootstrap
//!
//! This module owns the single shared SQLite connection for the whole
//! process. The handle is constructed once at startup, injected into the
//! request handlers as `web::Data<Database>`, and explicitly closed after
//! the server loop exits.
//!
//! On construction the schema is brought up idempotently:
//!
//! 1. The two primary tables (`systems`, `planners`) and the five dropdown
//!    lookup tables are created with `CREATE TABLE IF NOT EXISTS`.
//! 2. Each lookup table is seeded with its fixed default rows using
//!    `INSERT OR IGNORE`, so re-running startup against an existing
//!    database changes nothing. A seed failure is logged and never blocks
//!    startup.
//!
//! There is no migration mechanism; schema changes require manual table
//! evolution.

use log::{error, info};
use rusqlite::{params, Connection};
use std::sync::Mutex;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS systems (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    documentId INTEGER UNIQUE,
    name TEXT NOT NULL,
    baseUrl TEXT NOT NULL,
    authenticationMethod TEXT NOT NULL,
    authenticationPlace TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME DEFAULT CURRENT_TIMESTAMP,
    publishedAt DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS planners (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    documentId INTEGER UNIQUE,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    plannerType TEXT NOT NULL,
    externalSystemConfig TEXT,
    funds TEXT,
    \"trigger\" TEXT,
    sources TEXT,
    runs TEXT,
    reports TEXT,
    createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME DEFAULT CURRENT_TIMESTAMP,
    publishedAt DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS dropdown_sources (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    value TEXT NOT NULL UNIQUE,
    createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS dropdown_runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    value TEXT NOT NULL UNIQUE,
    createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS dropdown_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    value TEXT NOT NULL UNIQUE,
    type TEXT NOT NULL,
    createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS dropdown_funds (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    value TEXT NOT NULL UNIQUE,
    createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS dropdown_fund_aliases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    value TEXT NOT NULL UNIQUE,
    fundId INTEGER,
    createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
    updatedAt DATETIME DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (fundId) REFERENCES dropdown_funds (id) ON DELETE SET NULL
);
";

/// The shared database handle. All statement execution is serialized
/// through the inner mutex; `None` means the connection has been closed.
pub struct Database {
    conn: Mutex<Option<Connection>>,
}

impl Database {
    /// Opens (or creates) the database file and brings up the schema.
    pub fn open(path: &str) -> Result<Database, rusqlite::Error> {
        Database::from_connection(Connection::open(path)?)
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> Result<Database, rusqlite::Error> {
        Database::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Database, rusqlite::Error> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        seed_default_data(&conn);
        Ok(Database {
            conn: Mutex::new(Some(conn)),
        })
    }

    /// Runs `f` against the shared connection.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> Result<T, String>,
    ) -> Result<T, String> {
        let mut guard = self
            .conn
            .lock()
            .map_err(|_| "database lock poisoned".to_string())?;
        let conn = guard
            .as_mut()
            .ok_or_else(|| "database connection is closed".to_string())?;
        f(conn)
    }

    pub fn is_open(&self) -> bool {
        self.conn.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    /// Teardown hook invoked during shutdown. Any request still holding
    /// the handle afterwards gets a storage error instead of a connection.
    pub fn close(&self) {
        let Ok(mut guard) = self.conn.lock() else {
            return;
        };
        if let Some(conn) = guard.take() {
            match conn.close() {
                Ok(()) => info!("Database connection closed"),
                Err((_, e)) => error!("Error closing database: {}", e),
            }
        }
    }
}

/// Seeds the dropdown lookup tables with their initial rows. Errors are
/// logged and swallowed: a seed failure must not block server startup.
fn seed_default_data(conn: &Connection) {
    seed_pairs(
        conn,
        "dropdown_sources",
        &[
            ("Bloomberg Terminal", "bloomberg"),
            ("Reuters Eikon", "reuters"),
            ("Market Data Feed", "market-feed"),
        ],
    );
    seed_pairs(
        conn,
        "dropdown_runs",
        &[
            ("Daily Run", "daily-run"),
            ("Weekly Run", "weekly-run"),
            ("Monthly Run", "monthly-run"),
        ],
    );
    seed_pairs(
        conn,
        "dropdown_funds",
        &[
            ("Equity Growth Fund", "equity-growth"),
            ("Bond Income Fund", "bond-income"),
            ("Balanced Fund", "balanced-fund"),
        ],
    );
    seed_pairs(
        conn,
        "dropdown_fund_aliases",
        &[("EGF", "egf"), ("BIF", "bif"), ("BAL", "bal")],
    );

    let reports = [
        ("Portfolio Summary", "portfolio-summary", "financial"),
        ("Risk Analysis", "risk-analysis", "risk"),
        ("Performance Review", "performance-review", "performance"),
    ];
    for (name, value, report_type) in reports {
        if let Err(e) = conn.execute(
            "INSERT OR IGNORE INTO dropdown_reports (name, value, type) VALUES (?1, ?2, ?3)",
            params![name, value, report_type],
        ) {
            error!("Error inserting default data: {}", e);
        }
    }
}

fn seed_pairs(conn: &Connection, table: &str, rows: &[(&str, &str)]) {
    let sql = format!("INSERT OR IGNORE INTO {} (name, value) VALUES (?1, ?2)", table);
    for (name, value) in rows {
        if let Err(e) = conn.execute(&sql, params![name, value]) {
            error!("Error inserting default data: {}", e);
        }
    }
}
