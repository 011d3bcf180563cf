//! SQLite access for the migrate/seed/reinstall commands.

use crate::core::error::ModkitError;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Ledger of applied migrations, keyed by module and script filename.
pub const MIGRATIONS_LEDGER_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS modkit_migrations (
    module     TEXT NOT NULL,
    migration  TEXT NOT NULL,
    applied_at TEXT NOT NULL,
    PRIMARY KEY (module, migration)
);
";

pub fn connect(db_path: &Path) -> Result<Connection, ModkitError> {
    if let Some(parent) = db_path.parent() {
        fs::create_dir_all(parent).map_err(ModkitError::IoError)?;
    }
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(ModkitError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(ModkitError::RusqliteError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(ModkitError::RusqliteError)?;
    Ok(conn)
}

pub fn ensure_ledger(conn: &Connection) -> Result<(), ModkitError> {
    conn.execute_batch(MIGRATIONS_LEDGER_SCHEMA)
        .map_err(ModkitError::RusqliteError)?;
    Ok(())
}

pub fn is_applied(conn: &Connection, module: &str, migration: &str) -> Result<bool, ModkitError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM modkit_migrations WHERE module = ?1 AND migration = ?2",
        rusqlite::params![module, migration],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Deletes the database file along with its WAL sidecars.
pub fn remove_database(db_path: &Path) -> Result<(), ModkitError> {
    for suffix in ["", "-wal", "-shm"] {
        let mut path = db_path.as_os_str().to_owned();
        path.push(suffix);
        let path = Path::new(&path);
        if path.exists() {
            fs::remove_file(path).map_err(ModkitError::IoError)?;
        }
    }
    Ok(())
}
