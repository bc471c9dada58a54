//! Connection bootstrap utilities for SQLite.
//!
//! # Invariants
//! - Returned connections have the configured busy timeout.
//! - Returned connections have the baseline schema installed.

use super::schema::install_schema;
use crate::config::{DatabaseLocation, StoreConfig, DEFAULT_BUSY_TIMEOUT};
use crate::error::StoreResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens a SQLite database file and installs the baseline schema.
///
/// # Side effects
/// - Creates the file when it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> StoreResult<Connection> {
    open_location(
        &DatabaseLocation::File(path.as_ref().to_path_buf()),
        DEFAULT_BUSY_TIMEOUT,
    )
}

/// Opens a private in-memory SQLite database with the baseline schema.
pub fn open_db_in_memory() -> StoreResult<Connection> {
    open_location(&DatabaseLocation::Memory, DEFAULT_BUSY_TIMEOUT)
}

/// Opens the database described by `config`.
pub fn open_with_config(config: &StoreConfig) -> StoreResult<Connection> {
    open_location(&config.database, config.busy_timeout)
}

fn open_location(location: &DatabaseLocation, busy_timeout: Duration) -> StoreResult<Connection> {
    let started_at = Instant::now();
    let mode = location.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let opened = match location {
        DatabaseLocation::Memory => Connection::open_in_memory(),
        DatabaseLocation::File(path) => Connection::open(path),
    };
    let conn = match opened {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn, busy_timeout) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection, busy_timeout: Duration) -> StoreResult<()> {
    conn.busy_timeout(busy_timeout)?;
    install_schema(conn)?;
    Ok(())
}
