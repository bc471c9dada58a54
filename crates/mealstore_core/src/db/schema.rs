//! Baseline table layout and readiness checks.

use crate::error::{PersistenceError, StoreResult};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Tables and columns the record store reads and writes.
pub const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("meal", &["food", "price", "image"]),
    (
        "orders",
        &["id", "meal", "price", "image", "plates", "totalcost"],
    ),
    (
        "customers",
        &["customer_name", "location_address", "meal", "totalcost"],
    ),
];

/// Creates any missing baseline table. Existing tables are left untouched.
pub fn install_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Verifies that every required table and column is present.
pub fn ensure_schema_ready(conn: &Connection) -> StoreResult<()> {
    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(PersistenceError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !column_exists(conn, table, column)? {
                return Err(PersistenceError::MissingRequiredColumn { table, column });
            }
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM pragma_table_info(?1)
            WHERE name = ?2
        );",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
