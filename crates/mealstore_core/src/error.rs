//! Persistence error taxonomy shared by db bootstrap and the record store.
//!
//! # Invariants
//! - Database errors are carried unmodified; nothing is retried or swallowed.
//! - Row decoding failures are reported separately from statement failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, PersistenceError>;

/// Failure raised by any storage operation.
#[derive(Debug)]
pub enum PersistenceError {
    /// Statement rejected, constraint violated or connection unusable.
    Sqlite(rusqlite::Error),
    /// A stored value could not be decoded into the record shape.
    Decode {
        table: &'static str,
        column: &'static str,
        message: String,
    },
    /// Connection does not expose a table the store reads or writes.
    MissingRequiredTable(&'static str),
    /// Table exists but lacks a column the store maps.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl PersistenceError {
    /// Returns whether this error came from decoding a persisted row.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Decode {
                table,
                column,
                message,
            } => write!(f, "cannot decode {table}.{column}: {message}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "record store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "record store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Decode { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
