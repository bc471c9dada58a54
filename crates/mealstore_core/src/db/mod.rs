//! SQLite connection bootstrap.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the record store.
//! - Install the baseline meal/orders/customers tables when absent.
//!
//! # Invariants
//! - Returned connections already carry every table the store maps.
//! - Schema installation is idempotent and never drops or alters data.

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory, open_with_config};
