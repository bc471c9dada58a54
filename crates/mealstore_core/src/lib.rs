//! Storage-access core for the meal ordering app.
//! Persists meals, orders and customers; owns no business rules.

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod store;

pub use config::{ConfigError, DatabaseLocation, StoreConfig};
pub use error::{PersistenceError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::customer::Customer;
pub use model::meal::Meal;
pub use model::order::{Order, OrderId, UNSAVED_ORDER_ID};
pub use store::record_store::{RecordStore, SqliteRecordStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
