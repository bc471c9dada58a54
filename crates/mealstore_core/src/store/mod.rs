//! Record store contract and its SQLite implementation.
//!
//! # Responsibility
//! - Define the create/list/delete capability consumed by request handlers.
//! - Keep SQL and row mapping inside the persistence boundary.
//!
//! # Invariants
//! - One statement per operation; no retries, batching or caching.
//! - Failed reads return no partial results.

pub mod record_store;
