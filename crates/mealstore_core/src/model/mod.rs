//! Records exchanged with the storage layer.
//!
//! # Invariants
//! - Records are plain data; nothing here talks to the database.
//! - `meal` on orders and customers is a denormalized copy, not a reference.

pub mod customer;
pub mod meal;
pub mod order;
