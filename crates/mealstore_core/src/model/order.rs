//! Checkout line item record.
//!
//! # Invariants
//! - `id` is assigned by the database on insert; caller values are ignored.
//! - Persisted ids start at 1, so `UNSAVED_ORDER_ID` never collides.

use serde::{Deserialize, Serialize};

/// Database-assigned order identifier.
pub type OrderId = i64;

/// Placeholder id carried by orders that have not been inserted yet.
pub const UNSAVED_ORDER_ID: OrderId = 0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Meal name copied from the menu at order time.
    pub meal: String,
    /// Unit price per plate.
    pub price: f64,
    pub image: String,
    /// Number of plates ordered. Stored as-is; negative values are not rejected.
    pub plates: i64,
    /// Caller-computed line total; not checked against `price * plates`.
    pub total_cost: f64,
}

impl Order {
    /// Builds an order that has not been persisted yet.
    pub fn new(
        meal: impl Into<String>,
        price: f64,
        image: impl Into<String>,
        plates: i64,
        total_cost: f64,
    ) -> Self {
        Self {
            id: UNSAVED_ORDER_ID,
            meal: meal.into(),
            price,
            image: image.into(),
            plates,
            total_cost,
        }
    }

    /// Returns whether this value came back from the database.
    pub fn is_saved(&self) -> bool {
        self.id != UNSAVED_ORDER_ID
    }
}
