//! Customer record captured at checkout.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    /// Delivery address as typed by the customer.
    pub address: String,
    pub meal: String,
    pub total_cost: f64,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        meal: impl Into<String>,
        total_cost: f64,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            meal: meal.into(),
            total_cost,
        }
    }
}
