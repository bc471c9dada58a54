//! Menu item record.

use serde::{Deserialize, Serialize};

/// One menu entry. Meals have no identifier and are never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub food: String,
    pub price: f64,
    /// Image URL or path shown next to the meal.
    pub image: String,
}

impl Meal {
    pub fn new(food: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            food: food.into(),
            price,
            image: image.into(),
        }
    }
}
