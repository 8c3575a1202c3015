//! Grocery item model.
//!
//! # Responsibility
//! - Define the item record stored inside a list.
//! - Provide the bought-toggle, the only in-place mutation an item supports.
//!
//! # Invariants
//! - `id` is opaque and stable for the item lifetime.
//! - New items always start with `bought = false`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque item identifier.
///
/// Generated ids are UUID v4 strings, but any string loaded from storage is
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generates a fresh random (128-bit) identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Item payload submitted by the add-item form.
///
/// Values are expected to be validated at the form boundary
/// (see `view::form`) before they reach the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub quantity: String,
    pub price: f64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            price,
        }
    }
}

/// One grocery entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryItem {
    pub id: ItemId,
    pub name: String,
    /// Unit price; displayed with two decimals.
    pub price: f64,
    /// Free text, e.g. `2 lbs` or `500g`.
    pub quantity: String,
    pub bought: bool,
}

impl GroceryItem {
    /// Creates an unbought item with a caller-provided id.
    pub fn from_new(id: ItemId, new_item: &NewItem) -> Self {
        Self {
            id,
            name: new_item.name.clone(),
            price: new_item.price,
            quantity: new_item.quantity.clone(),
            bought: false,
        }
    }

    /// Flips the bought flag.
    pub fn toggle_bought(&mut self) {
        self.bought = !self.bought;
    }
}

/// Sums `price` over every item, bought or not.
///
/// The total is the spend committed by adding items to the list, so unbought
/// items are counted too.
pub fn compute_total(items: &[GroceryItem]) -> f64 {
    // `f64::sum` starts from -0.0, which would format as `$-0.00`.
    items.iter().fold(0.0, |total, item| total + item.price)
}

/// Formats an amount as dollars with two decimals, e.g. `$5.48`.
pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}
