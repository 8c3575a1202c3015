//! Grocery list model.
//!
//! # Responsibility
//! - Define a named, ordered collection of items.
//!
//! # Invariants
//! - `items` keeps insertion order.
//! - `name` is never blank; blank input is replaced by `DEFAULT_LIST_NAME`.

use crate::model::item::GroceryItem;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Name used when a list is created from blank input and for the list
/// created on first start.
pub const DEFAULT_LIST_NAME: &str = "My Grocery List";

/// Opaque list identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for ListId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ListId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for ListId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroceryList {
    pub id: ListId,
    pub name: String,
    pub items: Vec<GroceryItem>,
}

impl GroceryList {
    /// Creates an empty list, substituting the default name for blank input.
    pub fn new(id: ListId, name: &str) -> Self {
        Self {
            id,
            name: normalize_list_name(name),
            items: Vec::new(),
        }
    }
}

/// Trims `name`, falling back to `DEFAULT_LIST_NAME` when nothing is left.
pub fn normalize_list_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_LIST_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}
