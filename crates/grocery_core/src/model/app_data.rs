//! Persistence root holding every list and the current-list pointer.
//!
//! # Invariants
//! - When `lists` is non-empty, a freshly loaded `current_list_id` references
//!   a member of `lists` (see `repair_current_list`).
//! - During a session the pointer may dangle after a permissive
//!   `SelectList`; lookups then report "no current list".

use crate::model::item::{compute_total, GroceryItem};
use crate::model::list::{GroceryList, ListId, DEFAULT_LIST_NAME};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub lists: Vec<GroceryList>,
    #[serde(default)]
    pub current_list_id: Option<ListId>,
}

impl AppData {
    /// State used on first start or after corrupt data was discarded.
    pub fn with_default_list() -> Self {
        let list = GroceryList::new(ListId::generate(), DEFAULT_LIST_NAME);
        let current = list.id.clone();
        Self {
            lists: vec![list],
            current_list_id: Some(current),
        }
    }

    pub fn find_list(&self, id: &ListId) -> Option<&GroceryList> {
        self.lists.iter().find(|list| &list.id == id)
    }

    /// Returns the list the pointer references, if any.
    pub fn current_list(&self) -> Option<&GroceryList> {
        self.current_list_id
            .as_ref()
            .and_then(|id| self.find_list(id))
    }

    pub fn current_list_mut(&mut self) -> Option<&mut GroceryList> {
        let id = self.current_list_id.as_ref()?;
        self.lists.iter_mut().find(|list| &list.id == id)
    }

    /// Items of the current list, or an empty slice when none is selected.
    pub fn current_items(&self) -> &[GroceryItem] {
        self.current_list()
            .map(|list| list.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn current_total(&self) -> f64 {
        compute_total(self.current_items())
    }

    /// Points `current_list_id` at the first list when it is absent or stale.
    ///
    /// Returns `true` when the pointer was changed.
    pub fn repair_current_list(&mut self) -> bool {
        if self.current_list().is_some() {
            return false;
        }
        let fallback = self.lists.first().map(|list| list.id.clone());
        if fallback.is_none() && self.current_list_id.is_none() {
            return false;
        }
        self.current_list_id = fallback;
        true
    }
}
