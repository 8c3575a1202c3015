//! Pure state transitions over `AppData`.
//!
//! # Invariants
//! - `reduce` never mutates its input.
//! - Lists other than the current one are returned unchanged by item actions.
//! - `SelectList` does not validate that the id exists.

use crate::model::app_data::AppData;
use crate::model::item::GroceryItem;
use crate::model::list::GroceryList;
use crate::state::action::Action;

/// Applies `action` to a copy of `state` and returns the new state.
pub fn reduce(state: &AppData, action: &Action) -> AppData {
    let mut next = state.clone();
    apply(&mut next, action);
    next
}

/// Folds `actions` over `initial` in order.
pub fn replay<'a>(initial: &AppData, actions: impl IntoIterator<Item = &'a Action>) -> AppData {
    let mut state = initial.clone();
    for action in actions {
        apply(&mut state, action);
    }
    state
}

fn apply(state: &mut AppData, action: &Action) {
    match action {
        Action::CreateList { id, name } => {
            state.lists.push(GroceryList::new(id.clone(), name));
            state.current_list_id = Some(id.clone());
        }
        Action::SelectList { id } => {
            state.current_list_id = Some(id.clone());
        }
        Action::AddItem { id, item } => {
            if let Some(list) = state.current_list_mut() {
                list.items.push(GroceryItem::from_new(id.clone(), item));
            }
        }
        Action::ToggleBought { id } => {
            if let Some(list) = state.current_list_mut() {
                list.items
                    .iter_mut()
                    .filter(|item| &item.id == id)
                    .for_each(GroceryItem::toggle_bought);
            }
        }
        Action::DeleteItem { id } => {
            if let Some(list) = state.current_list_mut() {
                list.items.retain(|item| &item.id != id);
            }
        }
    }
}
