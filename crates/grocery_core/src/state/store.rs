//! Observable state container.
//!
//! # Responsibility
//! - Own the single `AppData` tree for a session.
//! - Stamp fresh ids onto create actions and run them through the reducer.
//! - Notify observers whenever the state changes.
//!
//! # Invariants
//! - Observers see the state after the change, never a partial update.
//! - `hydrated` flips to `true` exactly once, on `hydrate`.
//! - No-op actions do not notify.

use crate::model::app_data::AppData;
use crate::model::item::{GroceryItem, ItemId, NewItem};
use crate::model::list::{GroceryList, ListId};
use crate::state::action::Action;
use crate::state::reducer::reduce;
use log::debug;

/// Snapshot passed to observers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub data: AppData,
    /// Whether `data` has been loaded from (or seeded for) persistent storage.
    pub hydrated: bool,
}

/// Receives change notifications from a `GroceryStore`.
pub trait StoreObserver {
    fn on_change(&mut self, state: &StoreState);
}

impl<F> StoreObserver for F
where
    F: FnMut(&StoreState),
{
    fn on_change(&mut self, state: &StoreState) {
        self(state)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct GroceryStore {
    state: StoreState,
    observers: Vec<(SubscriptionId, Box<dyn StoreObserver>)>,
    next_subscription: u64,
}

impl Default for GroceryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GroceryStore {
    /// Creates an empty, not yet hydrated store.
    pub fn new() -> Self {
        Self {
            state: StoreState::default(),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn data(&self) -> &AppData {
        &self.state.data
    }

    pub fn is_hydrated(&self) -> bool {
        self.state.hydrated
    }

    pub fn lists(&self) -> &[GroceryList] {
        &self.state.data.lists
    }

    pub fn current_list_id(&self) -> Option<&ListId> {
        self.state.data.current_list_id.as_ref()
    }

    pub fn current_list(&self) -> Option<&GroceryList> {
        self.state.data.current_list()
    }

    pub fn current_items(&self) -> &[GroceryItem] {
        self.state.data.current_items()
    }

    /// Total over every item of the current list, bought or not.
    pub fn current_total(&self) -> f64 {
        self.state.data.current_total()
    }

    /// Registers an observer; it is not called for the current state.
    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Replaces the state with loaded data and marks the store hydrated.
    pub fn hydrate(&mut self, data: AppData) {
        self.state = StoreState {
            data,
            hydrated: true,
        };
        debug!(
            "event=store_hydrate module=state status=ok lists={}",
            self.state.data.lists.len()
        );
        self.notify();
    }

    /// Creates a list (blank names get the default) and makes it current.
    pub fn create_list(&mut self, name: &str) -> ListId {
        let id = ListId::generate();
        self.dispatch(Action::CreateList {
            id: id.clone(),
            name: name.to_string(),
        });
        id
    }

    /// Points the current list at `id` without checking that it exists.
    pub fn select_list(&mut self, id: ListId) {
        self.dispatch(Action::SelectList { id });
    }

    /// Appends an unbought item to the current list.
    ///
    /// Returns `None` when no list is current.
    pub fn add_item(&mut self, item: NewItem) -> Option<ItemId> {
        self.current_list()?;
        let id = ItemId::generate();
        self.dispatch(Action::AddItem {
            id: id.clone(),
            item,
        });
        Some(id)
    }

    /// Returns whether an item of the current list was toggled.
    pub fn toggle_bought(&mut self, id: &ItemId) -> bool {
        self.dispatch(Action::ToggleBought { id: id.clone() })
    }

    /// Returns whether an item was removed from the current list.
    pub fn delete_item(&mut self, id: &ItemId) -> bool {
        self.dispatch(Action::DeleteItem { id: id.clone() })
    }

    /// Runs `action` through the reducer; notifies and returns `true` when
    /// the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let next = reduce(&self.state.data, &action);
        if next == self.state.data {
            debug!(
                "event=store_dispatch module=state status=skip action={} reason=no_change",
                action.name()
            );
            return false;
        }
        self.state.data = next;
        debug!(
            "event=store_dispatch module=state status=ok action={}",
            action.name()
        );
        self.notify();
        true
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, observer) in self.observers.iter_mut() {
            observer.on_change(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GroceryStore, StoreState};
    use crate::model::app_data::AppData;
    use crate::model::item::{ItemId, NewItem};
    use crate::model::list::ListId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(store: &mut GroceryStore) -> Rc<RefCell<Vec<StoreState>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state: &StoreState| sink.borrow_mut().push(state.clone()));
        seen
    }

    #[test]
    fn observers_see_every_change_after_it_happens() {
        let mut store = GroceryStore::new();
        let seen = recorder(&mut store);

        store.hydrate(AppData::default());
        let list_id = store.create_list("Weekly");
        store.add_item(NewItem::new("Apples", "2 lbs", 1.99)).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|state| state.hydrated));
        assert_eq!(seen[1].data.current_list_id, Some(list_id));
        assert_eq!(seen[2].data.lists[0].items.len(), 1);
    }

    #[test]
    fn noop_actions_do_not_notify() {
        let mut store = GroceryStore::new();
        let seen = recorder(&mut store);

        assert!(store.add_item(NewItem::new("Milk", "1 gal", 3.49)).is_none());
        assert!(!store.toggle_bought(&ItemId::from("missing")));
        assert!(!store.delete_item(&ItemId::from("missing")));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut store = GroceryStore::new();
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |_: &StoreState| *sink.borrow_mut() += 1);

        store.create_list("A");
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.create_list("B");
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn select_list_is_permissive() {
        let mut store = GroceryStore::new();
        store.create_list("A");
        store.select_list(ListId::from("unknown"));
        assert!(store.current_list().is_none());
        assert!(store.add_item(NewItem::new("Eggs", "12", 4.0)).is_none());
        assert_eq!(store.lists()[0].items.len(), 0);
    }
}
