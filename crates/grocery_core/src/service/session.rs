//! Session composition root and view callbacks.
//!
//! # Responsibility
//! - Hydrate the store from the slot once, seeding a default list when
//!   there is no usable data.
//! - Register write-through persistence as a store observer.
//! - Expose the view callbacks (`on_*`) with response envelopes that never
//!   panic and never surface storage failures.
//!
//! # Invariants
//! - Persistence is subscribed before hydration, so the seeded default list
//!   is written on first start.
//! - When the slot cannot be read, persistence is never subscribed; the
//!   session runs in memory and the stored value is left untouched.
//! - Form input is validated here, before the store is touched.

use crate::export::{write_list_pdf, ExportError, ListExport};
use crate::model::app_data::AppData;
use crate::model::item::{format_price, ItemId, NewItem};
use crate::model::list::ListId;
use crate::repo::slot_repo::SlotRepository;
use crate::service::persistence::{LoadOutcome, PersistObserver, PersistenceAdapter};
use crate::state::store::{GroceryStore, StoreObserver, SubscriptionId};
use crate::view::form::{validate_item_form, validate_list_name};
use chrono::NaiveDateTime;
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Where the hydrated state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    /// Stored data was loaded.
    Restored,
    /// Nothing was stored; a default list was created.
    SeededDefault,
    /// Stored data was corrupt and discarded; a default list was created.
    RecoveredFromCorrupt,
    /// The slot could not be read; a default list was created and changes
    /// stay in memory.
    StorageUnavailable,
}

/// Outcome envelope returned by every view callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created or affected entity, when there is one.
    pub id: Option<String>,
    /// Human-readable message for the view.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

pub struct GrocerySession {
    store: GroceryStore,
    source: HydrationSource,
}

impl GrocerySession {
    /// Loads the slot through `repo` and returns a hydrated session whose
    /// changes are written back to the same slot.
    pub fn open<R: SlotRepository + 'static>(repo: R) -> Self {
        Self::open_with_adapter(PersistenceAdapter::new(repo))
    }

    pub fn open_with_adapter<R: SlotRepository + 'static>(adapter: PersistenceAdapter<R>) -> Self {
        let (data, source) = match adapter.load() {
            LoadOutcome::Loaded(data) => (data, HydrationSource::Restored),
            LoadOutcome::Missing => (AppData::with_default_list(), HydrationSource::SeededDefault),
            LoadOutcome::Corrupt(_) => (
                AppData::with_default_list(),
                HydrationSource::RecoveredFromCorrupt,
            ),
            LoadOutcome::Unavailable(_) => (
                AppData::with_default_list(),
                HydrationSource::StorageUnavailable,
            ),
        };
        if source != HydrationSource::Restored {
            warn!("event=session_open module=session status=ok source={source:?} action=seed_default_list");
        }

        let mut store = GroceryStore::new();
        if source == HydrationSource::StorageUnavailable {
            warn!("event=session_open module=session status=degraded action=skip_persistence");
        } else {
            store.subscribe(PersistObserver::new(adapter));
        }
        store.hydrate(data);
        info!(
            "event=session_open module=session status=ok lists={}",
            store.lists().len()
        );

        Self { store, source }
    }

    pub fn store(&self) -> &GroceryStore {
        &self.store
    }

    pub fn source(&self) -> HydrationSource {
        self.source
    }

    /// Registers an extra observer, e.g. a renderer.
    pub fn subscribe(&mut self, observer: impl StoreObserver + 'static) -> SubscriptionId {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Creates a list; blank names get the default.
    pub fn on_create_list(&mut self, name: &str) -> ActionResponse {
        let id = self.store.create_list(name);
        let name = self
            .store
            .current_list()
            .map(|list| list.name.clone())
            .unwrap_or_default();
        ActionResponse::success(format!("Created list \"{name}\"."), Some(id.to_string()))
    }

    /// Validates create-list dialog input, then creates the list.
    pub fn submit_list_form(&mut self, name: &str) -> ActionResponse {
        match validate_list_name(name) {
            Ok(name) => self.on_create_list(&name),
            Err(err) => ActionResponse::failure(err.to_string()),
        }
    }

    /// Selects a list without checking that it exists.
    pub fn on_select_list(&mut self, id: &str) -> ActionResponse {
        self.store.select_list(ListId::from(id));
        match self.store.current_list() {
            Some(list) => ActionResponse::success(
                format!("Selected list \"{}\".", list.name),
                Some(id.to_string()),
            ),
            None => ActionResponse::success("No list selected.", Some(id.to_string())),
        }
    }

    pub fn on_add_item(&mut self, item: NewItem) -> ActionResponse {
        let name = item.name.clone();
        match self.store.add_item(item) {
            Some(id) => ActionResponse::success(format!("Added {name}."), Some(id.to_string())),
            None => ActionResponse::success("No list selected; nothing changed.", None),
        }
    }

    /// Validates add-item form input, then adds the item.
    pub fn submit_item_form(&mut self, name: &str, quantity: &str, price: &str) -> ActionResponse {
        match validate_item_form(name, quantity, price) {
            Ok(item) => self.on_add_item(item),
            Err(err) => ActionResponse::failure(err.to_string()),
        }
    }

    pub fn on_toggle_bought(&mut self, id: &str) -> ActionResponse {
        let item_id = ItemId::from(id);
        if self.store.current_list().is_none() {
            return ActionResponse::success("No list selected; nothing changed.", None);
        }
        if !self.store.toggle_bought(&item_id) {
            return ActionResponse::failure(format!("No item `{id}` in the current list."));
        }
        let bought = self
            .store
            .current_items()
            .iter()
            .find(|item| item.id == item_id)
            .is_some_and(|item| item.bought);
        let state = if bought { "bought" } else { "not bought" };
        ActionResponse::success(format!("Marked as {state}."), Some(id.to_string()))
    }

    pub fn on_delete_item(&mut self, id: &str) -> ActionResponse {
        if self.store.current_list().is_none() {
            return ActionResponse::success("No list selected; nothing changed.", None);
        }
        if !self.store.delete_item(&ItemId::from(id)) {
            return ActionResponse::failure(format!("No item `{id}` in the current list."));
        }
        ActionResponse::success("Item deleted.", Some(id.to_string()))
    }

    /// Writes the current list as a PDF into `dir`.
    pub fn on_download_pdf(&self, dir: &Path, generated_at: NaiveDateTime) -> ActionResponse {
        match self.export_current_list(dir, generated_at) {
            Ok(path) => ActionResponse::success(
                format!("Exported to {}.", path.display()),
                Some(path.display().to_string()),
            ),
            Err(err) => ActionResponse::failure(format!("Export failed: {err}")),
        }
    }

    pub fn export_current_list(
        &self,
        dir: &Path,
        generated_at: NaiveDateTime,
    ) -> Result<PathBuf, ExportError> {
        let list = self.store.current_list().ok_or(ExportError::NoCurrentList)?;
        let export = ListExport {
            name: &list.name,
            items: &list.items,
            total: self.store.current_total(),
        };
        write_list_pdf(dir, &export, generated_at)
    }

    /// Current total formatted for display, e.g. `$5.48`.
    pub fn total_label(&self) -> String {
        format_price(self.store.current_total())
    }
}
