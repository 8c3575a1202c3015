//! Core domain logic for the grocery list tracker.
//! This crate is the single source of truth for list/item invariants.

pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod state;
pub mod view;

pub use export::{export_file_name, render_list_pdf, write_list_pdf, ExportError, ListExport};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::app_data::AppData;
pub use model::item::{compute_total, format_price, GroceryItem, ItemId, NewItem};
pub use model::list::{GroceryList, ListId, DEFAULT_LIST_NAME};
pub use repo::slot_repo::{
    MemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use service::persistence::{
    should_persist, LoadOutcome, PersistError, PersistObserver, PersistenceAdapter,
    APP_DATA_SLOT_KEY,
};
pub use service::session::{ActionResponse, GrocerySession, HydrationSource};
pub use state::action::Action;
pub use state::reducer::{reduce, replay};
pub use state::store::{GroceryStore, StoreObserver, StoreState, SubscriptionId};
pub use view::form::{validate_item_form, validate_list_name, FieldError, FormError, FormField};
pub use view::total::{TotalDisplay, TOTAL_ANIMATION_DELAY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
