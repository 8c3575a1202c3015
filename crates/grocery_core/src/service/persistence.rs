//! Persistence adapter between the store and the durable slot.
//!
//! # Responsibility
//! - Round-trip `AppData` as JSON through a single versioned slot key.
//! - Discard corrupt slot contents wholesale instead of adopting parts.
//! - Provide the store observer that writes through after every change.
//!
//! # Invariants
//! - A loaded value either fully matches the expected shape or is dropped.
//! - A loaded `current_list_id` always references a loaded list.
//! - Nothing is written before hydration or while there are zero lists.
//! - Storage failures are logged and never reach the caller of a store
//!   mutation; in-memory state stays authoritative.

use crate::model::app_data::AppData;
use crate::repo::slot_repo::{RepoError, SlotRepository};
use crate::state::store::{StoreObserver, StoreState};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key for the current `AppData` shape.
///
/// Bump the suffix when the shape changes; values under old keys are ignored.
pub const APP_DATA_SLOT_KEY: &str = "grocery_app_data_v1";

#[derive(Debug)]
pub enum PersistError {
    Serialize(serde_json::Error),
    Storage(RepoError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize app data: {err}"),
            Self::Storage(err) => write!(f, "slot storage failed: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<RepoError> for PersistError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Result of reading the slot.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Nothing stored, or a stored value without any list.
    Missing,
    /// Stored value failed to parse or validate and was removed.
    Corrupt(String),
    /// The slot could not be read at all.
    Unavailable(String),
    Loaded(AppData),
}

impl LoadOutcome {
    /// Collapses every non-`Loaded` outcome into "no data".
    pub fn into_data(self) -> Option<AppData> {
        match self {
            Self::Loaded(data) => Some(data),
            Self::Missing | Self::Corrupt(_) | Self::Unavailable(_) => None,
        }
    }
}

pub struct PersistenceAdapter<R: SlotRepository> {
    repo: R,
    key: String,
}

impl<R: SlotRepository> PersistenceAdapter<R> {
    pub fn new(repo: R) -> Self {
        Self::with_key(repo, APP_DATA_SLOT_KEY)
    }

    pub fn with_key(repo: R, key: impl Into<String>) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Reads, validates and repairs the stored `AppData`.
    pub fn load(&self) -> LoadOutcome {
        let raw = match self.repo.read_slot(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(
                    "event=persist_load module=persist status=ok result=missing key={}",
                    self.key
                );
                return LoadOutcome::Missing;
            }
            Err(err) => {
                error!(
                    "event=persist_load module=persist status=error error_code=slot_read_failed key={} error={err}",
                    self.key
                );
                return LoadOutcome::Unavailable(err.to_string());
            }
        };

        let mut data = match serde_json::from_str::<AppData>(&raw) {
            Ok(data) => data,
            Err(err) => {
                warn!(
                    "event=persist_load module=persist status=error error_code=corrupt_slot key={} error={err}",
                    self.key
                );
                self.discard();
                return LoadOutcome::Corrupt(err.to_string());
            }
        };

        if data.lists.is_empty() {
            info!(
                "event=persist_load module=persist status=ok result=empty key={}",
                self.key
            );
            return LoadOutcome::Missing;
        }

        if data.repair_current_list() {
            warn!(
                "event=persist_load module=persist status=ok result=repaired_current_list key={}",
                self.key
            );
        }
        info!(
            "event=persist_load module=persist status=ok result=loaded key={} lists={}",
            self.key,
            data.lists.len()
        );
        LoadOutcome::Loaded(data)
    }

    /// Serializes the whole `AppData` and overwrites the slot.
    pub fn save(&self, data: &AppData) -> Result<(), PersistError> {
        let raw = serde_json::to_string(data)?;
        self.repo.write_slot(&self.key, &raw)?;
        Ok(())
    }

    fn discard(&self) {
        if let Err(err) = self.repo.remove_slot(&self.key) {
            error!(
                "event=persist_discard module=persist status=error error_code=slot_remove_failed key={} error={err}",
                self.key
            );
        }
    }
}

/// Whether a state snapshot may be written to the slot.
///
/// Un-hydrated state would clobber stored data with the empty initial value,
/// and a state with zero lists is treated as "not yet initialized".
pub fn should_persist(state: &StoreState) -> bool {
    state.hydrated && !state.data.lists.is_empty()
}

/// Store observer writing every persisted-eligible change through to the slot.
pub struct PersistObserver<R: SlotRepository> {
    adapter: PersistenceAdapter<R>,
}

impl<R: SlotRepository> PersistObserver<R> {
    pub fn new(adapter: PersistenceAdapter<R>) -> Self {
        Self { adapter }
    }
}

impl<R: SlotRepository> StoreObserver for PersistObserver<R> {
    fn on_change(&mut self, state: &StoreState) {
        if !should_persist(state) {
            info!(
                "event=persist_save module=persist status=skip hydrated={} lists={}",
                state.hydrated,
                state.data.lists.len()
            );
            return;
        }
        if let Err(err) = self.adapter.save(&state.data) {
            error!(
                "event=persist_save module=persist status=error error_code=save_failed key={} error={err}",
                self.adapter.key()
            );
        }
    }
}
