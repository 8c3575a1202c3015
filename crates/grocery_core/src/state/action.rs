use crate::model::item::{ItemId, NewItem};
use crate::model::list::ListId;

/// A single state transition.
///
/// Ids for created entities are carried on the action so that replaying the
/// same actions yields the same state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    CreateList { id: ListId, name: String },
    SelectList { id: ListId },
    AddItem { id: ItemId, item: NewItem },
    ToggleBought { id: ItemId },
    DeleteItem { id: ItemId },
}

impl Action {
    /// Stable short name used in log events.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateList { .. } => "create_list",
            Self::SelectList { .. } => "select_list",
            Self::AddItem { .. } => "add_item",
            Self::ToggleBought { .. } => "toggle_bought",
            Self::DeleteItem { .. } => "delete_item",
        }
    }
}
