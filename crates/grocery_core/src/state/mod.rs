//! State management: pure reducer plus the observable store that owns it.
//!
//! # Responsibility
//! - Express every mutation as an `Action` applied by a pure reducer.
//! - Notify registered observers after each state change.
//!
//! # Invariants
//! - Item actions only ever touch the current list.
//! - Item actions are silent no-ops when no list is current.

pub mod action;
pub mod reducer;
pub mod store;
