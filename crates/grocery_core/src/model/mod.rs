//! Grocery domain model.
//!
//! # Responsibility
//! - Define the canonical item/list/app-data shapes shared by store,
//!   persistence and presentation.
//! - Keep the persisted JSON wire shape stable (camelCase field names).
//!
//! # Invariants
//! - Items are exclusively owned by one list; no sharing across lists.
//! - Item and list identities are opaque strings, never reused.

pub mod app_data;
pub mod item;
pub mod list;
