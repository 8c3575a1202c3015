//! Key-value slot storage.
//!
//! # Responsibility
//! - Define the durable string-keyed slot contract used by persistence.
//! - Keep SQLite details inside the storage boundary.
//!
//! # Invariants
//! - A slot holds at most one value; writes overwrite.
//! - Keys are non-empty.

pub mod slot_repo;
