//! Use-case layer: persistence adapter and the session composition root.
//!
//! # Responsibility
//! - Keep view code decoupled from storage and serialization details.
//! - Route persistence through an explicit store observer.

pub mod persistence;
pub mod session;
