//! Presentation-side helpers that stay independent of any renderer.
//!
//! # Responsibility
//! - Validate raw form input before it reaches the store.
//! - Model the delayed, cancelable total display.

pub mod form;
pub mod total;
