//! Delayed total display.
//!
//! The displayed total trails the real total by `TOTAL_ANIMATION_DELAY`, and a
//! newer target cancels any pending one, so only the latest value is ever
//! shown. Time is passed in by the caller; nothing here sleeps or spawns.
//!
//! This is a library surface for interactive renderers, which feed it from a
//! store subscription. The one-shot `grocery` CLI prints settled totals and
//! does not use it.

use crate::model::item::format_price;
use std::time::{Duration, Instant};

pub const TOTAL_ANIMATION_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTotal {
    value: f64,
    due_at: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalDisplay {
    displayed: f64,
    target: f64,
    pending: Option<PendingTotal>,
    delay: Duration,
}

impl TotalDisplay {
    pub fn new(initial: f64) -> Self {
        Self::with_delay(initial, TOTAL_ANIMATION_DELAY)
    }

    pub fn with_delay(initial: f64, delay: Duration) -> Self {
        Self {
            displayed: initial,
            target: initial,
            pending: None,
            delay,
        }
    }

    /// Schedules `total` to be shown after the delay, replacing any pending
    /// value. Setting the value already targeted keeps the pending deadline.
    pub fn set_target(&mut self, total: f64, now: Instant) {
        if total == self.target && (self.pending.is_some() || total == self.displayed) {
            return;
        }
        self.target = total;
        self.pending = Some(PendingTotal {
            value: total,
            due_at: now + self.delay,
        });
    }

    /// Applies the pending value when due and returns what should be shown.
    pub fn tick(&mut self, now: Instant) -> f64 {
        if let Some(pending) = self.pending {
            if now >= pending.due_at {
                self.displayed = pending.value;
                self.pending = None;
            }
        }
        self.displayed
    }

    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// True while the shown value lags the latest total; renderers highlight
    /// the total during this window.
    pub fn is_animating(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any pending change and shows the latest total immediately.
    pub fn settle(&mut self) -> f64 {
        self.pending = None;
        self.displayed = self.target;
        self.displayed
    }

    pub fn label(&self) -> String {
        format_price(self.displayed)
    }
}
