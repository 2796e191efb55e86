//! Short-lived confirmation messages.

use std::time::{Duration, Instant};

pub const TOAST_DURATION: Duration = Duration::from_millis(1200);

/// A single toast slot. Showing a message replaces whatever was there; the
/// message disappears on its own once [`TOAST_DURATION`] has passed.
#[derive(Debug, Clone, Default)]
pub struct Toast {
    current: Option<(String, Instant)>,
}

impl Toast {
    pub fn show(&mut self, message: impl Into<String>) {
        self.show_at(message, Instant::now());
    }

    pub fn show_at(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some((message.into(), now));
    }

    pub fn message(&self) -> Option<&str> {
        self.message_at(Instant::now())
    }

    pub fn message_at(&self, now: Instant) -> Option<&str> {
        match &self.current {
            Some((message, shown)) if now.saturating_duration_since(*shown) < TOAST_DURATION => {
                Some(message)
            }
            _ => None,
        }
    }
}
