//! Single-slot toast notifications.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub const TOAST_DURATION_MS: u64 = 2200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// Hands out toast ids. A hide timer only clears the slot when it still holds
/// the toast it was started for, so a newer message gets its full duration.
#[derive(Debug, Clone, Default)]
pub struct ToastSlot(Arc<AtomicU64>);

impl ToastSlot {
    pub fn show(&self, message: impl Into<String>) -> Toast {
        let id = self.0.fetch_add(1, Ordering::SeqCst) + 1;
        Toast {
            id,
            message: message.into(),
        }
    }

    pub fn should_hide(&self, toast_id: u64) -> bool {
        self.0.load(Ordering::SeqCst) == toast_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_toast_outlives_older_timer() {
        let slot = ToastSlot::default();
        let first = slot.show("✓ Cache cleared");
        let second = slot.show("⚠ Failed to update favorite");
        assert!(!slot.should_hide(first.id));
        assert!(slot.should_hide(second.id));
        assert_eq!(second.message, "⚠ Failed to update favorite");
    }
}
