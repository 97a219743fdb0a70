//! Blocking-dialog gate

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handle to an externally owned "a blocking dialog is active" flag.
///
/// Clones share the flag. The dialog layer keeps one clone and flips it;
/// the transfer session checks its clone before opening or closing
/// containers and before processing drag ticks.
#[derive(Debug, Clone, Default)]
pub struct ConfirmationGate {
    active: Arc<AtomicBool>,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let gate = ConfirmationGate::new();
        let dialog = gate.clone();
        assert!(!gate.is_active());

        dialog.set_active(true);
        assert!(gate.is_active());

        dialog.set_active(false);
        assert!(!gate.is_active());
    }
}
