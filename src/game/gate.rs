//! Interaction gate
//!
//! Held for the whole lifetime of a move animation. Every pointer-driven
//! entry point on the session checks it first and does nothing while it is
//! held, so two move pipelines can never interleave.

use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionGate {
    locked: bool,
}

impl InteractionGate {
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        debug!("[GATE] Locked");
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        debug!("[GATE] Released");
        self.locked = false;
    }
}
