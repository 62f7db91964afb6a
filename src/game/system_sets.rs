//! System organization using SystemSets
//!
//! Pointer observers feed the session outside the schedule. The per-frame
//! systems then run in this order:
//! 1. **Input** - Handle reset requests and promotion answers
//! 2. **Execution** - Advance manipulator tweens and resume the executor
//! 3. **Visual** - Apply queued scene commands, follow the manipulator, play cues

use bevy::prelude::*;

/// System execution order for the interaction loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum GameSystems {
    /// Reset handling
    Input,

    /// Tween progress and executor resumption
    ///
    /// Systems: tween start, tween advance
    Execution,

    /// Visual updates
    ///
    /// Systems: scene commands, carried pieces, audio cues
    Visual,
}
