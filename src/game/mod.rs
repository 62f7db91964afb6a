//! Chess interaction module - selection, move resolution and animated execution
//!
//! Everything below `plugin` and `system_sets` is pure logic with no ECS
//! coupling. The session talks to the outside world only through the
//! collaborator traits, so the same code runs under Bevy, in the headless
//! runner and in tests.
//!
//! # Module Organization
//!
//! - `types` - Board coordinates, sides, piece kinds, handles
//! - `rules` - [`RulesEngine`](rules::RulesEngine) trait and the bundled standard chess engine
//! - `collaborators` - Scene, Tweener, Feedback and UiSurface contracts
//! - `registry` - Which entity stands on which square
//! - `selection` - Selection state and legal-target highlighting
//! - `resolver` - Invalid / needs-choice / unambiguous classification
//! - `executor` - The eleven-phase move pipeline
//! - `gate` - Interaction lock held while a move animates
//! - `status` - Turn / checkmate / draw text
//! - `session` - Context object that owns all of the above
//! - `plugin` - Bevy front-end wiring
//!
//! # Flow
//!
//! 1. Input: a click selects a piece or targets a square
//! 2. Resolution: the rules engine classifies the attempt
//! 3. Execution: the executor animates and commits, holding the gate
//! 4. Status: the status line is recomputed and the gate released

pub mod collaborators;
pub mod error;
pub mod executor;
pub mod gate;
pub mod plugin;
pub mod registry;
pub mod resolver;
pub mod rules;
pub mod selection;
pub mod session;
pub mod status;
pub mod system_sets;
pub mod types;


pub use plugin::ChessHandPlugin;
pub use session::{Session, SessionConfig};
