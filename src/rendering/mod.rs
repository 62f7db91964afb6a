//! Rendering module - the 3D table with Bevy
//!
//! Everything the player sees is spawned here, but nothing here decides
//! game flow. The session queues its scene and tween calls; these systems
//! carry them out.
//!
//! # Architecture
//!
//! - `board` - 64 pickable squares, frame, camera and lights
//! - `pieces` - Primitive piece silhouettes
//! - `hand` - The manipulator and the pieces it carries
//! - `scene_bridge` - [`QueuedScene`] and the system applying its commands
//! - `tween` - [`QueuedTweener`] and eased manipulator motion
//!
//! # Bevy Rendering
//!
//! - `Mesh3d` - Mesh handle component
//! - `MeshMaterial3d<StandardMaterial>` - Material component, one per piece
//!   and per square so glow and highlights stay local
//! - `Pickable` - Mesh picking for pieces and squares; the hand is ignored

pub mod board;
pub mod hand;
pub mod pieces;
pub mod scene_bridge;
pub mod tween;

pub use board::{Board, BoardSquare};
pub use hand::{Carried, Manipulator};
pub use pieces::{PieceAssets, PieceMaterial};
pub use scene_bridge::{QueuedScene, SceneCommand, Visual, VisualIndex, MANIPULATOR_HANDLE};
pub use tween::{QueuedTweener, Tween};
