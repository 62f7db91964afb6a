//! Contracts the interaction logic consumes
//!
//! The session never touches meshes, timers or audio devices directly. It
//! drives four collaborators through these traits:
//!
//! - [`Scene`] - places, highlights, reparents and picks visuals
//! - [`Tweener`] - moves one visual towards a target and reports completion
//! - [`Feedback`] - sound cues
//! - [`UiSurface`] - promotion prompt and status text
//!
//! The Bevy front-end implements them over ECS; `crate::headless` implements
//! them with plain bookkeeping for tests and scripted runs.

use serde::{Deserialize, Serialize};

use super::types::{PieceKind, Point3, Position, ScreenPoint, Side, VisualHandle};

/// Width of one board square in scene units
pub const SQUARE_SIZE: f32 = 2.0;

/// Scene-space centre of `position` at ground height
///
/// Files run along x and ranks along z, with the board centred on the origin.
pub fn square_center(position: Position) -> Point3 {
    let (file, rank) = position.coordinates();
    Point3::new(axis_coordinate(file), 0.0, axis_coordinate(rank))
}

/// Square under a ground-plane point, `None` off the board
pub fn square_at(x: f32, z: f32) -> Option<Position> {
    let file = axis_index(x)?;
    let rank = axis_index(z)?;
    Position::new(file, rank)
}

fn axis_coordinate(index: u8) -> f32 {
    index as f32 * SQUARE_SIZE - 4.0 * SQUARE_SIZE + SQUARE_SIZE / 2.0
}

fn axis_index(coordinate: f32) -> Option<u8> {
    let index = ((coordinate + 4.0 * SQUARE_SIZE) / SQUARE_SIZE).floor();
    (0.0..8.0).contains(&index).then_some(index as u8)
}

/// Colour class for a square highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightClass {
    /// The selected piece's own square
    Source,
    /// Quiet destination
    Move,
    /// Destination that removes an opposing piece
    Capture,
}

/// Emissive glow applied to a single visual
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    /// `0xRRGGBB`
    pub color: u32,
    pub intensity: f32,
}

impl Glow {
    /// Colour split into linear `[r, g, b]` in `0.0..=1.0`
    pub fn rgb(&self) -> [f32; 3] {
        let channel = |shift: u32| ((self.color >> shift) & 0xff) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }
}

/// Transform parent for a visual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Manipulator,
    Root,
}

/// Result of resolving a pointer position against the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    Piece(VisualHandle),
    Square(Position),
    Nothing,
}

/// Sound feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Select,
    Move,
    Capture,
}

/// Renderer/scene graph
pub trait Scene {
    /// Create the visual for a piece standing on `at`
    fn place_entity(&mut self, kind: PieceKind, side: Side, at: Position) -> VisualHandle;

    fn remove_entity(&mut self, handle: VisualHandle);

    /// Instantly set a visual's world position
    fn move_visual(&mut self, handle: VisualHandle, at: Point3);

    /// Change a visual's parent without altering its world transform
    fn reparent(&mut self, handle: VisualHandle, parent: Parent);

    /// The visual that physically carries pieces
    fn manipulator(&self) -> VisualHandle;

    fn highlight(&mut self, position: Position, class: HighlightClass);

    fn clear_highlights(&mut self);

    fn set_glow(&mut self, handle: VisualHandle, glow: Option<Glow>);

    fn pick(&self, point: ScreenPoint) -> PickTarget;
}

/// Easing curves used by the manipulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
}

impl Easing {
    /// Map linear progress `t` in `0.0..=1.0` onto the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Identifies one in-flight motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MotionTicket(pub u64);

/// Outcome of starting a motion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Completion will be reported later with this ticket
    Pending(MotionTicket),
    /// The visual is already at the target
    Finished,
}

/// Animation driver
pub trait Tweener {
    fn animate(&mut self, handle: VisualHandle, target: Point3, duration_ms: u32, easing: Easing) -> Motion;
}

/// Sound feedback sink
pub trait Feedback {
    fn cue(&mut self, cue: Cue);
}

/// Promotion prompt and status line
pub trait UiSurface {
    fn show_promotion_prompt(&mut self, side: Side);

    fn hide_promotion_prompt(&mut self);

    fn set_status(&mut self, text: &str);
}
