//! Chess Hand - a 3D chess table where a mechanical hand plays every move
//!
//! - `game` - the interaction session and everything it owns, free of ECS
//! - `headless` - windowless collaborators and a move-script runner
//! - `core` - settings and their persistence
//! - `rendering`, `input`, `audio`, `ui` - the Bevy front-end

pub mod audio;
pub mod core;
pub mod game;
pub mod headless;
pub mod input;
pub mod rendering;
pub mod ui;
