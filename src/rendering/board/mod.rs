//! Board rendering module
//!
//! Squares, frame, camera and lights.

pub mod board;

pub use board::*;
