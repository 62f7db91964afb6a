//! Chess pieces rendering module
//!
//! Primitive silhouettes and per-piece materials.

pub mod pieces;

pub use pieces::*;
