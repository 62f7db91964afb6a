//! Input module - Bevy picking and observer patterns
//!
//! Pieces and squares register `.observe(callback)` handlers at spawn time
//! instead of polling pointer events globally.
//!
//! - `pointer` - Click and hover observers that forward to the session

pub mod pointer;

pub use pointer::*;
