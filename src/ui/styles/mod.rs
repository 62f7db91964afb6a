//! UI styling for the table
//!
//! Shared colors so the status bar and promotion dialog match.

pub mod colors;

pub use colors::*;
