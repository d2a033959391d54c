//! Shared utilities

pub mod display;

pub use display::{BoardFormatter, Color, ColorOutput};
