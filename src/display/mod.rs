//! Presentation helpers for the report binary
//!
//! The engine never consults this module; it maps engine output to colours
//! and text.

pub mod palette;
pub mod text;

pub use palette::{Palette, Rgb};
pub use text::render_report;
