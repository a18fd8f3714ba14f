//! Terminal UI components.
//!
//! The screen is the two display regions stacked in one area (only one of
//! them has any height at a time) above the toast and status lines:
//! - [`render`]: frame layout and region split
//! - page region: the current page image, or a text stand-in
//! - picker region: the directory listing

mod pages;
mod picker;
mod render;
mod status;

pub use render::{render, split_regions};

/// Rows always reserved below the display regions for the status bar.
pub const FOOTER_ROWS: u16 = 1;
