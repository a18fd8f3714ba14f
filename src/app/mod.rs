//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: In-memory state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{DisplaySource, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::convert::raster::DEFAULT_PAGE_WIDTH;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug, Clone)]
pub struct App {
    file: Option<PathBuf>,
    watch_enabled: bool,
    images_enabled: bool,
    force_half_cell: bool,
    wkhtmltopdf: Option<PathBuf>,
    pdfium_library: Option<PathBuf>,
    page_width: u32,
}

impl Default for App {
    fn default() -> Self {
        Self::new(None)
    }
}

impl App {
    /// Create a new application, optionally opening `file` at startup.
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            file,
            watch_enabled: false,
            images_enabled: true,
            force_half_cell: false,
            wkhtmltopdf: None,
            pdfium_library: None,
            page_width: DEFAULT_PAGE_WIDTH,
        }
    }

    /// Enable or disable refreshing when the source changes on disk.
    pub fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    /// Enable or disable page image rendering.
    pub fn with_images_enabled(mut self, enabled: bool) -> Self {
        self.images_enabled = enabled;
        self
    }

    /// Force half-cell image rendering.
    pub fn with_force_half_cell(mut self, enabled: bool) -> Self {
        self.force_half_cell = enabled;
        self
    }

    /// Use a specific `wkhtmltopdf` executable.
    pub fn with_wkhtmltopdf(mut self, program: Option<PathBuf>) -> Self {
        self.wkhtmltopdf = program;
        self
    }

    /// Load pdfium from this directory.
    pub fn with_pdfium_library(mut self, dir: Option<PathBuf>) -> Self {
        self.pdfium_library = dir;
        self
    }

    /// Width of rendered page images in pixels.
    pub fn with_page_width(mut self, width: Option<u32>) -> Self {
        self.page_width = width.unwrap_or(DEFAULT_PAGE_WIDTH);
        self
    }
}

#[cfg(test)]
mod tests;
