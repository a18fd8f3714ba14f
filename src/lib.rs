// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. picker::FilePicker)
    clippy::module_name_repetitions
)]

//! # Folio
//!
//! Page through markdown files as typeset PDF pages in the terminal.
//!
//! A selected markdown file goes through a conversion pipeline:
//! - markdown to styled HTML with a fixed stylesheet
//! - HTML to a paginated PDF
//! - PDF to one PNG image per page
//!
//! The viewer then shows one page image at a time and can export the PDF.
//!
//! ## Architecture
//!
//! Folio uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`convert`]: Markdown to PDF to page images
//! - [`viewer`]: Selection, paging and region layout state machine
//! - [`keymap`]: Key bindings for viewer actions
//! - [`picker`]: Directory listing for choosing a file
//! - [`ui`]: Terminal UI components
//! - [`image`]: Terminal image protocol setup and image loading
//! - [`watcher`]: File watching

pub mod app;
pub mod config;
pub mod convert;
pub mod error;
pub mod image;
pub mod keymap;
pub mod picker;
pub mod scratch;
pub mod ui;
pub mod viewer;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::convert::{Pipeline, RenderedPages};
    pub use crate::error::{ConvertError, ViewerError};
    pub use crate::viewer::{Viewer, ViewerState};
}
