//! Error types for the conversion pipeline and the viewer.
//!
//! [`ConvertError`] covers the three ways turning a markdown file into pages
//! can fail. [`ViewerError`] wraps it and adds the one failure that belongs to
//! the viewer itself: asking for something that needs a selection when there
//! is none.
//!
//! Every variant is terminal for the single user action that raised it. The
//! viewer never commits partial state, so callers can report the error and
//! carry on.

use std::path::PathBuf;

use thiserror::Error;

/// A failed conversion step.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The markdown source was missing or unreadable.
    #[error("cannot read '{}': {source}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Styled markup could not be laid out into a PDF.
    #[error("layout of '{}' failed: {detail}", path.display())]
    Layout { path: PathBuf, detail: String },

    /// The PDF could not be turned into page images.
    #[error("rasterizing '{}' failed: {detail}", path.display())]
    Rasterize { path: PathBuf, detail: String },
}

/// A rejected viewer transition.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// The operation needs a selected document.
    #[error("no document selected")]
    NoSelection,

    #[error(transparent)]
    Convert(#[from] ConvertError),
}

impl ViewerError {
    /// Whether this is the benign "nothing selected" case.
    pub const fn is_no_selection(&self) -> bool {
        matches!(self, Self::NoSelection)
    }
}
