//! The viewer state machine.
//!
//! [`Viewer`] is the single source of truth for what is on screen: the
//! selected document, its rendered pages, the page cursor and which of the two
//! display regions is active. Transitions are methods; a failed conversion
//! leaves every field exactly as it was.
//!
//! ```text
//! NoSelection --select--> Viewing(count, index) <--toggle_picker--> PickingFile
//! ```

pub mod layout;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::convert::{Pipeline, RenderedPages, document_stem, unique_export_path};
use crate::error::ViewerError;

pub use layout::{Region, RegionLayout};

/// The document the user picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub source_path: PathBuf,
    pub source_dir: PathBuf,
}

impl Selection {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        let source_path = source_path.into();
        let source_dir = source_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self {
            source_path,
            source_dir,
        }
    }
}

/// Observable state of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    /// Nothing selected yet; the placeholder is shown.
    NoSelection,
    /// A document is shown at `current_index`.
    Viewing {
        page_count: usize,
        current_index: usize,
    },
    /// The file picker holds the display area.
    PickingFile,
}

#[derive(Debug)]
struct Loaded {
    selection: Selection,
    pages: RenderedPages,
}

/// Owns the selection, the rendered pages and the cursor.
#[derive(Debug)]
pub struct Viewer {
    pipeline: Pipeline,
    export_dir: PathBuf,
    loaded: Option<Loaded>,
    cursor: usize,
    layout: RegionLayout,
}

impl Viewer {
    /// Create a viewer that exports into `export_dir`.
    pub fn new(pipeline: Pipeline, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            pipeline,
            export_dir: export_dir.into(),
            loaded: None,
            cursor: 0,
            layout: RegionLayout::default(),
        }
    }

    pub fn state(&self) -> ViewerState {
        if self.layout.active() == Region::Picker {
            return ViewerState::PickingFile;
        }
        match &self.loaded {
            None => ViewerState::NoSelection,
            Some(loaded) => ViewerState::Viewing {
                page_count: loaded.pages.page_count(),
                current_index: self.cursor,
            },
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.loaded.as_ref().map(|loaded| &loaded.selection)
    }

    pub fn pages(&self) -> Option<&RenderedPages> {
        self.loaded.as_ref().map(|loaded| &loaded.pages)
    }

    pub fn page_count(&self) -> usize {
        self.pages().map_or(0, RenderedPages::page_count)
    }

    pub const fn current_index(&self) -> usize {
        self.cursor
    }

    pub const fn layout(&self) -> &RegionLayout {
        &self.layout
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Image of the page under the cursor, if a non-empty document is loaded.
    pub fn current_page_path(&self) -> Option<PathBuf> {
        self.pages()?.page_path(self.cursor)
    }

    /// Convert `path` and show its first page.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Convert`] if the conversion fails; the previous
    /// selection, pages and cursor are kept.
    pub fn select(&mut self, path: impl AsRef<Path>) -> Result<(), ViewerError> {
        let path = path.as_ref();
        let pages = self.pipeline.convert_to_pages(path)?;
        info!(
            source = %path.display(),
            pages = pages.page_count(),
            "selected document"
        );
        self.loaded = Some(Loaded {
            selection: Selection::new(path),
            pages,
        });
        self.cursor = 0;
        self.layout.show(Region::Pages);
        Ok(())
    }

    /// Swap the picker and the page display. Returns the region now shown.
    pub fn toggle_picker(&mut self) -> Region {
        let region = self.layout.toggle();
        debug!(?region, "toggled picker");
        region
    }

    /// Move to the next page. No-op on the last page or outside `Viewing`.
    pub fn next_page(&mut self) -> bool {
        let ViewerState::Viewing {
            page_count,
            current_index,
        } = self.state()
        else {
            return false;
        };
        if current_index + 1 >= page_count {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move to the previous page. No-op on the first page or outside `Viewing`.
    pub fn prev_page(&mut self) -> bool {
        if !matches!(self.state(), ViewerState::Viewing { .. }) || self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Re-convert the current selection, keeping the cursor where it can stay.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::NoSelection`] if nothing is selected, or
    /// [`ViewerError::Convert`] if the conversion fails (state unchanged).
    pub fn refresh(&mut self) -> Result<(), ViewerError> {
        let loaded = self.loaded.as_mut().ok_or(ViewerError::NoSelection)?;
        let pages = self
            .pipeline
            .convert_to_pages(&loaded.selection.source_path)?;
        self.cursor = clamp_cursor(self.cursor, pages.page_count());
        debug!(
            pages = pages.page_count(),
            cursor = self.cursor,
            "refreshed document"
        );
        loaded.pages = pages;
        Ok(())
    }

    /// Export the selected document as a PDF into the export directory.
    ///
    /// Never overwrites: the first free name of `<stem>.pdf`, `<stem>0.pdf`,
    /// `<stem>1.pdf`, ... is used.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::NoSelection`] if nothing is selected, or
    /// [`ViewerError::Convert`] if the export fails.
    pub fn export(&self) -> Result<PathBuf, ViewerError> {
        let selection = self.selection().ok_or(ViewerError::NoSelection)?;
        let stem = document_stem(&selection.source_path);
        let destination = unique_export_path(&self.export_dir, &stem);
        self.pipeline
            .export_to_artifact(&selection.source_path, &destination)?;
        Ok(destination)
    }
}

const fn clamp_cursor(cursor: usize, page_count: usize) -> usize {
    if page_count == 0 {
        0
    } else if cursor >= page_count {
        page_count - 1
    } else {
        cursor
    }
}
