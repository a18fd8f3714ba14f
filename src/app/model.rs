use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use ratatui_image::picker::Picker;
use ratatui_image::protocol::StatefulProtocol;
use tracing::warn;

use crate::picker::FilePicker;
use crate::viewer::Viewer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// What the page region should be showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplaySource {
    /// The bundled front page, before anything is selected.
    Placeholder,
    /// A rendered page image.
    Page(PathBuf),
    /// A selected document that rendered to zero pages.
    Empty,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Selection, pages, cursor and region layout
    pub viewer: Viewer,
    /// Directory listing shown in the picker region
    pub file_picker: FilePicker,
    /// Terminal image protocol picker (None when images are disabled)
    pub image_picker: Option<Picker>,
    /// Whether page images are drawn at all
    pub images_enabled: bool,
    /// Whether the source file is watched for changes
    pub watch_enabled: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Rows available to the picker list, for keeping the highlight visible
    pub picker_rows: u16,
    /// Source the page region currently points at
    display_source: DisplaySource,
    /// Scaled image for `display_source`
    pub page_image: Option<StatefulProtocol>,
    /// Set when the image behind `display_source` must be re-read
    display_stale: bool,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("viewer", &self.viewer)
            .field("picker_dir", &self.file_picker.path())
            .field("display_source", &self.display_source)
            .field("watch_enabled", &self.watch_enabled)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model showing the placeholder.
    pub fn new(viewer: Viewer, file_picker: FilePicker, terminal_size: (u16, u16)) -> Self {
        Self {
            viewer,
            file_picker,
            image_picker: None,
            images_enabled: true,
            watch_enabled: false,
            should_quit: false,
            picker_rows: terminal_size.1.saturating_sub(3),
            display_source: DisplaySource::Placeholder,
            page_image: None,
            display_stale: true,
            toast: None,
        }
    }

    /// Set the terminal image picker.
    pub fn with_image_picker(mut self, picker: Option<Picker>) -> Self {
        self.image_picker = picker;
        self
    }

    pub const fn display_source(&self) -> &DisplaySource {
        &self.display_source
    }

    /// Select `path` in the viewer, reporting failure as a toast.
    pub fn select(&mut self, path: &Path) -> bool {
        match self.viewer.select(path) {
            Ok(()) => {
                self.mark_display_stale();
                true
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "select failed");
                self.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
                false
            }
        }
    }

    /// Force the page image to be re-read before the next frame.
    pub const fn mark_display_stale(&mut self) {
        self.display_stale = true;
    }

    /// Where the page region should point given the viewer state.
    pub fn wanted_source(&self) -> DisplaySource {
        if self.viewer.pages().is_none() {
            return DisplaySource::Placeholder;
        }
        self.viewer
            .current_page_path()
            .map_or(DisplaySource::Empty, DisplaySource::Page)
    }

    /// Point the page region at the viewer's current page, reloading the
    /// image when the source moved or was regenerated.
    pub fn sync_display(&mut self) {
        let wanted = self.wanted_source();
        if !self.display_stale && wanted == self.display_source {
            return;
        }
        self.display_source = wanted;
        self.display_stale = false;
        self.reload_display();
    }

    fn reload_display(&mut self) {
        self.page_image = None;
        if !self.images_enabled {
            return;
        }
        let Some(picker) = &self.image_picker else {
            return;
        };
        let image = match &self.display_source {
            DisplaySource::Placeholder => crate::image::placeholder_image(),
            DisplaySource::Page(path) => crate::image::load_page(path),
            DisplaySource::Empty => return,
        };
        match image {
            Ok(image) => self.page_image = Some(picker.new_resize_protocol(image)),
            Err(err) => {
                warn!(%err, "page image unavailable");
                self.show_toast(ToastLevel::Warning, format!("{err:#}"));
            }
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}
