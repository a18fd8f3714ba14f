use tracing::{info, warn};

use crate::app::{App, Message, Model, ToastLevel};
use crate::error::ViewerError;
use crate::picker::PickOutcome;
use crate::watcher::{DEFAULT_DEBOUNCE, SourceWatcher};

impl App {
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        watcher: &mut Option<SourceWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::Refresh | Message::SourceChanged => {
                Self::refresh(model, matches!(msg, Message::Refresh));
            }
            Message::Export => Self::export(model),
            Message::PickerConfirm => match model.file_picker.confirm() {
                Ok(PickOutcome::Chosen(path)) => {
                    model.select(&path);
                }
                Ok(PickOutcome::Entered(_) | PickOutcome::Nothing) => {}
                Err(err) => {
                    model.show_toast(ToastLevel::Error, format!("Browse failed: {err:#}"));
                }
            },
            Message::PickerParent => {
                if let Err(err) = model.file_picker.go_up() {
                    model.show_toast(ToastLevel::Error, format!("Browse failed: {err:#}"));
                }
            }
            _ => {}
        }
        Self::sync_watcher(model, watcher);
    }

    fn refresh(model: &mut Model, manual: bool) {
        match model.viewer.refresh() {
            Ok(()) => {
                model.mark_display_stale();
                if manual {
                    model.show_toast(ToastLevel::Info, "Refreshed");
                }
            }
            Err(ViewerError::NoSelection) => {
                model.show_toast(ToastLevel::Info, "Nothing to refresh");
            }
            Err(err) => {
                warn!(%err, "refresh failed");
                model.show_toast(ToastLevel::Error, format!("Refresh failed: {err}"));
            }
        }
    }

    fn export(model: &mut Model) {
        match model.viewer.export() {
            Ok(path) => {
                info!(path = %path.display(), "exported document");
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
                model.show_toast(ToastLevel::Info, format!("Exported {name}"));
            }
            Err(ViewerError::NoSelection) => {
                model.show_toast(ToastLevel::Info, "Nothing to export");
            }
            Err(err) => {
                warn!(%err, "export failed");
                model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
            }
        }
    }

    /// Keep the watcher on the selected source while watching is enabled.
    pub(super) fn sync_watcher(model: &mut Model, watcher: &mut Option<SourceWatcher>) {
        if !model.watch_enabled {
            *watcher = None;
            return;
        }
        let Some(source) = model
            .viewer
            .selection()
            .map(|selection| selection.source_path.clone())
        else {
            return;
        };
        if watcher.as_ref().is_some_and(|w| w.watches(&source)) {
            return;
        }
        match SourceWatcher::new(&source, DEFAULT_DEBOUNCE) {
            Ok(w) => *watcher = Some(w),
            Err(err) => {
                *watcher = None;
                model.watch_enabled = false;
                warn!(path = %source.display(), %err, "watch unavailable");
                model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
            }
        }
    }
}
