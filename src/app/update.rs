use crate::app::Model;
use crate::keymap::Intent;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Viewer intents
    /// Show the next page
    NextPage,
    /// Show the previous page
    PrevPage,
    /// Swap the picker and page regions
    TogglePicker,
    /// Re-convert the selected document
    Refresh,
    /// Export the selected document to a PDF
    Export,

    // Picker
    /// Move the picker highlight up
    PickerUp,
    /// Move the picker highlight down
    PickerDown,
    /// Enter the highlighted directory or select the highlighted file
    PickerConfirm,
    /// Go to the parent directory
    PickerParent,

    // File watching
    /// The selected source changed on disk
    SourceChanged,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

impl From<Intent> for Message {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Export => Self::Export,
            Intent::NextPage => Self::NextPage,
            Intent::PrevPage => Self::PrevPage,
            Intent::Refresh => Self::Refresh,
            Intent::TogglePicker => Self::TogglePicker,
        }
    }
}

/// Apply the in-memory part of a message.
///
/// Conversions, exports and directory listings touch the filesystem and run
/// afterwards in `App::handle_message_side_effects`.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::NextPage => {
            if model.viewer.next_page() {
                model.mark_display_stale();
            }
        }
        Message::PrevPage => {
            if model.viewer.prev_page() {
                model.mark_display_stale();
            }
        }
        Message::TogglePicker => {
            model.viewer.toggle_picker();
        }
        Message::PickerUp => {
            model.file_picker.move_up();
            model.file_picker.scroll_into_view(usize::from(model.picker_rows));
        }
        Message::PickerDown => {
            model.file_picker.move_down();
            model.file_picker.scroll_into_view(usize::from(model.picker_rows));
        }
        Message::Resize(_, height) => {
            model.picker_rows = height.saturating_sub(3);
            model.file_picker.scroll_into_view(usize::from(model.picker_rows));
        }
        Message::Quit => {
            model.should_quit = true;
        }
        Message::Refresh
        | Message::Export
        | Message::PickerConfirm
        | Message::PickerParent
        | Message::SourceChanged
        | Message::Redraw => {}
    }
    model
}
