use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::keymap::{Intent, label_for};
use crate::viewer::ViewerState;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let status = status_text(model);
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn status_text(model: &Model) -> String {
    let filename = model
        .viewer
        .selection()
        .and_then(|s| s.source_path.file_name())
        .map_or_else(
            || "no document".to_string(),
            |name| name.to_string_lossy().to_string(),
        );

    let position = match model.viewer.state() {
        ViewerState::Viewing {
            page_count: 0,
            ..
        } => "  [no pages]".to_string(),
        ViewerState::Viewing {
            page_count,
            current_index,
        } => format!("  [page {}/{}]", current_index + 1, page_count),
        ViewerState::PickingFile => "  [open file]".to_string(),
        ViewerState::NoSelection => String::new(),
    };
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };

    let hint = |intent: Intent| label_for(intent).unwrap_or_default();
    format!(
        " {filename}{position}{watch_indicator}  {}:open {}/{}:page {}:refresh {}:export q:quit",
        hint(Intent::TogglePicker),
        hint(Intent::NextPage),
        hint(Intent::PrevPage),
        hint(Intent::Refresh),
        hint(Intent::Export),
    )
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
