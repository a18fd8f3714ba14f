use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Model;

/// Draw the directory listing with the highlighted row reversed.
pub fn render_picker(model: &mut Model, frame: &mut Frame, area: Rect) {
    let title = format!(" Open: {} ", model.file_picker.path().display());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = usize::from(inner.height);
    model.file_picker.scroll_into_view(rows);
    let width = usize::from(inner.width);

    let selected = model.file_picker.selected_index();
    let lines: Vec<Line> = model
        .file_picker
        .entries()
        .iter()
        .enumerate()
        .skip(model.file_picker.scroll_offset())
        .take(rows)
        .map(|(idx, entry)| {
            let is_selected = idx == selected;
            let marker = if is_selected { "> " } else { "  " };
            let suffix = if entry.is_dir && entry.name != ".." { "/" } else { "" };
            let label = truncate_to_width(
                &format!("{marker}{}{suffix}", entry.name),
                width,
            );
            let mut style = if entry.is_dir {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            if is_selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Line::from(Span::styled(label, style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Cut `text` to at most `width` terminal columns.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
