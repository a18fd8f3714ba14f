use ::image::imageops::FilterType;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui_image::protocol::StatefulProtocolType;
use ratatui_image::{Resize, StatefulImage};

use crate::app::{DisplaySource, Model};

/// Draw the current page image, or a text stand-in when there is none.
pub fn render_pages(model: &mut Model, frame: &mut Frame, area: Rect) {
    let title = model
        .viewer
        .current_page_path()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_default();
    let block = Block::default().borders(Borders::TOP).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(protocol) = model.page_image.as_mut() {
        let resize = if matches!(protocol.protocol_type(), StatefulProtocolType::Halfblocks(_)) {
            // Nearest-neighbor causes strong color aliasing artifacts in half-cell mode.
            Resize::Scale(Some(FilterType::CatmullRom))
        } else {
            Resize::Scale(None)
        };
        frame.render_stateful_widget(StatefulImage::default().resize(resize), inner, protocol);
        return;
    }

    let text = fallback_text(model);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    let y = inner.y + inner.height / 2;
    let line_area = Rect {
        y,
        height: inner.height.saturating_sub(y - inner.y),
        ..inner
    };
    frame.render_widget(paragraph, line_area);
}

pub fn fallback_text(model: &Model) -> String {
    match model.display_source() {
        DisplaySource::Empty => "(document has no pages)".to_string(),
        DisplaySource::Placeholder => "folio: press ctrl+O to pick a markdown file".to_string(),
        DisplaySource::Page(path) if !model.images_enabled || model.image_picker.is_none() => {
            format!("[page image: {}]", path.display())
        }
        DisplaySource::Page(path) => format!("[page image unavailable: {}]", path.display()),
    }
}
