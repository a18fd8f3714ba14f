use std::rc::Rc;

use ratatui::prelude::*;

use crate::app::Model;
use crate::viewer::{Region, RegionLayout};

use super::{FOOTER_ROWS, pages, picker, status};

/// Split `area` into the picker and page regions by their current shares.
///
/// Index 0 is the picker, index 1 the page display.
pub fn split_regions(area: Rect, layout: &RegionLayout) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(layout.share(Region::Picker)),
            Constraint::Percentage(layout.share(Region::Pages)),
        ])
        .split(area)
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();
    let toast_active = model.active_toast().is_some();
    let footer_rows = FOOTER_ROWS + u16::from(toast_active);

    let main_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let regions = split_regions(main_area, model.viewer.layout());
    if regions[0].height > 0 {
        picker::render_picker(model, frame, regions[0]);
    }
    if regions[1].height > 0 {
        pages::render_pages(model, frame, regions[1]);
    }

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);
}
