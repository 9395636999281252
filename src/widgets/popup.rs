use ratatui::{Frame, layout::Rect, widgets::Clear};

pub fn centered_popup(frame_area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(frame_area.width);
    let popup_height = height.min(frame_area.height);

    let popup_x = frame_area.x + (frame_area.width.saturating_sub(popup_width)) / 2;
    let popup_y = frame_area.y + (frame_area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: popup_x,
        y: popup_y,
        width: popup_width,
        height: popup_height,
    }
}

/// Area directly under `anchor`, as wide as it, clipped to the bottom of `frame_area`
pub fn popup_below_anchor(anchor: Rect, frame_area: Rect, height: u16) -> Rect {
    let popup_y = anchor.y.saturating_add(anchor.height);
    let frame_bottom = frame_area.y.saturating_add(frame_area.height);

    Rect {
        x: anchor.x,
        y: popup_y,
        width: anchor.width,
        height: height.min(frame_bottom.saturating_sub(popup_y)),
    }
}

pub fn inset_rect(area: Rect, horizontal_margin: u16, vertical_margin: u16) -> Rect {
    Rect {
        x: area.x + horizontal_margin,
        y: area.y + vertical_margin,
        width: area.width.saturating_sub(horizontal_margin * 2),
        height: area.height.saturating_sub(vertical_margin * 2),
    }
}

pub fn clear_area(frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);
}
