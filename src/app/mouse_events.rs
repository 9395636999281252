//! Mouse event dispatcher
//!
//! Routes clicks to the component under the pointer. A click anywhere outside a
//! field and its dropdown closes that dropdown.

use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use super::app_state::App;
use crate::autocomplete::{ListEvent, row_at};
use crate::booking::{FocusShift, FormFocus};
use crate::layout::{Region, region_at};
use crate::search::FieldId;

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        handle_click(app, mouse);
    }
}

fn handle_click(app: &mut App, mouse: MouseEvent) {
    app.mark_dirty();

    if app.notification.is_blocking() {
        app.notification.dismiss();
        return;
    }

    let region = region_at(&app.layout_regions, mouse.column, mouse.row);

    for id in FieldId::ALL {
        let inside = matches!(region, Some(Region::Field(f) | Region::Suggestions(f)) if f == id);
        if !inside {
            app.form
                .field_mut(id)
                .apply_list_event(ListEvent::ClickOutside, &mut app.search);
        }
    }

    match region {
        Some(Region::Suggestions(id)) => click_suggestion(app, id, mouse),
        Some(Region::Field(id)) => app.form.set_focus(id.into()),
        Some(Region::VehicleCard(index)) => {
            app.form.set_focus(FormFocus::Vehicles);
            app.form.vehicles.select(index);
        }
        Some(Region::VehiclePanel) => app.form.set_focus(FormFocus::Vehicles),
        None => {}
    }
}

fn click_suggestion(app: &mut App, id: FieldId, mouse: MouseEvent) {
    let Some((_, popup_area)) = app.layout_regions.suggestions else {
        return;
    };

    let field = app.form.field_mut(id);
    let Some(index) = row_at(popup_area, mouse.column, mouse.row, field.list()) else {
        return;
    };

    if field.apply_list_event(ListEvent::ClickItem(index), &mut app.search)
        == Some(FocusShift::NextField)
    {
        app.form.focus_next();
    }
}

#[cfg(test)]
#[path = "mouse_events_tests.rs"]
mod mouse_events_tests;
