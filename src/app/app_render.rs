use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::app_state::App;
use crate::autocomplete::render_popup;
use crate::booking::{FIELD_HEIGHT, FormFocus, VEHICLE_PANEL_HEIGHT, render_field, render_vehicles};
use crate::notification::render_notification;
use crate::search::FieldId;
use crate::theme;

const TITLE_HEIGHT: u16 = 2;

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        self.layout_regions.clear();

        let layout = Layout::vertical([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(VEHICLE_PANEL_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

        render_title(frame, layout[0]);

        let focus = self.form.focus();
        for (id, area) in [(FieldId::Pickup, layout[1]), (FieldId::Dropoff, layout[2])] {
            let focused = focus.field() == Some(id);
            let rect = render_field(frame, area, self.form.field_mut(id), focused);
            self.layout_regions.set_field(id, rect);
        }

        let (panel, cards) = render_vehicles(
            frame,
            layout[3],
            &self.form.vehicles,
            focus == FormFocus::Vehicles,
        );
        self.layout_regions.vehicle_panel = Some(panel);
        self.layout_regions.vehicle_cards = cards;

        render_help_line(frame, layout[5], focus);

        // Only the focused field can have an open dropdown
        if let Some(id) = focus.field()
            && let Some(anchor) = self.layout_regions.field(id)
        {
            let field = self.form.field(id);
            if let Some(popup_rect) = render_popup(frame, anchor, field.list(), field.text()) {
                self.layout_regions.suggestions = Some((id, popup_rect));
            }
        }

        render_notification(frame, &mut self.notification);
    }
}

fn render_title(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(" Book a Lorry", theme::title::TEXT)),
        Line::from(Span::styled(
            " Pick up and drop anywhere in India",
            Style::default().fg(theme::title::SUBTITLE),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_help_line(frame: &mut Frame, area: Rect, focus: FormFocus) {
    let hints: &[(&'static str, &'static str)] = match focus {
        FormFocus::Pickup | FormFocus::Dropoff => &[
            ("Tab", "Next"),
            ("↑↓", "Suggestions"),
            ("Ctrl+S", "Book"),
            ("Esc", "Quit"),
        ],
        FormFocus::Vehicles => &[
            ("←→", "Truck"),
            ("Enter", "Book"),
            ("Shift+Tab", "Back"),
            ("Esc", "Quit"),
        ],
    };
    frame.render_widget(
        Paragraph::new(theme::border_hints::build_hints(hints, theme::help_line::KEY)),
        area,
    );
}

#[cfg(test)]
#[path = "app_render_tests.rs"]
mod app_render_tests;
