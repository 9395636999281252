use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::field_controller::FieldController;
use super::vehicle::VehicleSelector;
use crate::search::FieldId;
use crate::theme;

pub const FIELD_HEIGHT: u16 = 3;
pub const VEHICLE_PANEL_HEIGHT: u16 = 7;
const CARD_MIN_WIDTH: u16 = 14;

/// Draw one location field and return its area
pub fn render_field(
    frame: &mut Frame,
    area: Rect,
    field: &mut FieldController,
    focused: bool,
) -> Rect {
    let (border_color, title_style) = if focused {
        (theme::field::BORDER_FOCUSED, theme::field::TITLE_FOCUSED)
    } else {
        (theme::field::BORDER_UNFOCUSED, theme::field::TITLE_UNFOCUSED)
    };

    let label = match field.id() {
        FieldId::Pickup => " Pickup ",
        FieldId::Dropoff => " Drop ",
    };
    let mut title_spans = vec![Span::styled(label, title_style)];
    if field.is_loading() {
        title_spans.push(Span::styled(
            "⟳ searching… ",
            Style::default().fg(theme::field::LOADING),
        ));
    } else if field
        .selected_location()
        .is_some_and(|location| location.display_name == field.text())
    {
        title_spans.push(Span::styled(
            "✓ ",
            Style::default().fg(theme::field::RESOLVED),
        ));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title_spans))
        .border_style(Style::default().fg(border_color));

    if focused && field.list().is_visible() {
        let hints = theme::border_hints::build_hints(
            &[("↑↓", "Move"), ("Enter", "Pick"), ("Esc", "Close")],
            theme::field::BORDER_FOCUSED,
        );
        block = block.title_bottom(hints.alignment(Alignment::Right));
    }

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let textarea = field.textarea_mut();
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_style(theme::field::PLACEHOLDER);
    if focused {
        textarea.set_style(Style::default().fg(theme::palette::TEXT));
        textarea.set_cursor_style(theme::field::CURSOR);
    } else {
        textarea.set_style(Style::default().fg(theme::field::TEXT_UNFOCUSED));
        textarea.set_cursor_style(Style::default());
    }

    frame.render_widget(&*textarea, inner_area);
    area
}

/// Draw the truck cards side by side.
///
/// Returns the panel area and, for each card drawn, its catalogue index and area.
/// When the panel is too narrow for every card, the window slides to keep the
/// selected card in view.
pub fn render_vehicles(
    frame: &mut Frame,
    area: Rect,
    selector: &VehicleSelector,
    focused: bool,
) -> (Rect, Vec<(usize, Rect)>) {
    let border_color = if focused {
        theme::vehicles::BORDER_FOCUSED
    } else {
        theme::vehicles::BORDER_UNFOCUSED
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Truck type ")
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let options = selector.options();
    if options.is_empty() || inner.width == 0 {
        return (area, Vec::new());
    }

    let fit = (inner.width / CARD_MIN_WIDTH).max(1) as usize;
    let shown = options.len().min(fit);
    let first = match selector.selected_index() {
        Some(selected) if selected >= shown => selected + 1 - shown,
        _ => 0,
    };
    let cards = Layout::horizontal(vec![Constraint::Ratio(1, shown as u32); shown]).split(inner);

    let mut card_areas = Vec::with_capacity(shown);
    let window = options.iter().enumerate().skip(first);
    for ((index, vehicle), card_area) in window.zip(cards.iter()) {
        let selected = selector.selected_index() == Some(index);
        let (card_border, card_bg) = if selected {
            (
                theme::vehicles::CARD_SELECTED_BORDER,
                theme::vehicles::CARD_SELECTED_BG,
            )
        } else {
            (theme::vehicles::CARD_BORDER, theme::palette::BG_DARK)
        };

        let card = Paragraph::new(vec![
            Line::styled(vehicle.name.clone(), theme::vehicles::NAME),
            Line::styled(
                vehicle.capacity.clone(),
                Style::default().fg(theme::vehicles::DETAIL),
            ),
            Line::styled(
                vehicle.price.clone(),
                Style::default().fg(theme::vehicles::PRICE),
            ),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(card_border))
                .style(Style::default().bg(card_bg)),
        );

        frame.render_widget(card, *card_area);
        card_areas.push((index, *card_area));
    }

    (area, card_areas)
}

#[cfg(test)]
#[path = "booking_render_tests.rs"]
mod booking_render_tests;
