use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use super::highlight::highlight;
use super::suggestion_list::SuggestionList;
use crate::theme;
use crate::widgets::popup;

pub const MAX_VISIBLE_SUGGESTIONS: usize = crate::geocoding::MAX_RESULTS;
const POPUP_BORDER_HEIGHT: u16 = 2;

/// Draw the dropdown under `anchor` and return the area it occupies.
///
/// Returns `None` when the list is hidden or there is no room below the field.
pub fn render_popup(
    frame: &mut Frame,
    anchor: Rect,
    list: &SuggestionList,
    query: &str,
) -> Option<Rect> {
    if !list.is_visible() {
        return None;
    }

    let suggestions = list.suggestions();
    let visible_count = suggestions.len().min(MAX_VISIBLE_SUGGESTIONS);
    let popup_height = (visible_count as u16) + POPUP_BORDER_HEIGHT;
    let popup_area = popup::popup_below_anchor(anchor, frame.area(), popup_height);
    if popup_area.height <= POPUP_BORDER_HEIGHT {
        return None;
    }

    let rows = usize::from(popup_area.height - POPUP_BORDER_HEIGHT);
    let first = first_visible_row(list, rows);

    let items: Vec<ListItem> = suggestions
        .iter()
        .enumerate()
        .skip(first)
        .take(rows.min(MAX_VISIBLE_SUGGESTIONS))
        .map(|(i, suggestion)| {
            let parts = highlight(&suggestion.display_name, query);
            let is_active = list.active() == Some(i);

            let (marker, base) = if is_active {
                (
                    "► ",
                    Style::default()
                        .fg(theme::autocomplete::ITEM_ACTIVE_FG)
                        .bg(theme::autocomplete::ITEM_ACTIVE_BG),
                )
            } else {
                (
                    "  ",
                    Style::default()
                        .fg(theme::autocomplete::ITEM_NORMAL_FG)
                        .bg(theme::autocomplete::ITEM_NORMAL_BG),
                )
            };
            let matched = if is_active {
                base.add_modifier(theme::autocomplete::MATCH_MODIFIER)
            } else {
                base.fg(theme::autocomplete::MATCH_FG)
                    .add_modifier(theme::autocomplete::MATCH_MODIFIER)
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, base),
                Span::styled(parts.prefix, base),
                Span::styled(parts.matched, matched),
                Span::styled(parts.suffix, base),
            ]))
        })
        .collect();

    popup::clear_area(frame, popup_area);

    let list_widget = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::autocomplete::BORDER))
            .style(Style::default().bg(theme::autocomplete::BACKGROUND)),
    );

    frame.render_widget(list_widget, popup_area);
    Some(popup_area)
}

/// Index of the first drawn row when only `rows` fit, keeping the active row on screen
fn first_visible_row(list: &SuggestionList, rows: usize) -> usize {
    list.active().map_or(0, |active| (active + 1).saturating_sub(rows.max(1)))
}

/// Suggestion under a screen position, if any
pub fn row_at(popup_area: Rect, column: u16, row: u16, list: &SuggestionList) -> Option<usize> {
    let inner = popup::inset_rect(popup_area, 1, 1);
    if column < inner.x
        || column >= inner.x + inner.width
        || row < inner.y
        || row >= inner.y + inner.height
    {
        return None;
    }

    let index = first_visible_row(list, usize::from(inner.height)) + usize::from(row - inner.y);
    (index < list.suggestions().len()).then_some(index)
}

#[cfg(test)]
#[path = "autocomplete_render_tests.rs"]
mod autocomplete_render_tests;
