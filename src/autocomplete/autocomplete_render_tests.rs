use super::*;
use crate::autocomplete::ListEvent;
use crate::test_utils::test_helpers::{mumbai_results, place};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::style::Modifier;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).unwrap()
}

fn render_list(list: &SuggestionList, anchor: Rect, query: &str) -> (Option<Rect>, String) {
    let mut terminal = create_test_terminal(60, 14);
    let mut area = None;
    terminal
        .draw(|f| {
            area = render_popup(f, anchor, list, query);
        })
        .unwrap();
    (area, terminal.backend().to_string())
}

fn visible_mumbai() -> SuggestionList {
    let mut list = SuggestionList::new();
    list.show_results(mumbai_results());
    list
}

#[test]
fn test_hidden_list_renders_nothing() {
    let list = SuggestionList::new();
    let (area, output) = render_list(&list, Rect::new(0, 0, 60, 3), "mum");

    assert!(area.is_none());
    assert!(!output.contains("Mumbai"));
}

#[test]
fn test_popup_sits_below_anchor() {
    let (area, _) = render_list(&visible_mumbai(), Rect::new(2, 1, 40, 3), "mum");
    let area = area.unwrap();

    assert_eq!(area.x, 2);
    assert_eq!(area.y, 4);
    assert_eq!(area.width, 40);
    assert_eq!(area.height, 4);
}

#[test]
fn test_rows_show_display_names() {
    let (_, output) = render_list(&visible_mumbai(), Rect::new(0, 0, 60, 3), "mum");

    assert!(output.contains("Mumbai, Maharashtra, India"));
    assert!(output.contains("Mumbra, Thane"));
}

#[test]
fn test_active_row_has_marker() {
    let mut list = visible_mumbai();
    list.apply(ListEvent::ArrowDown);
    list.apply(ListEvent::ArrowDown);

    let (_, output) = render_list(&list, Rect::new(0, 0, 60, 3), "mum");
    let marked: Vec<&str> = output.lines().filter(|l| l.contains('►')).collect();

    assert_eq!(marked.len(), 1);
    assert!(marked[0].contains("Mumbra"));
}

#[test]
fn test_matched_span_is_bold() {
    let mut terminal = create_test_terminal(60, 10);
    terminal
        .draw(|f| {
            render_popup(f, Rect::new(0, 0, 60, 3), &visible_mumbai(), "mum");
        })
        .unwrap();

    let buffer = terminal.backend().buffer();
    // Row 4 is the first item: border at x=0, marker at 1..3, "Mum" at 3..6
    let cell = &buffer[(3, 4)];
    assert_eq!(cell.symbol(), "M");
    assert!(cell.modifier.contains(Modifier::BOLD));
    let plain = &buffer[(6, 4)];
    assert_eq!(plain.symbol(), "b");
    assert!(!plain.modifier.contains(Modifier::BOLD));
}

#[test]
fn test_list_capped_at_max_visible() {
    let mut list = SuggestionList::new();
    list.show_results((0..8).map(|i| place(i, "Thane")).collect());

    let (area, _) = render_list(&list, Rect::new(0, 0, 60, 3), "tha");
    assert_eq!(area.unwrap().height, MAX_VISIBLE_SUGGESTIONS as u16 + 2);
}

#[test]
fn test_no_room_below_anchor() {
    let (area, _) = render_list(&visible_mumbai(), Rect::new(0, 11, 60, 3), "mum");
    assert!(area.is_none());
}

#[test]
fn test_row_at_maps_inner_rows() {
    let list = visible_mumbai();
    let popup_area = Rect::new(0, 3, 40, 4);

    assert_eq!(row_at(popup_area, 5, 4, &list), Some(0));
    assert_eq!(row_at(popup_area, 5, 5, &list), Some(1));
    // Borders and outside
    assert_eq!(row_at(popup_area, 5, 3, &list), None);
    assert_eq!(row_at(popup_area, 0, 4, &list), None);
    assert_eq!(row_at(popup_area, 5, 7, &list), None);
}

#[test]
fn test_row_at_ignores_rows_past_results() {
    let list = visible_mumbai();
    let popup_area = Rect::new(0, 3, 40, 6);
    assert_eq!(row_at(popup_area, 5, 6, &list), None);
}

#[test]
fn test_clipped_popup_keeps_active_row_drawn() {
    let mut list = SuggestionList::new();
    list.show_results((0..5).map(|i| place(i, &format!("Place {i}"))).collect());
    for _ in 0..5 {
        list.apply(ListEvent::ArrowDown);
    }
    assert_eq!(list.active(), Some(4));

    // Room for two rows between the field and the bottom edge
    let (area, output) = render_list(&list, Rect::new(0, 7, 60, 3), "pla");
    let area = area.unwrap();
    assert_eq!(area.height, 4);
    assert!(output.contains("► Place 4"));
    assert!(output.contains("Place 3"));
    assert!(!output.contains("Place 0"));

    assert_eq!(row_at(area, 5, area.y + 1, &list), Some(3));
    assert_eq!(row_at(area, 5, area.y + 2, &list), Some(4));
}
