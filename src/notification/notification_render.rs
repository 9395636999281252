//! Notification rendering
//!
//! Transient notifications sit in the top-right corner; a blocking prompt is
//! drawn centered with a dismiss hint.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::notification_state::{Notification, NotificationState};
use crate::theme;
use crate::widgets::popup;

const DISMISS_HINT: &str = "Press any key to continue";

/// Render the current notification on top of everything else
pub fn render_notification(frame: &mut Frame, notification: &mut NotificationState) {
    notification.clear_if_expired();

    let Some(notif) = notification.current() else {
        return;
    };

    if notification.is_blocking() {
        render_prompt(frame, notif);
    } else {
        render_corner(frame, notif);
    }
}

fn render_corner(frame: &mut Frame, notif: &Notification) {
    let style = &notif.style;

    let content_width = notif.message.chars().count() as u16;
    let notification_width = content_width + 4; // 2 padding + 2 borders
    let notification_height = 3;

    let frame_area = frame.area();
    let margin = 2;
    let notification_area = Rect {
        x: frame_area
            .width
            .saturating_sub(notification_width + margin),
        y: margin,
        width: notification_width.min(frame_area.width.saturating_sub(margin * 2)),
        height: notification_height.min(frame_area.height.saturating_sub(margin * 2)),
    };

    if notification_area.width < 5 || notification_area.height < 3 {
        return;
    }

    popup::clear_area(frame, notification_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style.border).bg(style.bg))
        .style(Style::default().bg(style.bg));

    let text = Line::from(Span::styled(
        format!(" {} ", notif.message),
        Style::default().fg(style.fg).bg(style.bg),
    ));

    frame.render_widget(Paragraph::new(text).block(block), notification_area);
}

fn render_prompt(frame: &mut Frame, notif: &Notification) {
    let style = &notif.style;

    let content_width = notif
        .message
        .chars()
        .count()
        .max(DISMISS_HINT.len()) as u16;
    // message, blank, hint + borders
    let area = popup::centered_popup(frame.area(), content_width + 6, 5);
    if area.width < 5 || area.height < 3 {
        return;
    }

    popup::clear_area(frame, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(style.border).bg(style.bg))
        .style(Style::default().bg(style.bg));

    let text_style = Style::default().fg(style.fg).bg(style.bg);
    let lines = vec![
        Line::from(Span::styled(notif.message.clone(), text_style)),
        Line::raw(""),
        Line::from(Span::styled(
            DISMISS_HINT,
            text_style.patch(theme::notification::DISMISS_HINT),
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

#[cfg(test)]
#[path = "notification_render_tests.rs"]
mod notification_render_tests;
