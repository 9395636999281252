//! Centralized theme configuration for all UI components.
//!
//! All colors and styles are defined here. Render files use
//! `theme::module::CONSTANT` instead of hardcoding `Color::*` values.
//!
//! Theme: Dusk Highway - amber accents over a slate background

use ratatui::style::{Color, Modifier, Style};

/// Core color palette - shared base colors
pub mod palette {
    use super::*;

    pub const TEXT: Color = Color::Rgb(232, 230, 223);
    pub const TEXT_DIM: Color = Color::Rgb(98, 104, 117);
    pub const TEXT_MUTED: Color = Color::Rgb(141, 147, 160);

    pub const BG_DARK: Color = Color::Rgb(28, 32, 40);
    pub const BG_SURFACE: Color = Color::Rgb(38, 43, 54);

    pub const AMBER: Color = Color::Rgb(255, 179, 71);
    pub const TEAL: Color = Color::Rgb(72, 201, 176);
    pub const RED: Color = Color::Rgb(231, 99, 99);
    pub const SAND: Color = Color::Rgb(242, 208, 122);
}

/// Location input fields
pub mod field {
    use super::*;

    pub const BORDER_FOCUSED: Color = palette::AMBER;
    pub const BORDER_UNFOCUSED: Color = palette::TEXT_DIM;
    pub const TITLE_FOCUSED: Style = Style::new()
        .fg(palette::AMBER)
        .add_modifier(Modifier::BOLD);
    pub const TITLE_UNFOCUSED: Style = Style::new().fg(palette::TEXT_MUTED);

    // Shown in the title while a lookup is in flight
    pub const LOADING: Color = palette::SAND;
    // Shown in the title once a suggestion has been committed
    pub const RESOLVED: Color = palette::TEAL;

    pub const TEXT_UNFOCUSED: Color = palette::TEXT_MUTED;
    pub const PLACEHOLDER: Style = Style::new().fg(palette::TEXT_DIM);
    pub const CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);
}

/// Suggestion dropdown
pub mod autocomplete {
    use super::*;

    pub const BORDER: Color = palette::AMBER;
    pub const BACKGROUND: Color = palette::BG_DARK;

    pub const ITEM_NORMAL_FG: Color = palette::TEXT;
    pub const ITEM_NORMAL_BG: Color = palette::BG_DARK;
    pub const ITEM_ACTIVE_FG: Color = palette::BG_DARK;
    pub const ITEM_ACTIVE_BG: Color = palette::AMBER;

    // Matched span inside an inactive row; active rows keep their fg and go bold
    pub const MATCH_FG: Color = palette::SAND;
    pub const MATCH_MODIFIER: Modifier = Modifier::BOLD;
}

/// Truck picker cards
pub mod vehicles {
    use super::*;

    pub const BORDER_FOCUSED: Color = palette::AMBER;
    pub const BORDER_UNFOCUSED: Color = palette::TEXT_DIM;
    pub const CARD_BORDER: Color = palette::TEXT_DIM;
    pub const CARD_SELECTED_BORDER: Color = palette::TEAL;
    pub const CARD_SELECTED_BG: Color = palette::BG_SURFACE;
    pub const NAME: Style = Style::new().fg(palette::TEXT).add_modifier(Modifier::BOLD);
    pub const DETAIL: Color = palette::TEXT_MUTED;
    pub const PRICE: Color = palette::SAND;
}

/// Notification styles
pub mod notification {
    use super::*;

    pub struct NotificationColors {
        pub fg: Color,
        pub bg: Color,
        pub border: Color,
    }

    pub const INFO: NotificationColors = NotificationColors {
        fg: palette::TEXT,
        bg: palette::BG_SURFACE,
        border: palette::TEXT_MUTED,
    };

    pub const WARNING: NotificationColors = NotificationColors {
        fg: palette::BG_DARK,
        bg: palette::SAND,
        border: palette::SAND,
    };

    pub const ERROR: NotificationColors = NotificationColors {
        fg: palette::TEXT,
        bg: palette::RED,
        border: Color::Rgb(255, 140, 140),
    };

    pub const DISMISS_HINT: Style = Style::new().add_modifier(Modifier::DIM);
}

/// Bottom status line
pub mod help_line {
    use super::*;

    pub const KEY: Color = palette::TEXT_MUTED;
    pub const DESCRIPTION: Color = palette::TEXT_DIM;
    pub const SEPARATOR: Color = palette::TEXT_DIM;
}

/// App title bar
pub mod title {
    use super::*;

    pub const TEXT: Style = Style::new()
        .fg(palette::AMBER)
        .add_modifier(Modifier::BOLD);
    pub const SUBTITLE: Color = palette::TEXT_MUTED;
}

/// Helpers for styled keyboard hints on borders and the status line
pub mod border_hints {
    use super::*;
    use ratatui::text::{Line, Span};

    pub fn hint(key: &'static str, desc: &'static str, key_color: Color) -> Vec<Span<'static>> {
        vec![
            Span::styled(key, Style::new().fg(key_color)),
            Span::styled(
                format!(" {} ", desc),
                Style::new().fg(help_line::DESCRIPTION),
            ),
        ]
    }

    pub fn build_hints(hints: &[(&'static str, &'static str)], key_color: Color) -> Line<'static> {
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("· ", Style::new().fg(help_line::SEPARATOR)));
            }
            spans.extend(hint(key, desc, key_color));
        }
        Line::from(spans)
    }
}
