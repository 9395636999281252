//! Notification state management
//!
//! Transient messages (config warnings, confirmations) and the blocking
//! validation prompt shown when a booking cannot be submitted.

use std::time::{Duration, Instant};

use ratatui::style::Color;

use crate::theme;

/// Notification type - determines style and lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationType {
    /// Short-lived confirmation
    #[default]
    Info,
    /// Longer-lived, e.g. an unreadable config file
    Warning,
    /// Blocking prompt; stays until the next key press
    Error,
}

impl NotificationType {
    fn duration(self) -> Option<Duration> {
        match self {
            NotificationType::Info => Some(Duration::from_secs(2)),
            NotificationType::Warning => Some(Duration::from_secs(8)),
            NotificationType::Error => None,
        }
    }

    fn style(self) -> NotificationStyle {
        let colors = match self {
            NotificationType::Info => &theme::notification::INFO,
            NotificationType::Warning => &theme::notification::WARNING,
            NotificationType::Error => &theme::notification::ERROR,
        };
        NotificationStyle {
            fg: colors.fg,
            bg: colors.bg,
            border: colors.border,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotificationStyle {
    pub fg: Color,
    pub bg: Color,
    pub border: Color,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub style: NotificationStyle,
    pub notification_type: NotificationType,
    pub created_at: Instant,
    pub duration: Option<Duration>, // None = until dismissed
}

impl Notification {
    pub fn new(message: &str) -> Self {
        Self::with_type(message, NotificationType::Info)
    }

    pub fn with_type(message: &str, notification_type: NotificationType) -> Self {
        Self {
            message: message.to_string(),
            style: notification_type.style(),
            notification_type,
            created_at: Instant::now(),
            duration: notification_type.duration(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.duration {
            Some(d) => now.saturating_duration_since(self.created_at) > d,
            None => false,
        }
    }
}

#[derive(Debug, Default)]
pub struct NotificationState {
    pub current: Option<Notification>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: &str) {
        self.current = Some(Notification::new(message));
    }

    pub fn show_with_type(&mut self, message: &str, notification_type: NotificationType) {
        self.current = Some(Notification::with_type(message, notification_type));
    }

    pub fn show_warning(&mut self, message: &str) {
        self.show_with_type(message, NotificationType::Warning);
    }

    /// Show a blocking prompt that swallows the next key press
    pub fn show_error(&mut self, message: &str) {
        self.show_with_type(message, NotificationType::Error);
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// True while a prompt is waiting to be acknowledged
    pub fn is_blocking(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|n| n.notification_type == NotificationType::Error)
    }

    /// Clear expired notification, returns true if cleared
    pub fn clear_if_expired(&mut self) -> bool {
        if let Some(ref notif) = self.current
            && notif.is_expired()
        {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    #[cfg(test)]
    pub fn current_message(&self) -> Option<&str> {
        self.current.as_ref().map(|n| n.message.as_str())
    }
}

#[cfg(test)]
#[path = "notification_state_tests.rs"]
mod notification_state_tests;
