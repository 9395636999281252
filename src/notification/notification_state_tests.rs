//! Tests for notification_state

use super::*;
use proptest::prelude::*;

#[test]
fn test_info_notification() {
    let notif = Notification::new("Booking saved");
    assert_eq!(notif.message, "Booking saved");
    assert_eq!(notif.notification_type, NotificationType::Info);
    assert_eq!(notif.duration, Some(Duration::from_secs(2)));
    assert_eq!(notif.style.bg, theme::notification::INFO.bg);
    assert!(!notif.is_expired());
}

#[test]
fn test_warning_notification() {
    let notif = Notification::with_type("Invalid config", NotificationType::Warning);
    assert_eq!(notif.duration, Some(Duration::from_secs(8)));
    assert_eq!(notif.style.fg, theme::notification::WARNING.fg);
}

#[test]
fn test_error_notification_never_expires() {
    let notif = Notification::with_type("Please select a truck type", NotificationType::Error);
    assert_eq!(notif.duration, None);
    assert_eq!(notif.style.bg, theme::notification::ERROR.bg);
    assert!(!notif.is_expired_at(Instant::now() + Duration::from_secs(3600)));
}

#[test]
fn test_expiry_at_explicit_instant() {
    let notif = Notification::new("Short");
    assert!(!notif.is_expired_at(notif.created_at + Duration::from_millis(1999)));
    assert!(notif.is_expired_at(notif.created_at + Duration::from_millis(2001)));
}

#[test]
fn test_show_and_dismiss() {
    let mut state = NotificationState::new();
    assert!(state.current().is_none());

    state.show("Hello");
    assert_eq!(state.current_message(), Some("Hello"));

    state.dismiss();
    assert!(state.current().is_none());
}

#[test]
fn test_blocking_only_for_errors() {
    let mut state = NotificationState::new();
    assert!(!state.is_blocking());

    state.show_warning("Config invalid");
    assert!(!state.is_blocking());

    state.show_error("Please select a truck type");
    assert!(state.is_blocking());
}

#[test]
fn test_clear_if_expired() {
    let mut state = NotificationState::new();
    state.show("Test");
    assert!(!state.clear_if_expired());

    if let Some(ref mut notif) = state.current {
        notif.created_at -= Duration::from_secs(5);
    }
    assert!(state.clear_if_expired());
    assert!(state.current().is_none());
}

#[test]
fn test_error_survives_clear_if_expired() {
    let mut state = NotificationState::new();
    state.show_error("Please select a drop location from the suggestions");
    assert!(!state.clear_if_expired());
    assert!(state.is_blocking());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Only the most recent message is ever shown
    #[test]
    fn prop_notification_replacement(messages in prop::collection::vec("[a-zA-Z0-9 ]{1,50}", 1..10)) {
        let mut state = NotificationState::new();
        for msg in &messages {
            state.show(msg);
        }
        let last_message = messages.last().unwrap();
        prop_assert_eq!(state.current_message(), Some(last_message.as_str()));
    }
}
