//! Notification module for lorry
//!
//! Transient messages in the corner of the screen and the blocking
//! validation prompt.

mod notification_render;
mod notification_state;

pub use notification_render::render_notification;
pub use notification_state::{NotificationState, NotificationType};
