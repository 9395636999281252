//! lorry library - location autocomplete for a truck booking form
//!
//! This library exposes the core functionality of lorry for testing purposes.

pub mod app;
pub mod autocomplete;
pub mod booking;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod layout;
pub mod notification;
pub mod search;

#[cfg(test)]
pub mod test_utils;
pub mod theme;
pub mod widgets;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::Config;
