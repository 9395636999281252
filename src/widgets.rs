//! Small layout helpers shared by popups and overlays

pub mod popup;
