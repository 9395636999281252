//! Layout module for tracking UI component regions
//!
//! `LayoutRegions` records where each component was drawn during the last
//! render pass, and `region_at()` maps a mouse position back to a component.

mod layout_regions;

pub use layout_hit_test::region_at;
pub use layout_regions::{LayoutRegions, Region};
