//! Location autocomplete: dropdown state machine, match highlighting and rendering

mod autocomplete_render;
mod highlight;
mod suggestion_list;

pub use autocomplete_render::{MAX_VISIBLE_SUGGESTIONS, render_popup, row_at};
pub use highlight::{Highlight, highlight};
pub use suggestion_list::{ListEvent, SuggestionList};
