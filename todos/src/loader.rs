//! Loading indicator.

use crate::types::TodoState;

/// Text of the loading indicator
pub const LOADING_TEXT: &str = "loading content";

/// The indicator to show, if any
#[must_use]
pub const fn render(is_loading: bool) -> Option<&'static str> {
    if is_loading { Some(LOADING_TEXT) } else { None }
}

/// The indicator for the given state
#[must_use]
pub const fn render_state(state: &TodoState) -> Option<&'static str> {
    render(state.is_loading)
}
