use log::warn;

use crate::components::view_toggle::View;
use crate::config::{DEFAULT_HEADER_OFFSET, EVENTS_FRAGMENT};
use crate::dom::{Dom, ScrollMode};

/// What a click on an in-page link should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorAction {
    /// Not a usable fragment link, let the browser handle it.
    Ignore,
    ShowEvents,
    ShowMain(String),
    Scroll(String),
}

/// Returns the element id a fragment href points at, if any. A bare `#` is
/// not a target.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn route_anchor(href: &str, current: View) -> AnchorAction {
    let Some(id) = fragment_id(href) else {
        return AnchorAction::Ignore;
    };
    if href == EVENTS_FRAGMENT {
        return AnchorAction::ShowEvents;
    }
    match current {
        View::Main => AnchorAction::Scroll(id.to_string()),
        View::AllEvents => AnchorAction::ShowMain(id.to_string()),
    }
}

pub fn scroll_offset(element_top: f64, header_height: Option<f64>) -> f64 {
    element_top - header_height.unwrap_or(DEFAULT_HEADER_OFFSET)
}

/// Smooth-scrolls so the element sits just below the header. Returns the
/// element, or `None` when the id does not resolve.
pub fn scroll_to_section<D: Dom>(dom: &D, id: &str) -> Option<D::Node> {
    let Some(target) = dom.element_by_id(id) else {
        warn!("Smooth scroll target #{} not found", id);
        return None;
    };
    let top = scroll_offset(dom.page_top(&target), dom.header_height());
    dom.scroll_to(top, ScrollMode::Smooth);
    Some(target)
}
