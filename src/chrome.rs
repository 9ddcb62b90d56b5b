//! Page chrome: header/footer fragments, navbar state and the
//! text-selection guard
//!
//! Only the decisions live here; the DOM driver fetches, injects and
//! listens.

use crate::config::{FragmentSlotConfig, FragmentsConfig};

// =============================================================================
// FRAGMENTS
// =============================================================================

/// Reusable HTML snippet injected at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment {
    Header,
    Footer,
}

impl Fragment {
    pub const ALL: [Fragment; 2] = [Fragment::Header, Fragment::Footer];

    pub fn slot(self, config: &FragmentsConfig) -> &FragmentSlotConfig {
        match self {
            Fragment::Header => &config.header,
            Fragment::Footer => &config.footer,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Fragment::Header => "header",
            Fragment::Footer => "footer",
        }
    }
}

// =============================================================================
// NAV LINKS
// =============================================================================

const HOME_PAGE: &str = "index.html";

/// Last segment of a location pathname
pub fn current_page(pathname: &str) -> &str {
    pathname.rsplit('/').next().unwrap_or_default()
}

/// Whether a nav link's `href` points at the page being viewed
pub fn link_is_current(href: &str, page: &str) -> bool {
    href == page || ((page.is_empty() || page == "/") && href == HOME_PAGE)
}

/// Navbar gets its compact style once the page scrolls past `threshold`
pub fn navbar_is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

// =============================================================================
// FOOTER WIDTH
// =============================================================================

/// Inline styles forcing the footer to span the viewport
pub const FOOTER_STYLES: &[(&str, &str)] = &[
    ("width", "100%"),
    ("max-width", "100%"),
    ("box-sizing", "border-box"),
    ("left", "0"),
    ("right", "0"),
    ("overflow", "hidden"),
];

pub const FOOTER_CONTENT_STYLES: &[(&str, &str)] = &[
    ("width", "100%"),
    ("max-width", "100%"),
    ("box-sizing", "border-box"),
];

pub const FOOTER_COPYRIGHT_STYLES: &[(&str, &str)] =
    &[("width", "100%"), ("box-sizing", "border-box")];

// =============================================================================
// SELECTION GUARD
// =============================================================================

const TEXT_TAGS: &[&str] = &["P", "H1", "H2", "H3", "H4", "H5", "H6", "LI", "SPAN", "LABEL"];

/// What the mousedown guard knows about the event target
#[derive(Debug, Clone, Default)]
pub struct PointerTarget {
    pub tag: String,
    pub contenteditable: bool,
    pub classes: Vec<String>,
    pub parent_classes: Vec<String>,
}

impl PointerTarget {
    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// Whether a mousedown should have its default (drag/select) suppressed
///
/// Editable and text elements are never touched; images, SVG and
/// carousel parts are.
pub fn suppress_mousedown(target: &PointerTarget) -> bool {
    let tag = target.tag.to_ascii_uppercase();
    if tag == "INPUT"
        || tag == "TEXTAREA"
        || target.contenteditable
        || TEXT_TAGS.contains(&tag.as_str())
    {
        return false;
    }
    tag == "IMG"
        || tag == "SVG"
        || target.has_class("carousel")
        || target.has_class("slide")
        || target.parent_classes.iter().any(|c| c == "flickr_loaded")
}
