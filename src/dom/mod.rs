//! Browser driver
//!
//! Binds the core components to the live document. Compiled only for
//! `wasm32`; everything above this module is platform-free.

mod fragments;
mod lightbox;
mod listener;
mod runtime;
mod submitters;
mod surfaces;
mod timer;

pub use listener::EventListener;
pub use runtime::PageRuntime;
pub use submitters::{HttpSubmitter, SimulatedSubmitter};
pub use timer::{sleep, Timer};

use crate::error::{UiError, UiResult};
use crate::time::{Clock, Timestamp};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Performance, Window};

pub(crate) fn window() -> UiResult<Window> {
    web_sys::window().ok_or_else(|| UiError::MissingElement("window".to_string()))
}

pub(crate) fn document() -> UiResult<Document> {
    window()?
        .document()
        .ok_or_else(|| UiError::MissingElement("document".to_string()))
}

/// First match for a selector, None when absent or the selector is invalid
pub(crate) fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// All elements matching a selector, in document order
pub(crate) fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn query_all_within(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `performance.now()` as a [`Clock`]
pub struct PerformanceClock {
    performance: Option<Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> Timestamp {
        self.performance
            .as_ref()
            .map(|p| Timestamp::from_millis_f64(p.now()))
            .unwrap_or_default()
    }
}

/// Run `on_ready` once the document has been parsed
pub fn on_document_ready<F>(on_ready: F) -> UiResult<()>
where
    F: FnOnce() + 'static,
{
    let document = document()?;
    if document.ready_state() != "loading" {
        on_ready();
        return Ok(());
    }
    let callback = wasm_bindgen::closure::Closure::once_into_js(on_ready);
    document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
    Ok(())
}
