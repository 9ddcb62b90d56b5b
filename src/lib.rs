//! Inspec site behavior layer
//!
//! Client-side behaviors for the static marketing site: image carousel,
//! mobile menu, header/footer fragments, lightbox gallery and the contact
//! form. The state machines are platform-free and tested natively; the
//! `dom` module binds them to the browser when built for `wasm32`.

pub mod carousel;
pub mod chrome;
pub mod config;
pub mod error;
pub mod form;
pub mod lightbox;
pub mod menu;
pub mod page;
pub mod time;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use carousel::{Carousel, CarouselSurface, NavKey, Navigation, SlideIndex};
pub use config::SiteConfig;
pub use error::{UiError, UiResult};
pub use form::{ContactForm, FieldId, FieldKind, FieldSpec, FormSurface, Submitter};
pub use menu::{MenuState, MenuSurface};
pub use page::{submit_contact_form, SitePage, SubmitReport};
pub use time::{Clock, ManualClock, Timestamp};

#[cfg(target_arch = "wasm32")]
thread_local! {
    static RUNTIME: std::cell::RefCell<Option<dom::PageRuntime>> =
        const { std::cell::RefCell::new(None) };
}

#[cfg(target_arch = "wasm32")]
fn mount() {
    match dom::PageRuntime::mount() {
        Ok(runtime) => RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime)),
        Err(error) => tracing::error!(%error, "site behaviors failed to mount"),
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() -> Result<(), wasm_bindgen::JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    web_sys::console::log_1(&"=== INSPEC UI WASM LOADED ===".into());

    dom::on_document_ready(mount).map_err(|e| wasm_bindgen::JsValue::from_str(&e.to_string()))
}

/// Detach every listener and timer installed by `start`
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn unmount() {
    RUNTIME.with(|slot| slot.borrow_mut().take());
}
