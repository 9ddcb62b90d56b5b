//! Page runtime: wires DOM events into [`SitePage`]
//!
//! Architecture:
//! ```text
//! EventListener ──► Shared::listen ──► SitePage ──► Dom* surfaces
//!                          │
//!                          ▼
//!                 schedule_wakeup ──► Timer ──► requestAnimationFrame ──► poll
//! ```
//!
//! Every callback holds a `Weak` back-reference, so dropping the runtime
//! tears down all listeners and the wake-up timer.

use super::fragments;
use super::lightbox::{self, CaptionCallback};
use super::listener::EventListener;
use super::submitters;
use super::surfaces::{control_value, DomCarousel, DomForm, DomMenu};
use super::timer::Timer;
use super::{document, query, window, PerformanceClock};
use crate::carousel::{NavKey, Navigation};
use crate::chrome::{suppress_mousedown, Fragment, PointerTarget};
use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::error::UiResult;
use crate::form::{FieldId, Submitter};
use crate::page::{submit_contact_form, SitePage, SubmitReport};
use crate::time::Clock;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlFormElement, KeyboardEvent};

/// Owns the page controller and every browser subscription
pub struct PageRuntime {
    shared: Rc<Shared>,
}

struct Shared {
    document: Document,
    page: RefCell<SitePage>,
    clock: PerformanceClock,
    submitter: Box<dyn Submitter>,
    wakeup: Timer,
    frame: Closure<dyn FnMut(f64)>,
    listeners: RefCell<Vec<EventListener>>,
    /// Replaced whenever the menu is re-bound after header injection
    menu_listener: RefCell<Option<EventListener>>,
    form_fields: RefCell<Vec<Element>>,
    caption: RefCell<Option<CaptionCallback>>,
}

impl PageRuntime {
    /// Attach every behavior present in the current document
    pub fn mount() -> UiResult<Self> {
        let document = document()?;
        let config = load_config(&document);
        let submitter = submitters::from_config(&config.contact_form.submission);

        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let on_timeout = weak.clone();
            let on_frame = weak.clone();
            Shared {
                document: document.clone(),
                page: RefCell::new(SitePage::new(config)),
                clock: PerformanceClock::new(),
                submitter,
                wakeup: Timer::new(move || {
                    if let Some(shared) = on_timeout.upgrade() {
                        shared.request_frame();
                    }
                }),
                frame: Closure::wrap(Box::new(move |_timestamp: f64| {
                    if let Some(shared) = on_frame.upgrade() {
                        shared.poll();
                    }
                }) as Box<dyn FnMut(f64)>),
                listeners: RefCell::new(Vec::new()),
                menu_listener: RefCell::new(None),
                form_fields: RefCell::new(Vec::new()),
                caption: RefCell::new(None),
            }
        });

        let steps: [(&str, fn(&Rc<Shared>) -> UiResult<()>); 6] = [
            ("carousel", Shared::bind_carousel),
            ("menu", Shared::bind_menu),
            ("contact form", Shared::bind_contact_form),
            ("viewport", Shared::bind_viewport),
            ("selection guard", Shared::bind_selection_guard),
            ("lightbox", Shared::bind_lightbox),
        ];
        for (name, step) in steps {
            if let Err(error) = step(&shared) {
                tracing::warn!(component = name, %error, "behavior not attached");
            }
        }
        if let Err(error) = fragments::fix_footer_width(&shared.document) {
            tracing::warn!(%error, "footer width fix failed");
        }
        shared.load_fragments();
        shared.schedule_wakeup();

        tracing::info!("site behaviors mounted");
        Ok(Self { shared })
    }
}

impl Drop for PageRuntime {
    fn drop(&mut self) {
        self.shared.wakeup.cancel();
        self.shared.listeners.borrow_mut().clear();
        self.shared.menu_listener.borrow_mut().take();
        tracing::debug!("site behaviors unmounted");
    }
}

fn load_config(document: &Document) -> SiteConfig {
    let Some(json) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    SiteConfig::from_json(&json).unwrap_or_else(|error| {
        tracing::warn!(%error, "ignoring invalid site configuration");
        SiteConfig::default()
    })
}

fn key_of(event: &Event) -> Option<NavKey> {
    event
        .dyn_ref::<KeyboardEvent>()
        .and_then(|e| NavKey::from_key(&e.key()))
}

impl Shared {
    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Subscribe a handler; errors are logged and timers re-armed afterwards
    fn listen<F>(
        self: &Rc<Self>,
        target: &EventTarget,
        event_type: &'static str,
        handler: F,
    ) -> UiResult<EventListener>
    where
        F: Fn(&Rc<Shared>, &Event) -> UiResult<()> + 'static,
    {
        let weak = Rc::downgrade(self);
        EventListener::new(target, event_type, move |event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if let Err(error) = handler(&shared, &event) {
                tracing::warn!(event = event_type, %error, "event handler failed");
            }
            shared.schedule_wakeup();
        })
    }

    fn keep(
        self: &Rc<Self>,
        target: &EventTarget,
        event_type: &'static str,
        handler: impl Fn(&Rc<Shared>, &Event) -> UiResult<()> + 'static,
    ) -> UiResult<()> {
        let listener = self.listen(target, event_type, handler)?;
        self.listeners.borrow_mut().push(listener);
        Ok(())
    }

    fn schedule_wakeup(&self) {
        let next = self.page.borrow().next_wakeup();
        let Some(at) = next else {
            self.wakeup.cancel();
            return;
        };
        if let Err(error) = self.wakeup.restart(self.clock.now().until(at)) {
            tracing::error!(%error, "could not arm wake-up timer");
        }
    }

    fn request_frame(&self) {
        let requested = window()
            .and_then(|w| Ok(w.request_animation_frame(self.frame.as_ref().unchecked_ref())?));
        if requested.is_err() {
            self.poll();
        }
    }

    fn poll(&self) {
        let now = self.clock.now();
        self.page.borrow_mut().poll_timers(now);
        self.schedule_wakeup();
    }

    // =========================================================================
    // CAROUSEL
    // =========================================================================

    fn bind_carousel(self: &Rc<Self>) -> UiResult<()> {
        let config = self.page.borrow().config().carousel.clone();
        let Some(root) = query(&self.document, &config.root_selector) else {
            tracing::debug!("no carousel on this page");
            return Ok(());
        };

        let surface = DomCarousel::new(&self.document, &config);
        let buttons = surface.nav_buttons().to_vec();
        self.page
            .borrow_mut()
            .attach_carousel(Box::new(surface), self.clock.now())?;
        root.set_attribute("tabindex", "0")?;

        for (i, button) in buttons.iter().enumerate() {
            let position = i + 1;
            self.keep(button, "click", move |shared, _| {
                let now = shared.clock.now();
                shared
                    .page
                    .borrow_mut()
                    .navigate(Navigation::Select(position), now)?;
                Ok(())
            })?;
            self.keep(button, "keydown", move |shared, event| {
                let Some(key) = key_of(event) else {
                    return Ok(());
                };
                let now = shared.clock.now();
                if shared.page.borrow_mut().nav_button_key(position, key, now)? {
                    event.prevent_default();
                }
                Ok(())
            })?;
        }

        for (selector, navigation) in [
            (&config.prev_selector, Navigation::Previous),
            (&config.next_selector, Navigation::Next),
        ] {
            if let Some(arrow) = query(&self.document, selector) {
                self.keep(&arrow, "click", move |shared, _| {
                    let now = shared.clock.now();
                    shared.page.borrow_mut().navigate(navigation, now)?;
                    Ok(())
                })?;
            }
        }

        self.keep(&root, "keydown", |shared, event| {
            let Some(key) = key_of(event) else {
                return Ok(());
            };
            let now = shared.clock.now();
            if shared.page.borrow_mut().carousel_key(key, now)? {
                event.prevent_default();
            }
            Ok(())
        })
    }

    // =========================================================================
    // MENU / VIEWPORT / CHROME
    // =========================================================================

    fn bind_menu(self: &Rc<Self>) -> UiResult<()> {
        let config = self.page.borrow().config().menu.clone();
        let Some(menu) = DomMenu::find(&self.document, &config) else {
            tracing::debug!("no mobile menu in the document yet");
            return Ok(());
        };
        let button = menu.button().clone();
        self.page.borrow_mut().attach_menu(Box::new(menu));
        let listener = self.listen(&button, "click", |shared, _| {
            shared.page.borrow_mut().toggle_menu();
            Ok(())
        })?;
        *self.menu_listener.borrow_mut() = Some(listener);
        Ok(())
    }

    fn bind_viewport(self: &Rc<Self>) -> UiResult<()> {
        let target = window()?;
        self.keep(&target, "resize", |shared, _| {
            let width = window()?.inner_width()?.as_f64().unwrap_or_default();
            let now = shared.clock.now();
            shared
                .page
                .borrow_mut()
                .viewport_resized(width.max(0.0) as u32, now);
            Ok(())
        })
    }

    fn bind_selection_guard(self: &Rc<Self>) -> UiResult<()> {
        let Some(body) = self.document.body() else {
            return Ok(());
        };
        self.keep(&body, "mousedown", |_, event| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
            else {
                return Ok(());
            };
            let pointer = PointerTarget {
                tag: target.tag_name(),
                contenteditable: target.get_attribute("contenteditable").as_deref() == Some("true"),
                classes: class_names(Some(&target)),
                parent_classes: class_names(target.parent_element().as_ref()),
            };
            if suppress_mousedown(&pointer) {
                event.prevent_default();
            }
            Ok(())
        })
    }

    fn bind_lightbox(self: &Rc<Self>) -> UiResult<()> {
        let config = self.page.borrow().config().lightbox.clone();
        *self.caption.borrow_mut() = lightbox::bind(&config)?;
        Ok(())
    }

    fn load_fragments(self: &Rc<Self>) {
        let config = self.page.borrow().config().fragments.clone();
        for fragment in Fragment::ALL {
            let weak = Rc::downgrade(self);
            let config = config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = fragments::load(fragment, &config).await;
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                match result {
                    Ok(true) => shared.fragment_loaded(fragment),
                    Ok(false) => tracing::debug!(fragment = fragment.name(), "no placeholder"),
                    Err(error) => {
                        tracing::error!(fragment = fragment.name(), %error, "failed to load fragment")
                    }
                }
            });
        }
    }

    fn fragment_loaded(self: &Rc<Self>, fragment: Fragment) {
        let result = match fragment {
            Fragment::Header => self.header_loaded(),
            Fragment::Footer => fragments::fix_footer_width(&self.document),
        };
        if let Err(error) = result {
            tracing::warn!(fragment = fragment.name(), %error, "post-load setup failed");
        }
    }

    /// The toggle button and nav links only exist once the header is in
    fn header_loaded(self: &Rc<Self>) -> UiResult<()> {
        self.bind_menu()?;
        let navbar = self.page.borrow().config().navbar.clone();
        fragments::highlight_current_page(&self.document, &navbar)?;
        if query(&self.document, &navbar.selector).is_some() {
            fragments::sync_navbar(&self.document, &navbar)?;
            self.keep(&window()?, "scroll", move |shared, _| {
                fragments::sync_navbar(&shared.document, &navbar)
            })?;
        }
        Ok(())
    }

    // =========================================================================
    // CONTACT FORM
    // =========================================================================

    fn bind_contact_form(self: &Rc<Self>) -> UiResult<()> {
        let config = self.page.borrow().config().contact_form.clone();
        let Some(form) = self
            .document
            .get_element_by_id(&config.form_id)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            tracing::debug!("no contact form on this page");
            return Ok(());
        };

        let (surface, specs) = DomForm::discover(&self.document, form.clone(), &config.group_selector);
        let controls: Vec<Element> = surface.fields().iter().map(|f| f.control.clone()).collect();
        debug_assert_eq!(controls.len(), specs.len());
        self.page
            .borrow_mut()
            .attach_contact_form(specs, Box::new(surface))?;
        *self.form_fields.borrow_mut() = controls.clone();
        self.sync_form_values()?;

        for (i, control) in controls.iter().enumerate() {
            let field = FieldId(i);
            self.keep(control, "input", move |shared, event| {
                let value = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .map(|el| control_value(&el))
                    .unwrap_or_default();
                shared.page.borrow_mut().field_input(field, &value)
            })?;
            self.keep(control, "blur", move |shared, _| {
                shared.sync_form_values()?;
                shared.page.borrow_mut().field_blur(field)
            })?;
        }

        self.keep(&form, "submit", |shared, event| {
            event.prevent_default();
            shared.sync_form_values()?;
            let shared = Rc::clone(shared);
            wasm_bindgen_futures::spawn_local(async move {
                let report =
                    submit_contact_form(&shared.page, shared.submitter.as_ref(), &shared.clock).await;
                match report {
                    Ok(SubmitReport::Sent) => {
                        if let Err(error) = shared.sync_form_values() {
                            tracing::warn!(%error, "could not re-read form after reset");
                        }
                    }
                    Ok(report) => tracing::debug!(?report, "submit attempt finished"),
                    Err(error) => tracing::error!(%error, "submit flow failed"),
                }
                shared.schedule_wakeup();
            });
            Ok(())
        })
    }

    /// Copy live control values into the form state without touching fields
    fn sync_form_values(&self) -> UiResult<()> {
        let controls = self.form_fields.borrow();
        let mut page = self.page.borrow_mut();
        for (i, control) in controls.iter().enumerate() {
            page.sync_field_value(FieldId(i), &control_value(control))?;
        }
        Ok(())
    }
}

fn class_names(element: Option<&Element>) -> Vec<String> {
    element
        .map(|el| {
            el.class_name()
                .split_whitespace()
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
