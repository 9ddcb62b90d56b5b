//! Page lifecycle controller
//!
//! `SitePage` owns every component present on the page together with the
//! surface it renders to. Components are optional and attached in any
//! order; a missing one means the feature is absent and its events are
//! ignored.
//!
//! ```text
//! DOM events ──► SitePage::{navigate, toggle_menu, field_input, ...}
//!                    │ state change
//!                    ▼
//!            Carousel / MenuState / ContactForm ──render──► *Surface
//!                    │
//!                    ▼
//!            next_wakeup() ──► runtime arms one timeout ──► poll_timers()
//! ```

use crate::carousel::{Carousel, CarouselSurface, NavKey, Navigation, SlideIndex};
use crate::config::SiteConfig;
use crate::error::UiResult;
use crate::form::{ContactForm, FieldId, FieldSpec, FormSurface, SubmitStart, Submitter};
use crate::menu::{MenuState, MenuSurface};
use crate::time::{Clock, Debouncer, Timestamp};
use std::cell::RefCell;

struct Attached<C, S: ?Sized> {
    state: C,
    surface: Box<S>,
}

/// Owner of all page components
pub struct SitePage {
    config: SiteConfig,
    carousel: Option<Attached<Carousel, dyn CarouselSurface>>,
    menu: Option<Attached<MenuState, dyn MenuSurface>>,
    form: Option<Attached<ContactForm, dyn FormSurface>>,
    resize: Debouncer,
    viewport_width: Option<u32>,
}

impl SitePage {
    pub fn new(config: SiteConfig) -> Self {
        let resize = Debouncer::new(config.resize_debounce());
        Self {
            config,
            carousel: None,
            menu: None,
            form: None,
            resize,
            viewport_width: None,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref().map(|a| &a.state)
    }

    pub fn menu(&self) -> Option<&MenuState> {
        self.menu.as_ref().map(|a| &a.state)
    }

    pub fn contact_form(&self) -> Option<&ContactForm> {
        self.form.as_ref().map(|a| &a.state)
    }

    // =========================================================================
    // ATTACHMENT
    // =========================================================================

    /// Start the carousel on slide 1 and arm its rotation
    pub fn attach_carousel(
        &mut self,
        surface: Box<dyn CarouselSurface>,
        now: Timestamp,
    ) -> UiResult<()> {
        let cfg = &self.config.carousel;
        let state = Carousel::new(cfg.slide_count, cfg.rotation_interval(), now)?;
        state.render(surface.as_ref());
        tracing::debug!(slides = cfg.slide_count, "carousel attached");
        self.carousel = Some(Attached { state, surface });
        Ok(())
    }

    /// Attach (or re-attach after header injection) the mobile menu
    ///
    /// Re-attaching keeps the current open state and renders it to the new
    /// surface.
    pub fn attach_menu(&mut self, surface: Box<dyn MenuSurface>) {
        let state = self
            .menu
            .take()
            .map(|a| a.state)
            .unwrap_or_else(|| MenuState::new(self.config.menu.breakpoint_px));
        state.render(surface.as_ref());
        tracing::debug!(open = state.is_open(), "menu attached");
        self.menu = Some(Attached { state, surface });
    }

    pub fn attach_contact_form(
        &mut self,
        fields: Vec<FieldSpec>,
        surface: Box<dyn FormSurface>,
    ) -> UiResult<()> {
        let state = ContactForm::new(fields, &self.config.contact_form);
        state.render_initial(surface.as_ref())?;
        tracing::debug!(fields = state.field_count(), "contact form attached");
        self.form = Some(Attached { state, surface });
        Ok(())
    }

    // =========================================================================
    // CAROUSEL EVENTS
    // =========================================================================

    /// Manual navigation; returns the new slide if a carousel is present
    pub fn navigate(
        &mut self,
        navigation: Navigation,
        now: Timestamp,
    ) -> UiResult<Option<SlideIndex>> {
        let Some(carousel) = self.carousel.as_mut() else {
            return Ok(None);
        };
        let index = carousel.state.navigate(navigation, now)?;
        carousel.state.render(carousel.surface.as_ref());
        tracing::debug!(slide = %index, ?navigation, "carousel navigated");
        Ok(Some(index))
    }

    /// Arrow keys on the carousel root; true when the key was consumed
    pub fn carousel_key(&mut self, key: NavKey, now: Timestamp) -> UiResult<bool> {
        let navigation = match key {
            NavKey::Previous => Navigation::Previous,
            NavKey::Next => Navigation::Next,
            NavKey::Activate => return Ok(false),
        };
        Ok(self.navigate(navigation, now)?.is_some())
    }

    /// Enter/Space on the nav button at `position`; true when consumed
    pub fn nav_button_key(
        &mut self,
        position: usize,
        key: NavKey,
        now: Timestamp,
    ) -> UiResult<bool> {
        if key != NavKey::Activate {
            return Ok(false);
        }
        Ok(self.navigate(Navigation::Select(position), now)?.is_some())
    }

    // =========================================================================
    // MENU / VIEWPORT
    // =========================================================================

    /// Flip the menu; None when no menu is attached
    pub fn toggle_menu(&mut self) -> Option<bool> {
        let menu = self.menu.as_mut()?;
        let open = menu.state.toggle();
        menu.state.render(menu.surface.as_ref());
        tracing::debug!(open, "menu toggled");
        Some(open)
    }

    /// Record a resize; the re-sync runs once the burst settles
    pub fn viewport_resized(&mut self, width: u32, now: Timestamp) {
        self.viewport_width = Some(width);
        self.resize.trigger(now);
    }

    fn resync_viewport(&mut self) {
        if let Some(carousel) = &self.carousel {
            carousel.state.render_nav(carousel.surface.as_ref());
        }
        if let (Some(menu), Some(width)) = (self.menu.as_mut(), self.viewport_width) {
            if menu.state.on_viewport_width(width) {
                menu.state.render(menu.surface.as_ref());
            }
        }
        tracing::trace!(width = ?self.viewport_width, "viewport re-synced");
    }

    // =========================================================================
    // FORM EVENTS
    // =========================================================================

    pub fn field_input(&mut self, field: FieldId, value: &str) -> UiResult<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        form.state.input(field, value)?;
        form.state.render_field(field, form.surface.as_ref())
    }

    /// Copy a live control value without marking the field touched
    pub fn sync_field_value(&mut self, field: FieldId, value: &str) -> UiResult<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        form.state.set_value(field, value)?;
        if let Some(counter) = form.state.counter(field)? {
            form.surface.show_counter(field, &counter);
        }
        Ok(())
    }

    pub fn field_blur(&mut self, field: FieldId) -> UiResult<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        form.state.blur(field)?;
        form.state.render_field(field, form.surface.as_ref())
    }

    /// Validate and, if clean, enter the submitting phase
    pub fn begin_submit(&mut self) -> UiResult<SubmitStart> {
        let Some(form) = self.form.as_mut() else {
            return Ok(SubmitStart::Rejected);
        };
        let start = form.state.begin_submit();
        match &start {
            SubmitStart::Rejected => {
                form.state.render_fields(form.surface.as_ref())?;
                tracing::debug!("submit blocked by invalid fields");
            }
            SubmitStart::InFlight => tracing::debug!("submit ignored, already in flight"),
            SubmitStart::Started(payload) => {
                form.state.render_fields(form.surface.as_ref())?;
                form.surface.set_submit_control(&form.state.submit_control());
                tracing::info!(fields = payload.len(), "contact form submitting");
            }
        }
        Ok(start)
    }

    /// Restore the control and show the outcome banner
    pub fn finish_submit(&mut self, result: UiResult<()>, now: Timestamp) -> UiResult<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };
        if let Err(error) = &result {
            tracing::error!(%error, "contact form submission failed");
        }
        let banner = form.state.finish_submit(&result, now);
        let surface = form.surface.as_ref();
        surface.set_submit_control(&form.state.submit_control());
        if result.is_ok() {
            surface.reset_fields();
            form.state.render_fields(surface)?;
        }
        surface.show_banner(&banner);
        Ok(())
    }

    // =========================================================================
    // TIMERS
    // =========================================================================

    /// Fire everything due at `now`
    pub fn poll_timers(&mut self, now: Timestamp) {
        if let Some(carousel) = self.carousel.as_mut() {
            if let Some(index) = carousel.state.tick(now) {
                carousel.state.render(carousel.surface.as_ref());
                tracing::trace!(slide = %index, "carousel auto-rotated");
            }
        }
        if self.resize.poll(now) {
            self.resync_viewport();
        }
        if let Some(form) = self.form.as_mut() {
            for id in form.state.expire_banners(now) {
                form.surface.remove_banner(id);
            }
        }
    }

    /// Earliest pending deadline across all components
    pub fn next_wakeup(&self) -> Option<Timestamp> {
        [
            self.carousel.as_ref().and_then(|c| c.state.rotation_deadline()),
            self.resize.pending_until(),
            self.form.as_ref().and_then(|f| f.state.next_banner_expiry()),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}

/// How a submit attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitReport {
    Rejected,
    InFlight,
    Sent,
    Failed,
}

/// Run one submit attempt end to end
///
/// The page is only borrowed between suspension points, so other events
/// keep flowing while the submitter is pending. The control is restored on
/// both outcomes.
pub async fn submit_contact_form(
    page: &RefCell<SitePage>,
    submitter: &dyn Submitter,
    clock: &dyn Clock,
) -> UiResult<SubmitReport> {
    let start = page.borrow_mut().begin_submit()?;
    let payload = match start {
        SubmitStart::Rejected => return Ok(SubmitReport::Rejected),
        SubmitStart::InFlight => return Ok(SubmitReport::InFlight),
        SubmitStart::Started(payload) => payload,
    };

    let result = submitter.submit(&payload).await;
    let report = if result.is_ok() {
        SubmitReport::Sent
    } else {
        SubmitReport::Failed
    };
    page.borrow_mut().finish_submit(result, clock.now())?;
    Ok(report)
}
