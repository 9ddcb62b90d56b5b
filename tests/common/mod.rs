//! Shared test fixtures: recording surfaces and page builders

#![allow(dead_code)]

use inspec_ui::carousel::{CarouselSurface, SlideIndex};
use inspec_ui::form::{
    Banner, BannerId, CounterDisplay, FieldFeedback, FieldId, FieldKind, FieldSpec, FormPayload,
    FormSurface, SubmitControl, Submitter,
};
use inspec_ui::menu::MenuSurface;
use inspec_ui::{SiteConfig, SitePage, Timestamp, UiError, UiResult};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use tokio::sync::oneshot;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("inspec_ui=debug")
        .with_test_writer()
        .try_init();
}

pub fn ms(v: u64) -> Timestamp {
    Timestamp::from_millis(v)
}

// =============================================================================
// CAROUSEL
// =============================================================================

#[derive(Debug, Default)]
pub struct CarouselLog {
    /// Every slide shown, in order
    pub shown: Vec<usize>,
    /// Last aria-selected value per nav position
    pub aria: BTreeMap<usize, bool>,
}

impl CarouselLog {
    pub fn current(&self) -> Option<usize> {
        self.shown.last().copied()
    }

    pub fn selected_positions(&self) -> Vec<usize> {
        self.aria
            .iter()
            .filter(|(_, selected)| **selected)
            .map(|(p, _)| *p)
            .collect()
    }
}

pub struct RecordingCarousel(pub Rc<RefCell<CarouselLog>>);

impl CarouselSurface for RecordingCarousel {
    fn show_slide(&self, index: SlideIndex) {
        self.0.borrow_mut().shown.push(index.get());
    }

    fn set_nav_selected(&self, position: SlideIndex, selected: bool) {
        self.0.borrow_mut().aria.insert(position.get(), selected);
    }
}

// =============================================================================
// MENU
// =============================================================================

#[derive(Debug, Default)]
pub struct MenuLog {
    /// Open state applied to (panel, button)
    pub panel_open: bool,
    pub button_open: bool,
    pub renders: usize,
}

pub struct RecordingMenu(pub Rc<RefCell<MenuLog>>);

impl MenuSurface for RecordingMenu {
    fn set_open(&self, open: bool) {
        let mut log = self.0.borrow_mut();
        log.panel_open = open;
        log.button_open = open;
        log.renders += 1;
    }
}

// =============================================================================
// FORM
// =============================================================================

#[derive(Debug, Default)]
pub struct FormLog {
    pub required: BTreeSet<usize>,
    pub feedback: BTreeMap<usize, FieldFeedback>,
    pub counters: BTreeMap<usize, CounterDisplay>,
    pub control: Option<SubmitControl>,
    pub control_history: Vec<SubmitControl>,
    /// Banners currently in the document
    pub banners: BTreeMap<BannerId, Banner>,
    pub resets: usize,
}

pub struct RecordingForm(pub Rc<RefCell<FormLog>>);

impl FormSurface for RecordingForm {
    fn mark_required(&self, field: FieldId) {
        self.0.borrow_mut().required.insert(field.0);
    }

    fn show_feedback(&self, field: FieldId, feedback: &FieldFeedback) {
        self.0.borrow_mut().feedback.insert(field.0, feedback.clone());
    }

    fn show_counter(&self, field: FieldId, counter: &CounterDisplay) {
        self.0.borrow_mut().counters.insert(field.0, counter.clone());
    }

    fn set_submit_control(&self, control: &SubmitControl) {
        let mut log = self.0.borrow_mut();
        log.control = Some(control.clone());
        log.control_history.push(control.clone());
    }

    fn show_banner(&self, banner: &Banner) {
        self.0.borrow_mut().banners.insert(banner.id, banner.clone());
    }

    fn remove_banner(&self, id: BannerId) {
        self.0.borrow_mut().banners.remove(&id);
    }

    fn reset_fields(&self) {
        self.0.borrow_mut().resets += 1;
    }
}

pub const NAME: FieldId = FieldId(0);
pub const EMAIL: FieldId = FieldId(1);
pub const PHONE: FieldId = FieldId(2);
pub const MESSAGE: FieldId = FieldId(3);

/// The stock contact form: name*, email, phone, message* (max 100)
pub fn contact_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("nome", FieldKind::Text).required(),
        FieldSpec::new("email", FieldKind::Email),
        FieldSpec::new("telefone", FieldKind::Tel),
        FieldSpec::new("mensagem", FieldKind::TextArea)
            .required()
            .with_max_length(100),
    ]
}

pub fn form_page() -> (RefCell<SitePage>, Rc<RefCell<FormLog>>) {
    let log = Rc::new(RefCell::new(FormLog::default()));
    let mut page = SitePage::new(SiteConfig::default());
    page.attach_contact_form(contact_fields(), Box::new(RecordingForm(log.clone())))
        .unwrap();
    (RefCell::new(page), log)
}

pub fn fill_valid(page: &RefCell<SitePage>) {
    let mut page = page.borrow_mut();
    page.field_input(NAME, "Ana Souza").unwrap();
    page.field_input(EMAIL, "ana@exemplo.com.br").unwrap();
    page.field_input(PHONE, "(11) 99999-9999").unwrap();
    page.field_input(MESSAGE, "Gostaria de um orçamento.").unwrap();
}

// =============================================================================
// SUBMITTERS
// =============================================================================

/// Resolves with whatever the test sends through the gate
pub struct GatedSubmitter {
    gate: RefCell<Option<oneshot::Receiver<UiResult<()>>>>,
    pub calls: Cell<usize>,
    pub last_payload: RefCell<Option<FormPayload>>,
}

impl GatedSubmitter {
    pub fn new(gate: oneshot::Receiver<UiResult<()>>) -> Self {
        Self {
            gate: RefCell::new(Some(gate)),
            calls: Cell::new(0),
            last_payload: RefCell::new(None),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Submitter for GatedSubmitter {
    async fn submit(&self, payload: &FormPayload) -> UiResult<()> {
        self.calls.set(self.calls.get() + 1);
        *self.last_payload.borrow_mut() = Some(payload.clone());
        let gate = self.gate.borrow_mut().take();
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(UiError::Submission("gate dropped".to_string()))),
            None => Err(UiError::Submission("already used".to_string())),
        }
    }
}

/// Counts calls and always fails
#[derive(Default)]
pub struct FailingSubmitter {
    pub calls: Cell<usize>,
}

#[async_trait::async_trait(?Send)]
impl Submitter for FailingSubmitter {
    async fn submit(&self, _payload: &FormPayload) -> UiResult<()> {
        self.calls.set(self.calls.get() + 1);
        Err(UiError::Submission("HTTP 503".to_string()))
    }
}
