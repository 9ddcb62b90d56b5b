//! DOM implementations of the component surfaces

use super::query_all;
use crate::carousel::{CarouselSurface, SlideIndex};
use crate::config::{CarouselConfig, MenuConfig};
use crate::form::{
    Banner, BannerId, CounterDisplay, FieldFeedback, FieldId, FieldKind, FieldSpec, FormSurface,
    SubmitControl,
};
use crate::menu::MenuSurface;
use std::cell::RefCell;
use std::collections::BTreeMap;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

const ERROR_MESSAGE_CLASS: &str = "error-message";
const COUNTER_CLASS: &str = "char-counter";

fn log_js_error(context: &str, result: Result<(), wasm_bindgen::JsValue>) {
    if let Err(err) = result {
        tracing::warn!(?err, context, "DOM update failed");
    }
}

// =============================================================================
// CAROUSEL
// =============================================================================

pub(crate) struct DomCarousel {
    /// `radio1..radioN`; a missing input leaves that slide unreachable
    radios: Vec<Option<HtmlInputElement>>,
    nav_buttons: Vec<Element>,
}

impl DomCarousel {
    pub(crate) fn new(document: &Document, config: &CarouselConfig) -> Self {
        let radios = (1..=config.slide_count)
            .map(|i| {
                document
                    .get_element_by_id(&format!("{}{}", config.radio_id_prefix, i))
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            })
            .collect();
        Self {
            radios,
            nav_buttons: query_all(document, &config.nav_button_selector),
        }
    }

    pub(crate) fn nav_buttons(&self) -> &[Element] {
        &self.nav_buttons
    }
}

impl CarouselSurface for DomCarousel {
    fn show_slide(&self, index: SlideIndex) {
        match self.radios.get(index.get() - 1) {
            Some(Some(radio)) => radio.set_checked(true),
            _ => tracing::warn!(slide = %index, "no selection input for slide"),
        }
    }

    fn set_nav_selected(&self, position: SlideIndex, selected: bool) {
        if let Some(button) = self.nav_buttons.get(position.get() - 1) {
            let value = if selected { "true" } else { "false" };
            log_js_error("aria-selected", button.set_attribute("aria-selected", value));
        }
    }
}

// =============================================================================
// MENU
// =============================================================================

pub(crate) struct DomMenu {
    panel: Element,
    button: Element,
    open_class: String,
}

impl DomMenu {
    /// None unless both the panel and its toggle button exist
    pub(crate) fn find(document: &Document, config: &MenuConfig) -> Option<Self> {
        let panel = super::query(document, &config.panel_selector)?;
        let button = super::query(document, &config.button_selector)?;
        Some(Self {
            panel,
            button,
            open_class: config.open_class.clone(),
        })
    }

    pub(crate) fn button(&self) -> &Element {
        &self.button
    }
}

impl MenuSurface for DomMenu {
    fn set_open(&self, open: bool) {
        for element in [&self.panel, &self.button] {
            let result = element
                .class_list()
                .toggle_with_force(&self.open_class, open)
                .map(|_| ());
            log_js_error("menu class", result);
        }
    }
}

// =============================================================================
// CONTACT FORM
// =============================================================================

pub(crate) struct DomField {
    pub(crate) control: Element,
    group: Option<Element>,
    counter: Option<Element>,
}

pub(crate) fn control_value(control: &Element) -> String {
    if let Some(input) = control.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(textarea) = control.dyn_ref::<HtmlTextAreaElement>() {
        textarea.value()
    } else if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

pub(crate) struct DomForm {
    document: Document,
    form: HtmlFormElement,
    fields: Vec<DomField>,
    submit: Option<HtmlButtonElement>,
    banners: RefCell<BTreeMap<BannerId, Element>>,
}

impl DomForm {
    /// Collect the form's controls and describe each for the core
    pub(crate) fn discover(
        document: &Document,
        form: HtmlFormElement,
        group_selector: &str,
    ) -> (Self, Vec<FieldSpec>) {
        let mut fields = Vec::new();
        let mut specs = Vec::new();

        for control in query_all_in_form(&form) {
            let kind = FieldKind::from_element(
                &control.tag_name(),
                control.get_attribute("type").as_deref(),
            );
            let mut spec = FieldSpec::new(control.get_attribute("name").unwrap_or_default(), kind);
            spec.required = control.has_attribute("required");
            if kind == FieldKind::TextArea {
                spec.max_length = control
                    .get_attribute("maxlength")
                    .and_then(|v| v.trim().parse::<usize>().ok());
            }

            let group = control.closest(group_selector).ok().flatten();
            let counter = spec
                .max_length
                .and_then(|_| create_counter(document, &control));

            fields.push(DomField {
                control,
                group,
                counter,
            });
            specs.push(spec);
        }

        let submit = form
            .query_selector(r#"button[type="submit"]"#)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());

        let dom = Self {
            document: document.clone(),
            form,
            fields,
            submit,
            banners: RefCell::new(BTreeMap::new()),
        };
        (dom, specs)
    }

    pub(crate) fn fields(&self) -> &[DomField] {
        &self.fields
    }

    fn error_message(&self, group: &Element) -> Option<Element> {
        if let Ok(Some(existing)) = group.query_selector(&format!(".{ERROR_MESSAGE_CLASS}")) {
            return Some(existing);
        }
        let span = self.document.create_element("span").ok()?;
        span.set_class_name(ERROR_MESSAGE_CLASS);
        group.append_child(&span).ok()?;
        Some(span)
    }
}

fn query_all_in_form(form: &HtmlFormElement) -> Vec<Element> {
    super::query_all_within(form, "input, select, textarea")
}

fn create_counter(document: &Document, control: &Element) -> Option<Element> {
    let parent = control.parent_element()?;
    if let Some(parent) = parent.dyn_ref::<HtmlElement>() {
        log_js_error("counter parent", parent.style().set_property("position", "relative"));
    }
    let counter = document.create_element("span").ok()?;
    counter.set_class_name(COUNTER_CLASS);
    parent.append_child(&counter).ok()?;
    Some(counter)
}

impl FormSurface for DomForm {
    fn mark_required(&self, field: FieldId) {
        if let Some(group) = self.fields.get(field.0).and_then(|f| f.group.as_ref()) {
            log_js_error("required class", group.class_list().add_1("required"));
        }
    }

    fn show_feedback(&self, field: FieldId, feedback: &FieldFeedback) {
        let Some(group) = self.fields.get(field.0).and_then(|f| f.group.as_ref()) else {
            return;
        };
        let classes = group.class_list();
        log_js_error("feedback class", classes.remove_2("error", "success"));
        if let Some(class) = feedback.css_class() {
            log_js_error("feedback class", classes.add_1(class));
        }

        match feedback.message() {
            Some(message) => {
                if let Some(span) = self.error_message(group) {
                    span.set_text_content(Some(message));
                    if let Some(span) = span.dyn_ref::<HtmlElement>() {
                        log_js_error("error display", span.style().set_property("display", "block"));
                    }
                }
            }
            None => {
                if let Ok(Some(span)) = group.query_selector(&format!(".{ERROR_MESSAGE_CLASS}")) {
                    if let Some(span) = span.dyn_ref::<HtmlElement>() {
                        log_js_error("error display", span.style().set_property("display", "none"));
                    }
                }
            }
        }
    }

    fn show_counter(&self, field: FieldId, counter: &CounterDisplay) {
        let Some(element) = self.fields.get(field.0).and_then(|f| f.counter.as_ref()) else {
            return;
        };
        element.set_text_content(Some(&counter.text));
        let classes = element.class_list();
        log_js_error("counter class", classes.remove_2("warning", "error"));
        for class in counter.level.css_classes() {
            log_js_error("counter class", classes.add_1(class));
        }
    }

    fn set_submit_control(&self, control: &SubmitControl) {
        if let Some(button) = &self.submit {
            button.set_disabled(control.disabled);
            button.set_text_content(Some(&control.label));
        }
    }

    fn show_banner(&self, banner: &Banner) {
        let Ok(element) = self.document.create_element("div") else {
            return;
        };
        element.set_class_name(&format!("form-message {}", banner.kind.css_class()));
        element.set_text_content(Some(&banner.text));
        let form_node: &web_sys::Node = &self.form;
        if let Some(parent) = form_node.parent_node() {
            if let Err(err) = parent.insert_before(&element, Some(form_node)) {
                tracing::warn!(?err, "could not insert form banner");
                return;
            }
        }
        self.banners.borrow_mut().insert(banner.id, element);
    }

    fn remove_banner(&self, id: BannerId) {
        if let Some(element) = self.banners.borrow_mut().remove(&id) {
            element.remove();
        }
    }

    fn reset_fields(&self) {
        self.form.reset();
    }
}
