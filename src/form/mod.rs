//! Contact form validation and submission state
//!
//! Per-field feedback is derived from `(value, touched)`: a field shows an
//! error only once it has been touched (input, blur or a submit attempt)
//! and is currently invalid.

pub mod counter;
pub mod field;
pub mod submission;
pub mod validators;

pub use counter::{CharCounter, CounterDisplay, CounterLevel};
pub use field::{validate, FieldError, FieldFeedback, FieldKind, FieldSpec};
pub use submission::{
    Banner, BannerId, BannerKind, FormPayload, SubmissionPhase, SubmitControl, SubmitStart,
    Submitter,
};

use crate::config::{ContactFormConfig, FormMessages};
use crate::error::{UiError, UiResult};
use crate::time::Timestamp;
use std::time::Duration;

/// Index of a field in form order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldId(pub usize);

/// Rendering capability for the form and its decorations
pub trait FormSurface {
    /// Add the `required` class to the field's form group
    fn mark_required(&self, field: FieldId);
    fn show_feedback(&self, field: FieldId, feedback: &FieldFeedback);
    fn show_counter(&self, field: FieldId, counter: &CounterDisplay);
    fn set_submit_control(&self, control: &SubmitControl);
    fn show_banner(&self, banner: &Banner);
    fn remove_banner(&self, id: BannerId);
    /// Clear every control's value
    fn reset_fields(&self);
}

#[derive(Debug, Clone)]
struct FieldSlot {
    spec: FieldSpec,
    value: String,
    touched: bool,
    counter: Option<CharCounter>,
}

impl FieldSlot {
    fn new(spec: FieldSpec) -> Self {
        let counter = match (spec.kind, spec.max_length) {
            (FieldKind::TextArea, Some(max)) => Some(CharCounter::new(max)),
            _ => None,
        };
        Self {
            spec,
            value: String::new(),
            touched: false,
            counter,
        }
    }
}

/// Validation and submission state for one form
#[derive(Debug, Clone)]
pub struct ContactForm {
    fields: Vec<FieldSlot>,
    messages: FormMessages,
    submit_label: String,
    submitting_label: String,
    banner_lifetime: Duration,
    phase: SubmissionPhase,
    banners: Vec<Banner>,
    next_banner: u64,
}

impl ContactForm {
    pub fn new(specs: Vec<FieldSpec>, config: &ContactFormConfig) -> Self {
        Self {
            fields: specs.into_iter().map(FieldSlot::new).collect(),
            messages: config.messages.clone(),
            submit_label: config.submit_label.clone(),
            submitting_label: config.submitting_label.clone(),
            banner_lifetime: config.banner_lifetime(),
            phase: SubmissionPhase::Idle,
            banners: Vec::new(),
            next_banner: 0,
        }
    }

    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> {
        (0..self.fields.len()).map(FieldId)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn spec(&self, id: FieldId) -> UiResult<&FieldSpec> {
        self.slot(id).map(|s| &s.spec)
    }

    pub fn value(&self, id: FieldId) -> UiResult<&str> {
        self.slot(id).map(|s| s.value.as_str())
    }

    pub fn is_touched(&self, id: FieldId) -> UiResult<bool> {
        self.slot(id).map(|s| s.touched)
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    // =========================================================================
    // FIELD EVENTS
    // =========================================================================

    /// Record a new value and mark the field touched
    pub fn input(&mut self, id: FieldId, value: &str) -> UiResult<()> {
        let slot = self.slot_mut(id)?;
        slot.value.clear();
        slot.value.push_str(value);
        slot.touched = true;
        Ok(())
    }

    /// Mirror a value the user did not type (prefill, autofill, reset)
    pub fn set_value(&mut self, id: FieldId, value: &str) -> UiResult<()> {
        let slot = self.slot_mut(id)?;
        if slot.value != value {
            slot.value.clear();
            slot.value.push_str(value);
        }
        Ok(())
    }

    pub fn blur(&mut self, id: FieldId) -> UiResult<()> {
        self.slot_mut(id)?.touched = true;
        Ok(())
    }

    /// Current validity, regardless of touched state
    pub fn check(&self, id: FieldId) -> UiResult<Result<(), FieldError>> {
        let slot = self.slot(id)?;
        Ok(validate(&slot.spec, &slot.value))
    }

    pub fn feedback(&self, id: FieldId) -> UiResult<FieldFeedback> {
        let slot = self.slot(id)?;
        if !slot.touched {
            return Ok(FieldFeedback::Neutral);
        }
        Ok(match validate(&slot.spec, &slot.value) {
            Err(error) => FieldFeedback::Error(error.message(&self.messages).to_string()),
            Ok(()) if !validators::is_blank(&slot.value) => FieldFeedback::Success,
            Ok(()) => FieldFeedback::Neutral,
        })
    }

    /// Counter display for textareas with a limit
    pub fn counter(&self, id: FieldId) -> UiResult<Option<CounterDisplay>> {
        let slot = self.slot(id)?;
        Ok(slot.counter.map(|c| c.display(&slot.value)))
    }

    /// Touch every field; true when all are valid
    pub fn validate_all(&mut self) -> bool {
        let mut all_valid = true;
        for slot in &mut self.fields {
            slot.touched = true;
            if validate(&slot.spec, &slot.value).is_err() {
                all_valid = false;
            }
        }
        all_valid
    }

    // =========================================================================
    // SUBMISSION
    // =========================================================================

    pub fn submit_control(&self) -> SubmitControl {
        match self.phase {
            SubmissionPhase::Idle => SubmitControl {
                disabled: false,
                label: self.submit_label.clone(),
            },
            SubmissionPhase::Submitting => SubmitControl {
                disabled: true,
                label: self.submitting_label.clone(),
            },
        }
    }

    pub fn payload(&self) -> FormPayload {
        let mut payload = FormPayload::default();
        for slot in self.fields.iter().filter(|s| !s.spec.name.is_empty()) {
            payload.insert(slot.spec.name.clone(), slot.value.clone());
        }
        payload
    }

    /// Validate everything and enter `Submitting` if the form is clean
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.phase == SubmissionPhase::Submitting {
            return SubmitStart::InFlight;
        }
        if !self.validate_all() {
            return SubmitStart::Rejected;
        }
        self.phase = SubmissionPhase::Submitting;
        SubmitStart::Started(self.payload())
    }

    /// Leave `Submitting` and queue the outcome banner
    ///
    /// On success every field is cleared back to untouched.
    pub fn finish_submit(&mut self, result: &UiResult<()>, now: Timestamp) -> Banner {
        self.phase = SubmissionPhase::Idle;
        let (kind, text) = match result {
            Ok(()) => {
                self.clear();
                (BannerKind::Success, self.messages.sent.clone())
            }
            Err(_) => (BannerKind::Error, self.messages.failed.clone()),
        };
        let banner = Banner {
            id: BannerId(self.next_banner),
            kind,
            text,
            expires_at: now + self.banner_lifetime,
        };
        self.next_banner += 1;
        self.banners.push(banner.clone());
        banner
    }

    /// Drop and return banners whose lifetime ended
    pub fn expire_banners(&mut self, now: Timestamp) -> Vec<BannerId> {
        let mut expired = Vec::new();
        self.banners.retain(|b| {
            if b.expires_at <= now {
                expired.push(b.id);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn next_banner_expiry(&self) -> Option<Timestamp> {
        self.banners.iter().map(|b| b.expires_at).min()
    }

    fn clear(&mut self) {
        for slot in &mut self.fields {
            slot.value.clear();
            slot.touched = false;
        }
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    /// Feedback plus counter for one field
    pub fn render_field(&self, id: FieldId, surface: &dyn FormSurface) -> UiResult<()> {
        surface.show_feedback(id, &self.feedback(id)?);
        if let Some(counter) = self.counter(id)? {
            surface.show_counter(id, &counter);
        }
        Ok(())
    }

    pub fn render_fields(&self, surface: &dyn FormSurface) -> UiResult<()> {
        for id in self.field_ids() {
            self.render_field(id, surface)?;
        }
        Ok(())
    }

    /// Initial decoration: required markers and counters
    ///
    /// The submit control keeps its authored label until a submit starts.
    pub fn render_initial(&self, surface: &dyn FormSurface) -> UiResult<()> {
        for id in self.field_ids() {
            if self.spec(id)?.required {
                surface.mark_required(id);
            }
            if let Some(counter) = self.counter(id)? {
                surface.show_counter(id, &counter);
            }
        }
        Ok(())
    }

    fn slot(&self, id: FieldId) -> UiResult<&FieldSlot> {
        self.fields.get(id.0).ok_or(UiError::UnknownField(id.0))
    }

    fn slot_mut(&mut self, id: FieldId) -> UiResult<&mut FieldSlot> {
        self.fields.get_mut(id.0).ok_or(UiError::UnknownField(id.0))
    }
}
