//! Form field descriptions and per-field validation

use super::validators::{is_blank, is_valid_email, is_valid_phone};
use crate::config::FormMessages;

/// Input flavour, taken from the element's tag and `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    TextArea,
    Select,
}

impl FieldKind {
    /// Classify from a tag name (any case) and an `input` type
    pub fn from_element(tag: &str, input_type: Option<&str>) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "TEXTAREA" => FieldKind::TextArea,
            "SELECT" => FieldKind::Select,
            _ => match input_type.map(str::to_ascii_lowercase).as_deref() {
                Some("email") => FieldKind::Email,
                Some("tel") => FieldKind::Tel,
                _ => FieldKind::Text,
            },
        }
    }
}

/// Static description of one control in the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// `name` attribute, used as the payload key
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    /// `maxlength`, only meaningful for textareas
    pub max_length: Option<usize>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            max_length: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    Email,
    Phone,
}

impl FieldError {
    pub fn message(self, messages: &FormMessages) -> &str {
        match self {
            FieldError::Required => &messages.required,
            FieldError::Email => &messages.email,
            FieldError::Phone => &messages.phone,
        }
    }
}

/// Check a value against the field's rules
///
/// Required is checked first on the trimmed value; the format rules run
/// only when the raw value is non-empty.
pub fn validate(spec: &FieldSpec, value: &str) -> Result<(), FieldError> {
    if spec.required && is_blank(value) {
        return Err(FieldError::Required);
    }
    if value.is_empty() {
        return Ok(());
    }
    match spec.kind {
        FieldKind::Email if !is_valid_email(value) => Err(FieldError::Email),
        FieldKind::Tel if !is_valid_phone(value) => Err(FieldError::Phone),
        _ => Ok(()),
    }
}

/// Decoration shown on a field's form group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFeedback {
    /// No class, message hidden
    Neutral,
    /// `success` class, message hidden
    Success,
    /// `error` class, message shown
    Error(String),
}

impl FieldFeedback {
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            FieldFeedback::Neutral => None,
            FieldFeedback::Success => Some("success"),
            FieldFeedback::Error(_) => Some("error"),
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FieldFeedback::Error(message) => Some(message),
            _ => None,
        }
    }
}
