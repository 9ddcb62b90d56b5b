//! Error types for the site behavior layer

use thiserror::Error;

/// Errors surfaced by the core state machines and the DOM driver
#[derive(Debug, Error)]
pub enum UiError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Configuration JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Required element not found: {0}")]
    MissingElement(String),

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Fetch of {url} failed with HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Slide {requested} is out of range 1..={count}")]
    SlideOutOfRange { requested: usize, count: usize },

    #[error("Unknown form field #{0}")]
    UnknownField(usize),
}

pub type UiResult<T> = Result<T, UiError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for UiError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                js_sys::Reflect::get(&value, &"message".into())
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"));
        UiError::Js(message)
    }
}
