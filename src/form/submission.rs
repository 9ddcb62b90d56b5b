//! Submission lifecycle: payload, submitter seam and result banners

use crate::error::UiResult;
use crate::time::Timestamp;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;

/// Field values keyed by `name`, serialized as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormPayload(BTreeMap<String, String>);

impl FormPayload {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> UiResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Delivers a validated form somewhere
///
/// Futures are `!Send`: the browser runs everything on one thread.
#[async_trait(?Send)]
pub trait Submitter {
    async fn submit(&self, payload: &FormPayload) -> UiResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
}

/// Result of asking the form to start a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// At least one field is invalid; per-field feedback already shows why
    Rejected,
    /// A submission is already running
    InFlight,
    /// Control disabled; deliver this payload and report back
    Started(FormPayload),
}

/// State of the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BannerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    pub fn css_class(self) -> &'static str {
        match self {
            BannerKind::Success => "success",
            BannerKind::Error => "error",
        }
    }
}

/// Transient message shown above the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: BannerId,
    pub kind: BannerKind,
    pub text: String,
    pub expires_at: Timestamp,
}
