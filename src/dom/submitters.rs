//! Contact form delivery

use super::{sleep, window};
use crate::config::SubmissionConfig;
use crate::error::{UiError, UiResult};
use crate::form::{FormPayload, Submitter};
use async_trait::async_trait;
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Pretends to send: waits, then reports success
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait(?Send)]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, payload: &FormPayload) -> UiResult<()> {
        tracing::debug!(
            fields = payload.len(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating submission"
        );
        sleep(self.delay).await
    }
}

/// POSTs the payload as JSON to a same-origin endpoint
pub struct HttpSubmitter {
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl Submitter for HttpSubmitter {
    async fn submit(&self, payload: &FormPayload) -> UiResult<()> {
        let body = payload.to_json()?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::SameOrigin);
        init.set_body(&body.into());

        let request = Request::new_with_str_and_init(&self.endpoint, &init)?;
        request.headers().set("Content-Type", "application/json")?;

        let response: Response = JsFuture::from(window()?.fetch_with_request(&request))
            .await?
            .dyn_into()?;

        if !response.ok() {
            return Err(UiError::Submission(format!(
                "{} responded HTTP {}",
                self.endpoint,
                response.status()
            )));
        }
        tracing::info!(endpoint = %self.endpoint, "contact form delivered");
        Ok(())
    }
}

/// Build the submitter selected by configuration
pub(crate) fn from_config(config: &SubmissionConfig) -> Box<dyn Submitter> {
    match config {
        SubmissionConfig::Simulated { delay_ms } => {
            Box::new(SimulatedSubmitter::new(Duration::from_millis(*delay_ms)))
        }
        SubmissionConfig::Http { endpoint } => Box::new(HttpSubmitter::new(endpoint.clone())),
    }
}
