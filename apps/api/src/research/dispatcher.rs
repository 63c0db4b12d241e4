//! Workflow Dispatcher — hands a keyword + country pair to the research
//! workflow webhook and relays whatever it answers.
//!
//! One POST per request, 20 second timeout, no retries.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

pub const DISPATCH_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Error sending request: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ResearchPayload<'a> {
    pub keyword: &'a str,
    pub country: &'a str,
}

/// Successful workflow answer: JSON when the body parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum WorkflowReply {
    Json(Value),
    Text(String),
}

#[derive(Clone)]
pub struct WorkflowDispatcher {
    client: Client,
    url: String,
}

impl WorkflowDispatcher {
    pub fn new(url: String) -> Result<Self, DispatchError> {
        let client = Client::builder().timeout(DISPATCH_TIMEOUT).build()?;
        Ok(Self { client, url })
    }

    pub async fn dispatch(
        &self,
        keyword: &str,
        country: &str,
    ) -> Result<WorkflowReply, DispatchError> {
        info!("Dispatching keyword research: keyword='{keyword}' country='{country}'");

        let response = self
            .client
            .post(&self.url)
            .json(&ResearchPayload { keyword, country })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            warn!("Research workflow returned {status}");
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(match serde_json::from_str(&body) {
            Ok(json) => WorkflowReply::Json(json),
            Err(_) => WorkflowReply::Text(body),
        })
    }
}
