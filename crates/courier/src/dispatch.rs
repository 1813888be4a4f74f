//! Outbound webhook dispatch.
//!
//! A dispatch is a single HTTP attempt, never retried. Transport
//! failures, timeouts, and non-success statuses all collapse into
//! [`DispatchOutcome::NoReply`], which callers treat as a recognized
//! degraded mode rather than an error.

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;

use crate::models::Attachment;

/// Reference wait for a synchronous agent reply.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(10);

/// Candidate reply fields checked in priority order. This is a stable
/// contract: agents may answer with any one of these keys.
const REPLY_FIELDS: [&str; 3] = ["response", "message", "output"];

/// Substituted when a 2xx JSON reply carries none of the known fields.
const FALLBACK_REPLY: &str = "Agent response";

/// Body POSTed to an agent's webhook URL. Attachments here retain
/// their encoded payloads; this is the one representation that must.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub agent_id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub message_id: String,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The agent answered synchronously with this content.
    Replied(String),
    /// No usable reply: fire-and-forget mode, timeout, transport
    /// failure, non-success status, or an unreadable body.
    NoReply,
}

pub struct WebhookDispatcher {
    client: Client,
}

impl WebhookDispatcher {
    pub fn new(reply_timeout: Duration) -> Result<Self> {
        // The client-level timeout bounds the wait-for-reply mode and
        // abandons the in-flight request at the deadline; a late reply
        // is discarded, never appended.
        let client = Client::builder().timeout(reply_timeout).build()?;
        Ok(Self { client })
    }

    /// Send `payload` to `webhook_url`.
    ///
    /// With `wait_for_reply` the call blocks up to the configured
    /// timeout and may yield `Replied`. Without it the request runs on
    /// a detached task whose outcome is only visible in the logs, and
    /// the agent's eventual answer re-enters through the callback
    /// endpoint; the caller always gets `NoReply` immediately.
    pub async fn dispatch(
        &self,
        webhook_url: &str,
        payload: WebhookPayload,
        wait_for_reply: bool,
    ) -> DispatchOutcome {
        if !wait_for_reply {
            let client = self.client.clone();
            let url = webhook_url.to_string();
            tokio::spawn(async move {
                match client.post(&url).json(&payload).send().await {
                    Ok(response) if response.status().is_success() => {
                        tracing::debug!(url = %url, "detached webhook dispatch delivered");
                    }
                    Ok(response) => {
                        tracing::warn!(
                            url = %url,
                            status = %response.status(),
                            "detached webhook dispatch rejected"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "detached webhook dispatch failed");
                    }
                }
            });
            return DispatchOutcome::NoReply;
        }

        let response = match self.client.post(webhook_url).json(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %webhook_url, error = %e, "webhook dispatch failed");
                return DispatchOutcome::NoReply;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                url = %webhook_url,
                status = %response.status(),
                "webhook rejected dispatch"
            );
            return DispatchOutcome::NoReply;
        }

        match response.json::<Value>().await {
            Ok(body) => DispatchOutcome::Replied(extract_reply(&body)),
            Err(e) => {
                tracing::warn!(url = %webhook_url, error = %e, "webhook reply was not JSON");
                DispatchOutcome::NoReply
            }
        }
    }
}

/// Pick the reply text out of a heterogeneous agent response: the first
/// non-empty string among the recognized keys, else a fixed fallback.
fn extract_reply(body: &Value) -> String {
    for field in REPLY_FIELDS {
        if let Some(text) = body.get(field).and_then(|v| v.as_str()) {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    FALLBACK_REPLY.to_string()
}
