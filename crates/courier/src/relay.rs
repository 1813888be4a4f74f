//! Message relay: the orchestration between the conversation store and
//! the webhook dispatcher.
//!
//! A send request moves through validate, store-user-message, dispatch,
//! reconcile. Once the user message is stored the request can no longer
//! fail: a dead or slow webhook degrades to returning the user message
//! alone.

use std::sync::Arc;

use crate::codec;
use crate::dispatch::{DispatchOutcome, WebhookDispatcher, WebhookPayload};
use crate::errors::{RelayError, RelayResult};
use crate::models::{Attachment, Message};
use crate::store::ConversationStore;

/// Content substituted when a send carries an attachment but no text.
const ATTACHMENT_PLACEHOLDER: &str = "sent 1 attachment";

/// Content substituted when an agent callback carries no text fields.
const CALLBACK_PLACEHOLDER: &str = "Agent message";

/// A file as it arrives from the transport layer, before encoding.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

pub struct MessageRelay {
    store: Arc<ConversationStore>,
    dispatcher: WebhookDispatcher,
}

impl MessageRelay {
    pub fn new(store: Arc<ConversationStore>, dispatcher: WebhookDispatcher) -> Self {
        Self { store, dispatcher }
    }

    /// Relay a user message to an agent.
    ///
    /// Validation order: agent existence is checked first, then content.
    /// An attachment switches dispatch to fire-and-forget, since
    /// encoding and transmitting binary content can blow the
    /// interactive latency budget; the agent's eventual reply arrives
    /// through [`MessageRelay::receive_agent_callback`].
    pub async fn send_message(
        &self,
        agent_id: &str,
        content: &str,
        attachment: Option<UploadedFile>,
    ) -> RelayResult<Message> {
        let agent = self
            .store
            .agent(agent_id)
            .ok_or_else(|| RelayError::NotFound("Agent not found".to_string()))?;

        if content.trim().is_empty() && attachment.is_none() {
            return Err(RelayError::Validation(
                "Message content or an attachment is required".to_string(),
            ));
        }

        let encoded = attachment
            .as_ref()
            .map(|file| codec::encode(&file.data, &file.filename, &file.mime_type));

        let text = if content.trim().is_empty() {
            ATTACHMENT_PLACEHOLDER
        } else {
            content
        };

        // The stored copy drops the payload; the webhook copy keeps it.
        let mut user_message = Message::user(agent_id, text);
        if let Some(att) = &encoded {
            user_message = user_message.with_attachment(att.without_payload());
        }
        self.store.append_message(user_message.clone())?;

        let payload = WebhookPayload {
            agent_id: agent_id.to_string(),
            message: user_message.content.clone(),
            timestamp: user_message.timestamp,
            message_id: user_message.id.clone(),
            attachments: encoded.into_iter().collect(),
        };

        let wait_for_reply = payload.attachments.is_empty();
        match self
            .dispatcher
            .dispatch(&agent.webhook_url, payload, wait_for_reply)
            .await
        {
            DispatchOutcome::Replied(reply) => {
                let agent_message = Message::agent(agent_id, reply);
                self.store.append_message(agent_message.clone())?;
                Ok(agent_message)
            }
            DispatchOutcome::NoReply => Ok(user_message),
        }
    }

    /// Accept a message pushed by an agent at any time, including the
    /// eventual answer to a fire-and-forget dispatch.
    pub fn receive_agent_callback(
        &self,
        agent_id: &str,
        content: Option<String>,
        attachments: Option<Vec<Attachment>>,
    ) -> RelayResult<Message> {
        if self.store.agent(agent_id).is_none() {
            return Err(RelayError::NotFound("Agent not found".to_string()));
        }

        let text = content
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| CALLBACK_PLACEHOLDER.to_string());

        let mut message = Message::agent(agent_id, text);
        if let Some(attachments) = attachments {
            let stripped = attachments.iter().map(Attachment::without_payload).collect();
            message = message.with_attachments(stripped);
        }
        self.store.append_message(message.clone())?;
        Ok(message)
    }
}
