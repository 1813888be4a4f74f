use super::attachment::Attachment;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

/// One entry in an agent's conversation thread. Immutable once created;
/// thread order is append order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub agent_id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl Message {
    /// Create a new user message with the current timestamp
    pub fn user<S: Into<String>, T: Into<String>>(agent_id: S, content: T) -> Self {
        Message::new(agent_id, content, Sender::User)
    }

    /// Create a new agent message with the current timestamp
    pub fn agent<S: Into<String>, T: Into<String>>(agent_id: S, content: T) -> Self {
        Message::new(agent_id, content, Sender::Agent)
    }

    fn new<S: Into<String>, T: Into<String>>(agent_id: S, content: T, sender: Sender) -> Self {
        Message {
            id: Uuid::new_v4().to_string(),
            agent_id: agent_id.into(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            attachments: None,
        }
    }

    /// Attach a single file to the message. Messages carry at most one
    /// attachment; attaching again replaces the previous one.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments = Some(vec![attachment]);
        self
    }

    /// Attach the given set verbatim (agent callbacks may relay several).
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = if attachments.is_empty() {
            None
        } else {
            Some(attachments)
        };
        self
    }
}
