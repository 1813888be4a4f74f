use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A webhook-backed agent. One agent owns one conversation thread.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub webhook_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_at: Option<DateTime<Utc>>,
}

impl Agent {
    /// Create a new agent with a fresh id and the current timestamp.
    pub fn new<S: Into<String>, T: Into<String>>(name: S, webhook_url: T) -> Self {
        Agent {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            webhook_url: webhook_url.into(),
            created_at: Utc::now(),
            last_message_at: None,
        }
    }

    /// Record activity, keeping `last_message_at` monotonically non-decreasing.
    pub fn touch(&mut self, timestamp: DateTime<Utc>) {
        match self.last_message_at {
            Some(existing) if existing >= timestamp => {}
            _ => self.last_message_at = Some(timestamp),
        }
    }
}
