//! In-memory registry of agents and their conversation threads.
//!
//! State lives for the process lifetime; there is no durable storage.
//! The store is constructed once at startup and shared behind an `Arc`
//! rather than living in ambient globals.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, Utc};

use crate::errors::{RelayError, RelayResult};
use crate::models::{Agent, Message};

pub struct ConversationStore {
    /// Agents in creation order.
    agents: RwLock<Vec<Agent>>,
    /// One thread per agent. Appends take only the per-agent mutex, so
    /// a slow append never blocks other conversations.
    threads: RwLock<HashMap<String, Arc<Mutex<Vec<Message>>>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        ConversationStore {
            agents: RwLock::new(Vec::new()),
            threads: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new agent with an empty conversation thread.
    pub fn create_agent(&self, name: &str, webhook_url: &str) -> RelayResult<Agent> {
        if name.trim().is_empty() || webhook_url.trim().is_empty() {
            return Err(RelayError::Validation(
                "Name and webhook URL are required".to_string(),
            ));
        }

        let agent = Agent::new(name, webhook_url);
        self.threads
            .write()
            .unwrap()
            .insert(agent.id.clone(), Arc::new(Mutex::new(Vec::new())));
        self.agents.write().unwrap().push(agent.clone());
        Ok(agent)
    }

    /// All known agents in creation order.
    pub fn list_agents(&self) -> Vec<Agent> {
        self.agents.read().unwrap().clone()
    }

    /// Look up a single agent by id.
    pub fn agent(&self, agent_id: &str) -> Option<Agent> {
        self.agents
            .read()
            .unwrap()
            .iter()
            .find(|a| a.id == agent_id)
            .cloned()
    }

    /// Append a message to its agent's thread and touch the agent.
    ///
    /// The append-and-touch sequence holds only that agent's thread
    /// mutex, so concurrent appends to the same agent serialize without
    /// losing entries and appends to other agents proceed untouched.
    pub fn append_message(&self, message: Message) -> RelayResult<()> {
        let thread = {
            let threads = self.threads.read().unwrap();
            threads
                .get(&message.agent_id)
                .cloned()
                .ok_or_else(|| RelayError::NotFound("Agent not found".to_string()))?
        };

        let mut thread = thread.lock().unwrap();
        let timestamp = message.timestamp;
        let agent_id = message.agent_id.clone();
        thread.push(message);
        self.touch_agent(&agent_id, timestamp);
        Ok(())
    }

    /// Messages for an agent in append order. An unknown agent reads as
    /// an empty thread, never an error.
    pub fn get_messages(&self, agent_id: &str) -> Vec<Message> {
        let thread = {
            let threads = self.threads.read().unwrap();
            threads.get(agent_id).cloned()
        };
        match thread {
            Some(thread) => thread.lock().unwrap().clone(),
            None => Vec::new(),
        }
    }

    /// Update `last_message_at`, keeping it monotonically non-decreasing.
    pub fn touch_agent(&self, agent_id: &str, timestamp: DateTime<Utc>) {
        let mut agents = self.agents.write().unwrap();
        if let Some(agent) = agents.iter_mut().find(|a| a.id == agent_id) {
            agent.touch(timestamp);
        }
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;

    #[test]
    fn test_create_and_list_agents() {
        let store = ConversationStore::new();
        let first = store.create_agent("alpha", "https://example.com/a").unwrap();
        let second = store.create_agent("beta", "https://example.com/b").unwrap();

        let agents = store.list_agents();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].id, first.id);
        assert_eq!(agents[1].id, second.id);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_create_agent_rejects_blank_fields() {
        let store = ConversationStore::new();
        assert!(matches!(
            store.create_agent("", "https://example.com"),
            Err(RelayError::Validation(_))
        ));
        assert!(matches!(
            store.create_agent("alpha", "   "),
            Err(RelayError::Validation(_))
        ));
    }

    #[test]
    fn test_messages_for_unknown_agent_is_empty() {
        let store = ConversationStore::new();
        assert!(store.get_messages("never-created").is_empty());
    }

    #[test]
    fn test_append_to_unknown_agent_is_not_found() {
        let store = ConversationStore::new();
        let message = Message::user("missing", "hello");
        assert!(matches!(
            store.append_message(message),
            Err(RelayError::NotFound(_))
        ));
    }

    #[test]
    fn test_append_preserves_order_and_touches_agent() {
        let store = ConversationStore::new();
        let agent = store.create_agent("alpha", "https://example.com").unwrap();

        let user = Message::user(&agent.id, "ping");
        let reply = Message::agent(&agent.id, "pong");
        store.append_message(user.clone()).unwrap();
        store.append_message(reply.clone()).unwrap();

        let messages = store.get_messages(&agent.id);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].id, user.id);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[1].id, reply.id);
        assert_eq!(messages[1].sender, Sender::Agent);

        let touched = store.agent(&agent.id).unwrap();
        assert!(touched.last_message_at.is_some());
    }

    #[test]
    fn test_touch_is_monotonic_through_store() {
        let store = ConversationStore::new();
        let agent = store.create_agent("alpha", "https://example.com").unwrap();

        let now = Utc::now();
        store.touch_agent(&agent.id, now);
        store.touch_agent(&agent.id, now - chrono::Duration::seconds(30));

        assert_eq!(store.agent(&agent.id).unwrap().last_message_at, Some(now));
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let store = Arc::new(ConversationStore::new());
        let agent = store.create_agent("alpha", "https://example.com").unwrap();

        let mut handles = Vec::new();
        for caller in ["left", "right"] {
            let store = Arc::clone(&store);
            let agent_id = agent.id.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    let message = Message::user(&agent_id, format!("{}-{}", caller, i));
                    store.append_message(message).unwrap();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let messages = store.get_messages(&agent.id);
        assert_eq!(messages.len(), 100);

        // Within each caller, append order matches send order
        for caller in ["left", "right"] {
            let seen: Vec<&str> = messages
                .iter()
                .filter(|m| m.content.starts_with(caller))
                .map(|m| m.content.as_str())
                .collect();
            let expected: Vec<String> =
                (0..50).map(|i| format!("{}-{}", caller, i)).collect();
            assert_eq!(seen, expected);
        }
    }
}
