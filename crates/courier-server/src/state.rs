use std::sync::Arc;
use std::time::Duration;

use courier::dispatch::WebhookDispatcher;
use courier::relay::MessageRelay;
use courier::store::ConversationStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConversationStore>,
    pub relay: Arc<MessageRelay>,
}

impl AppState {
    pub fn new(reply_timeout: Duration) -> anyhow::Result<Self> {
        let store = Arc::new(ConversationStore::new());
        let dispatcher = WebhookDispatcher::new(reply_timeout)?;
        let relay = Arc::new(MessageRelay::new(Arc::clone(&store), dispatcher));
        Ok(Self { store, relay })
    }
}
