use std::collections::HashMap;

use anyhow::Result;
use bytes::Bytes;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::{EventBus, EventStream, SessionEvent};

/// Per-channel buffer; relays are expected to drain promptly
const CHANNEL_CAPACITY: usize = 64;

/// In-process event bus backed by broadcast channels
///
/// Stands in for NATS in the test suite and in infrastructure-free local
/// runs. Semantics match a native pub/sub medium: publishing to a channel
/// with no subscribers drops the event, and subscribers only see events
/// published after they attached.
#[derive(Default)]
pub struct MemoryBus {
    channels: RwLock<HashMap<String, broadcast::Sender<Bytes>>>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions for a session
    pub async fn subscriber_count(&self, session_id: &str) -> usize {
        let channels = self.channels.read().await;
        channels
            .get(session_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    async fn sender(&self, session_id: &str) -> broadcast::Sender<Bytes> {
        let mut channels = self.channels.write().await;
        channels
            .entry(session_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }
}

#[async_trait::async_trait]
impl EventBus for MemoryBus {
    async fn publish(&self, session_id: &str, event: &SessionEvent) -> Result<()> {
        let payload = Bytes::from(serde_json::to_vec(event)?);

        // send only errors when no receiver exists, which is exactly the
        // publish-to-empty-channel no-op
        if self.sender(session_id).await.send(payload).is_err() {
            debug!("No subscribers for session {}", session_id);
        }

        Ok(())
    }

    async fn subscribe(&self, session_id: &str) -> Result<EventStream> {
        let mut rx = self.sender(session_id).await.subscribe();

        let stream = async_stream::stream! {
            loop {
                match rx.recv().await {
                    Ok(payload) => yield payload,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Subscriber lagged, skipped {} events", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        };

        Ok(stream.boxed())
    }
}
