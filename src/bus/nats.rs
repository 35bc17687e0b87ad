use anyhow::{Context, Result};
use async_nats::Client;
use futures::StreamExt;
use tracing::{debug, info};

use super::{EventBus, EventStream, SessionEvent};

/// NATS-backed event bus
pub struct NatsBus {
    client: Client,
}

impl NatsBus {
    /// Connect to the NATS server
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client })
    }

    /// Subject carrying one session's events
    fn subject(session_id: &str) -> String {
        format!("session.events.{}", session_id)
    }
}

#[async_trait::async_trait]
impl EventBus for NatsBus {
    async fn publish(&self, session_id: &str, event: &SessionEvent) -> Result<()> {
        let subject = Self::subject(session_id);
        let payload = serde_json::to_vec(event)?;

        self.client
            .publish(subject.clone(), payload.into())
            .await
            .context("Failed to publish session event")?;

        debug!("Published {} event to {}", event.kind(), subject);

        Ok(())
    }

    async fn subscribe(&self, session_id: &str) -> Result<EventStream> {
        let subject = Self::subject(session_id);

        info!("Subscribing to {}", subject);

        let subscriber = self
            .client
            .subscribe(subject)
            .await
            .context("Failed to subscribe to session events")?;

        // async-nats sends the UNSUB when the subscriber is dropped
        Ok(subscriber.map(|msg| msg.payload).boxed())
    }
}
