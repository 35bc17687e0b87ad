//! Session-scoped broadcast bus
//!
//! Publishers (the ingest pipeline) and subscribers (event relays) are
//! decoupled: events are published to a channel derived from the session id
//! and delivered to whoever is subscribed at that moment. There is no
//! buffering and no replay; channel lifecycle belongs to the medium.

mod memory;
mod messages;
mod nats;

pub use memory::MemoryBus;
pub use messages::SessionEvent;
pub use nats::NatsBus;

use anyhow::Result;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Raw event payloads delivered to one subscriber, in publish order
pub type EventStream = BoxStream<'static, Bytes>;

/// Publish/subscribe contract for session event channels
#[async_trait::async_trait]
pub trait EventBus: Send + Sync {
    /// Publish an event to the session's channel
    ///
    /// Publishing with no subscribers attached is a silent no-op.
    async fn publish(&self, session_id: &str, event: &SessionEvent) -> Result<()>;

    /// Subscribe to the session's channel
    ///
    /// Only events published after the subscription is established are
    /// delivered. Dropping the stream releases the subscription.
    async fn subscribe(&self, session_id: &str) -> Result<EventStream>;
}
