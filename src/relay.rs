//! Server-sent event relay
//!
//! Turns a bus subscription into the lazy, infinite frame sequence the
//! streaming endpoint writes out: one frame per poll, either a session
//! event or a keep-alive comment when the poll times out. The consumer
//! drives iteration; dropping the stream releases the subscription.

use std::time::Duration;

use async_stream::stream;
use futures::{Stream, StreamExt};
use tracing::warn;

use crate::bus::{EventStream, SessionEvent};

/// One outbound SSE frame
#[derive(Debug, Clone, PartialEq)]
pub enum SseFrame {
    /// A session event, rendered as a typed SSE message
    Event(SessionEvent),
    /// Comment-only line emitted when a poll times out; conforming clients
    /// ignore it
    KeepAlive,
}

impl SseFrame {
    /// Render the frame in SSE wire format
    pub fn to_wire(&self) -> String {
        match self {
            Self::Event(event) => {
                format!("event: {}\ndata: {}\n\n", event.kind(), event.data())
            }
            Self::KeepAlive => ": keep-alive\n\n".to_string(),
        }
    }
}

/// Frame sequence for one relay connection
///
/// Ends only when the subscription closes from the bus side; otherwise it
/// yields forever and relies on the consumer going away.
pub fn session_frames(
    mut events: EventStream,
    poll_timeout: Duration,
) -> impl Stream<Item = SseFrame> {
    stream! {
        loop {
            match tokio::time::timeout(poll_timeout, events.next()).await {
                Ok(Some(payload)) => match serde_json::from_slice::<SessionEvent>(&payload) {
                    Ok(event) => yield SseFrame::Event(event),
                    Err(err) => warn!("Discarding malformed session event: {}", err),
                },
                // Subscription closed from the bus side
                Ok(None) => break,
                // Nothing arrived within the poll window
                Err(_) => yield SseFrame::KeepAlive,
            }
        }
    }
}
