use std::sync::Arc;

use crate::bus::EventBus;
use crate::config::RelayConfig;
use crate::speech::SpeechService;

/// Shared application state for HTTP handlers
///
/// Collaborators are constructed once at startup and injected here instead
/// of living in module globals.
#[derive(Clone)]
pub struct AppState {
    pub speech: Arc<dyn SpeechService>,
    pub bus: Arc<dyn EventBus>,
    pub relay: RelayConfig,
}

impl AppState {
    pub fn new(speech: Arc<dyn SpeechService>, bus: Arc<dyn EventBus>, relay: RelayConfig) -> Self {
        Self { speech, bus, relay }
    }
}
