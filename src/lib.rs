pub mod bus;
pub mod config;
pub mod http;
pub mod ingest;
pub mod relay;
pub mod speech;

pub use bus::{EventBus, EventStream, MemoryBus, NatsBus, SessionEvent};
pub use config::Config;
pub use http::{create_router, AppState};
pub use ingest::{process_chunk, ChunkUpload};
pub use relay::{session_frames, SseFrame};
pub use speech::{OpenAiClient, SpeechError, SpeechService};
