mod client;
mod messages;

pub use client::OpenAiClient;
