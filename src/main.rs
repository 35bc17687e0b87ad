use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use speech_relay::bus::NatsBus;
use speech_relay::speech::OpenAiClient;
use speech_relay::{create_router, AppState, Config};
use tracing::{error, info, warn};

#[derive(Debug, Parser)]
#[command(name = "speech-relay", about = "Session-scoped speech relay service")]
struct Args {
    /// Configuration file (TOML, optional)
    #[arg(long, default_value = "config/speech-relay")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!(
        "HTTP server will bind to {}:{}",
        cfg.service.http.bind, cfg.service.http.port
    );
    info!("Broadcast bus at {}", cfg.nats.url);

    if cfg.openai.api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set; upstream calls will fail");
    }

    let bus = NatsBus::connect(&cfg.nats.url).await?;
    let speech = OpenAiClient::new(cfg.openai.clone())?;

    let state = AppState::new(Arc::new(speech), Arc::new(bus), cfg.relay.clone());
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down cleanly");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
    }
}
