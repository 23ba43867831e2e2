//! Server binary: wires configuration, the recognizer client, and the HTTP
//! surface together.
//!
//! Expects `SPEAKSCORE_API_KEY` (or an explicit key via the builder when used
//! as a library). Listens on `SPEAKSCORE_PORT`, default 3000.

use anyhow::Context;
use speakscore::config::ServerConfig;
use speakscore::recognizer::GoogleRecognizer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env().context("invalid server configuration")?;
    let recognizer = GoogleRecognizer::builder()
        .build()
        .context("failed to build recognizer client")?;

    speakscore::server::serve(&config, Arc::new(recognizer))
        .await
        .context("server error")?;
    Ok(())
}
