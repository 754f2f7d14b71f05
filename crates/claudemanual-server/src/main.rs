//! ClaudeManual Server
//!
//! Self-hosted documentation browser for markdown-described skills, commands,
//! agents, and architecture documents.

use claudemanual_server::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut config = ServerConfig::default();
    if let Ok(port) = std::env::var("PORT") {
        config.port = port
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid PORT value: {port}"))?;
    }

    start_server(config).await
}
