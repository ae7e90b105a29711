use anyhow::Context;
use imagechat_core::config::{read_dotenv, AppConfig};
use std::collections::HashMap;
use imagechat_core::RequestRouter;
use imagechat_server::{app, AppState};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        error!("imagechat-server failed: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let dotenv = match read_dotenv(".env") {
        Ok(vars) => {
            if !vars.is_empty() {
                info!(count = vars.len(), "Read variables from .env");
            }
            vars
        }
        Err(err) => {
            warn!("Ignoring unreadable .env: {}", err);
            HashMap::new()
        }
    };

    let config = AppConfig::from_env_with_dotenv(&dotenv).context("loading configuration")?;
    info!(
        api_key = %config.api_key.partial_redact(),
        chat_model = %config.chat_model,
        image_models = ?config.image_models,
        "Configuration loaded"
    );

    let router = RequestRouter::openai(&config).context("creating OpenAI client")?;

    let listener = TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("binding {}", config.bind_address))?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(AppState::new(router)))
        .await
        .context("serving HTTP")?;

    Ok(())
}
