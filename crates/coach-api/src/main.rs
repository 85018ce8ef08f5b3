//! Writing coach REST API server.

use coach_api::{server, AppState, ServerConfig};
use coach_llm::{LLMClient, LlmWritingCoach, OpenAiLLMClient};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match dotenv {
        Ok(path) => tracing::info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("no .env file"),
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }

    let state = match OpenAiLLMClient::from_env() {
        Some(llm) => {
            tracing::info!(model = llm.model(), "AI assistant initialized");
            AppState::new(Arc::new(LlmWritingCoach::new(llm)))
        }
        None => {
            tracing::error!("OPENAI_API_KEY is not set; coach endpoints will answer 503");
            AppState::uninitialized()
        }
    };

    let config = ServerConfig::from_env()?;
    let app = server::router(Arc::new(state), &config.cors_origins);
    tracing::info!("Writing coach API listening on {}", config.listen);
    axum::serve(
        tokio::net::TcpListener::bind(config.listen).await?,
        app.into_make_service(),
    )
    .await?;
    Ok(())
}
