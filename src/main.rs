//! Voice chat skill backend
//!
//! Receives voice platform requests, keeps a per-session transcript in the
//! session attributes, and answers with text generated by Gemini.

mod api;
mod config;
mod llm;
mod skill;
mod transcript;

use api::{create_router, AppState};
use config::SkillConfig;
use llm::{CompletionClient, GeminiClient, LoggingClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voice_chat_skill=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = SkillConfig::from_env();
    if !config.has_credential() {
        tracing::warn!("GOOGLE_API_KEY is not set; every reply will report the missing key");
    }

    let gemini: Arc<dyn CompletionClient> = Arc::new(GeminiClient::new(&config));
    let client: Arc<dyn CompletionClient> = Arc::new(LoggingClient::new(gemini));
    tracing::info!(model = %client.model_id(), api_base = %config.api_base, "Completion client ready");

    let state = AppState::new(skill::build_dispatcher(client));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Voice chat skill listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
