//! Talkback - conversation practice service
//!
//! Runs practice conversations against a language model and produces
//! structured coaching feedback when a conversation ends.

mod analysis;
mod api;
mod backend;
mod config;
mod llm;
mod prompts;
mod session;

#[cfg(test)]
mod testing;

use api::{create_router, AppState};
use backend::Backend;
use config::Config;
use llm::OpenAiCompatService;
use session::{spawn_eviction_sweeper, SessionManager, TranscriptStore};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EVICTION_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talkback=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration (fatal on missing credentials)
    let config = Config::from_env()?;
    let settings = config.provider.settings();
    tracing::info!(
        provider = config.provider.display_name(),
        base_url = %settings.base_url,
        model = %settings.model,
        "LLM provider configured"
    );

    // Backend
    let service = OpenAiCompatService::new(&config.provider, config.request_timeout)?;
    let backend = Backend::new(Arc::new(service));

    // Session core
    let store = Arc::new(TranscriptStore::new());
    let session_ttl = chrono::Duration::from_std(config.session_ttl)?;
    let shutdown = CancellationToken::new();
    let sweeper = spawn_eviction_sweeper(
        Arc::clone(&store),
        session_ttl,
        EVICTION_INTERVAL,
        shutdown.clone(),
    );
    let state = AppState::new(SessionManager::new(store, backend));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Talkback server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown.cancel();
    sweeper.await?;
    tracing::info!("Talkback server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
