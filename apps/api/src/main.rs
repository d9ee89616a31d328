mod config;
mod dataset;
mod errors;
mod knowledge_base;
mod llm_client;
mod models;
mod recommendation;
mod routes;
mod shutdown;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::knowledge_base::KnowledgeBase;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::shutdown::shutdown_signal;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (also loads .env)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting activity API v{}", env!("CARGO_PKG_VERSION"));

    // Build the knowledge base once; a failure here degrades, it does not abort
    let knowledge_base =
        KnowledgeBase::initialize(&config.dataset_path, config.knowledge_base_examples);
    if knowledge_base.is_degraded() {
        warn!("Serving with an empty knowledge base");
    }

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_api_base.clone(),
        config.llm_model.clone(),
        config.llm_api_key_var.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    if config.debug {
        warn!("Debug mode: error details are returned to callers");
    }

    let state = AppState {
        knowledge_base: Arc::new(knowledge_base),
        llm: Arc::new(llm),
        config: config.clone(),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
