mod config;
mod errors;
mod keywords;
mod llm_client;
mod research;
mod routes;
mod sessions;
mod state;
mod writing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, SheetConfig};
use crate::keywords::source::{CsvFileSource, GoogleSheetsSource, KeywordSource};
use crate::llm_client::LlmClient;
use crate::research::dispatcher::WorkflowDispatcher;
use crate::routes::build_router;
use crate::sessions::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Blogdesk API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize keyword worksheet source
    let keywords = build_keyword_source(&config.sheet);
    info!("Keyword source: {}", keywords.describe());

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), config.openai_base_url.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize research workflow dispatcher
    let dispatcher = WorkflowDispatcher::new(config.workflow_webhook_url.clone())?;
    info!("Research workflow dispatcher initialized");

    // Build app state
    let state = AppState {
        llm,
        keywords,
        dispatcher,
        sessions: SessionStore::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the front-end origin once it is deployed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the worksheet backend: a local CSV export if configured, Google Sheets otherwise.
fn build_keyword_source(sheet: &SheetConfig) -> Arc<dyn KeywordSource> {
    match sheet {
        SheetConfig::Csv { path } => Arc::new(CsvFileSource::new(path)),
        SheetConfig::Google {
            spreadsheet_id,
            worksheet,
            auth,
        } => Arc::new(GoogleSheetsSource::new(
            spreadsheet_id.clone(),
            worksheet.clone(),
            auth.clone(),
        )),
    }
}
