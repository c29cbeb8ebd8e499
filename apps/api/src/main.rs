mod config;
mod errors;
mod llm_client;
mod models;
mod parsing;
mod routes;
mod screening;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::parsing::{FallbackSegmenter, GazetteerRecognizer, ResumeParser, Taxonomy};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client (optional)
    let llm: Option<Arc<dyn TextGenerator>> = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.llm_request_timeout)
                .context("failed to build LLM HTTP client")?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client) as Arc<dyn TextGenerator>)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; screening routes and model fallback disabled");
            None
        }
    };

    // Initialize the résumé parser
    let mut parser = ResumeParser::new(Taxonomy::english(), Arc::new(GazetteerRecognizer::new()))
        .with_thresholds(config.section_threshold, config.match_threshold);
    if config.llm_fallback_enabled && config.llm_request_timeout >= config.llm_timeout {
        warn!(
            request_timeout = ?config.llm_request_timeout,
            deadline = ?config.llm_timeout,
            "LLM request timeout is not below the fallback deadline; retries cannot complete"
        );
    }
    match (&llm, config.llm_fallback_enabled) {
        (Some(generator), true) => {
            parser = parser.with_fallback(FallbackSegmenter::new(
                generator.clone(),
                config.llm_timeout,
            ));
            info!(timeout = ?config.llm_timeout, "model segmentation fallback enabled");
        }
        (None, true) => warn!("LLM_FALLBACK_ENABLED is set but no API key is configured"),
        _ => {}
    }
    info!(
        section_threshold = config.section_threshold,
        match_threshold = config.match_threshold,
        fallback = parser.has_fallback(),
        "resume parser ready"
    );

    // Build app state
    let state = AppState {
        parser,
        llm,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once a frontend host exists

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
