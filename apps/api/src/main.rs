mod cli;
mod config;
mod errors;
mod extract;
mod llm_client;
mod prompts;
mod routes;
mod scoring;
mod session;
mod state;
mod workflow;

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::llm_client::OpenAiGateway;
use crate::routes::build_router;
use crate::scoring::TfIdfScorer;
use crate::session::InMemorySessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging. stderr keeps stdout clean for terminal commands.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting HR API v{}", env!("CARGO_PKG_VERSION"));

    let gateway = OpenAiGateway::new(config.openai_api_key.clone(), &config.openai_base_url);
    info!("LLM gateway initialized (model: {})", llm_client::MODEL);

    let state = AppState {
        gateway: Arc::new(gateway),
        scorer: Arc::new(TfIdfScorer::new()),
        sessions: Arc::new(InMemorySessionStore::new()),
        config: config.clone(),
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(state, &config).await,
        Commands::Evaluate { jd, cvs } => cli::run_evaluate(&state, &jd, &cvs).await,
        Commands::Interview { jd, cv } => cli::run_interview(&state, &jd, &cv).await,
        Commands::Ask { policies, question } => cli::run_ask(&state, &policies, &question).await,
    }
}

async fn serve(state: AppState, config: &Config) -> Result<()> {
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
