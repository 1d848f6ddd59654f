mod account;
mod auth;
mod config;
mod cv;
mod db;
mod errors;
mod export;
mod generation;
mod lang;
mod llm_client;
mod response;
mod routes;
mod state;
mod upload;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::captcha::CaptchaStore;
use crate::auth::tokens::SessionKeys;
use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

/// How often expired captcha challenges are swept from the in-process store.
const CAPTCHA_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("easyjob_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EasyJob API v{}", env!("CARGO_PKG_VERSION"));

    errors::set_expose_error_details(config.is_development());

    // Initialize PostgreSQL and apply the idempotent schema migration
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.llm_api_key.clone(),
        config.llm_base_url.clone(),
        config.llm_model.clone(),
    );
    if llm.is_configured() {
        info!("LLM client initialized (model: {})", config.llm_model);
    } else {
        tracing::warn!("LLM_API_KEY is not set. LLM features will not work.");
    }

    // Captcha store plus its periodic expiry sweep
    let captcha = CaptchaStore::default();
    {
        let captcha = captcha.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(CAPTCHA_SWEEP_INTERVAL);
            loop {
                interval.tick().await;
                captcha.sweep();
            }
        });
    }

    let session_keys = SessionKeys::new(&config.jwt_secret);

    // Build app state
    let state = AppState {
        db,
        llm,
        captcha,
        session_keys,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
