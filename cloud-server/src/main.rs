//! PitchGuard Cloud Server
//!
//! Evaluator service for the PitchGuard embed agent.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PITCHGUARD CLOUD                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────────────┐  ┌──────────────┐ │
//! │  │  API      │  │  Evaluation          │  │  AI Scorer   │ │
//! │  │  (Axum)   │─▶│  extract/score/blend │─▶│  (optional)  │ │
//! │  │           │  │  /decide             │  │              │ │
//! │  └─────┬─────┘  └──────────────────────┘  └──────────────┘ │
//! │        ▼                                                    │
//! │  ┌─────────────────────────┐                               │
//! │  │ Submissions (PG/memory) │                               │
//! │  └─────────────────────────┘                               │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod models;
mod handlers;
mod logic;
mod error;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use logic::evaluation::EvaluationEngine;
use models::{MemorySubmissionStore, PgSubmissionStore, SubmissionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "pitchguard_cloud=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env().context("invalid configuration")?;

    tracing::info!("PitchGuard Cloud starting ({})", config.environment);
    tracing::info!(
        "Thresholds: sales {} / spam {}, {} site key(s)",
        config.thresholds.sales,
        config.thresholds.spam,
        config.api_key_hashes.len()
    );
    if config.api_key_hashes.is_empty() && !config.is_production() {
        tracing::warn!("No PITCHGUARD_API_KEYS set, accepting any key");
    }

    // Submission store
    let store: Arc<dyn SubmissionStore> = match &config.database_url {
        Some(url) => {
            tracing::info!("Database: {}", url.split('@').last().unwrap_or("***"));
            let pool = db::create_pool(url).await.context("failed to create database pool")?;

            tracing::info!("Running database migrations...");
            db::run_migrations(&pool).await.context("failed to run migrations")?;
            Arc::new(PgSubmissionStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, submissions are kept in memory");
            Arc::new(MemorySubmissionStore::new())
        }
    };

    let scorer = logic::ai_scorer::from_config(&config.ai)?;
    tracing::info!("AI scorer: {}", if scorer.is_enabled() { config.ai.model.as_str() } else { "disabled" });

    let engine = EvaluationEngine::new(config.rules.clone(), config.thresholds, Arc::from(scorer));

    // Build application state
    let state = AppState {
        config: Arc::new(config.clone()),
        engine: Arc::new(engine),
        store,
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub engine: Arc<EvaluationEngine>,
    pub store: Arc<dyn SubmissionStore>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/evaluate", post(handlers::evaluate::evaluate))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            // the embed agent posts from arbitrary customer origins
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
