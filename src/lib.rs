//! Fraud Scoring Server
//!
//! Scores card transactions with a pre-trained classifier and records every
//! outcome in a local SQLite file.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  FRAUD SCORING SERVER                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  POST /predict                                              │
//! │     │                                                       │
//! │     ▼                                                       │
//! │  ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐ │
//! │  │ Feature   │─▶│ Scoring   │─▶│ Decision  │─▶│ SQLite   │ │
//! │  │ Synth     │  │ (scaler + │  │ Policy    │  │ store    │ │
//! │  │           │  │  model)   │  │           │  │          │ │
//! │  └───────────┘  └───────────┘  └───────────┘  └──────────┘ │
//! │                                                   ▲         │
//! │  GET /transactions ───────────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod handlers;
pub mod model;
pub mod models;
pub mod policy;
pub mod scoring;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: db::Database,
    pub engine: scoring::ScoringEngine,
    pub config: config::Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home::index))
        .route("/health", get(handlers::health::check))
        .route("/predict", post(handlers::predict::predict))
        .route("/transactions", get(handlers::transactions::list))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
