use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fraud_scoring_server::{
    config::Config,
    create_router,
    db::Database,
    model::Artifacts,
    scoring::ScoringEngine,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fraud_scoring_server=debug,tower_http=debug".into());
    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Fraud scoring server starting...");
    tracing::info!("Database: {}", config.database_url);

    // Artifacts are mandatory; refuse to serve without them
    let artifacts = Artifacts::load(&config.model_path, &config.scaler_path)
        .context("Failed to load model artifacts")?;

    let db = Database::new(&config.database_url)
        .context("Invalid DATABASE_URL")?;
    db.init().await
        .context("Failed to initialize database schema")?;

    let state = AppState {
        db,
        engine: ScoringEngine::new(artifacts),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await
        .context("Server error")?;

    Ok(())
}
