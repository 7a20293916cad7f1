//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL
    pub database_url: String,

    /// Server port
    pub port: u16,

    /// Classifier artifact path
    pub model_path: String,

    /// Feature scaler artifact path
    pub scaler_path: String,

    /// Landing page template
    pub template_path: String,

    /// Environment (development, production)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://database.db".to_string(),
            port: 5000,
            model_path: "fraud_model.json".to_string(),
            scaler_path: "scaler.json".to_string(),
            template_path: "templates/index.html".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or(defaults.database_url),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_path: env::var("MODEL_PATH")
                .unwrap_or(defaults.model_path),

            scaler_path: env::var("SCALER_PATH")
                .unwrap_or(defaults.scaler_path),

            template_path: env::var("TEMPLATE_PATH")
                .unwrap_or(defaults.template_path),

            environment: env::var("ENVIRONMENT")
                .unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
