//! Database module - SQLite store for scored transactions
//!
//! Connections are opened per request and closed when the request is done;
//! there is no pool.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

/// Connection settings for the transaction store
#[derive(Debug, Clone)]
pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    pub fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true);

        Ok(Self { options })
    }

    /// Open a fresh connection. Callers close it when done.
    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }

    /// Create the parent directory and the `transactions` table if missing
    pub async fn init(&self) -> Result<(), sqlx::Error> {
        if let Some(parent) = self.options.get_filename().parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut conn = self.connect().await?;
        sqlx::query(SCHEMA_SQL)
            .execute(&mut conn)
            .await?;
        conn.close().await?;

        tracing::info!("Database schema applied successfully");
        Ok(())
    }
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount REAL NOT NULL,
    time REAL NOT NULL,
    fraud_probability REAL NOT NULL,
    risk_level TEXT NOT NULL,
    decision TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);
"#;
