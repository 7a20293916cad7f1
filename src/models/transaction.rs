//! Scored transaction model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteConnection};

use crate::policy::RiskLevel;

/// A persisted scoring outcome. Rows are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    pub time: f64,
    pub fraud_probability: f64,
    pub risk_level: String,
    pub decision: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub amount: f64,
    pub time: f64,
    pub fraud_probability: f64,
    pub risk_level: RiskLevel,
    pub decision: String,
}

impl Transaction {
    /// Insert one scored transaction, returning its row id
    pub async fn create(conn: &mut SqliteConnection, data: &NewTransaction) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (amount, time, fraud_probability, risk_level, decision)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(data.amount)
        .bind(data.time)
        .bind(data.fraud_probability)
        .bind(data.risk_level.as_str())
        .bind(&data.decision)
        .execute(conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Every stored transaction, newest first
    pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions ORDER BY created_at DESC, id DESC"
        )
        .fetch_all(conn)
        .await
    }
}
