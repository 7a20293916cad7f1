//! Transaction history handler

use axum::{extract::State, Json};
use serde::Serialize;
use sqlx::Connection;

use crate::{AppResult, AppState};
use crate::models::Transaction;

#[derive(Debug, Serialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
}

/// List every scored transaction, newest first. Store errors are not
/// swallowed here; they surface as a 500.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<TransactionList>> {
    let mut conn = state.db.connect().await?;
    let transactions = Transaction::list_all(&mut conn).await?;
    conn.close().await?;

    Ok(Json(TransactionList { transactions }))
}
