//! Prediction handler
//!
//! Every failure in the pipeline is reported as `{"error": "..."}` with
//! status 200, the same transport status as a successful score.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use sqlx::Connection;

use crate::{AppError, AppResult, AppState};
use crate::features::{synthesize, TransactionInput};
use crate::models::{NewTransaction, Transaction};
use crate::policy::{decide, RiskLevel};

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub fraud_probability: f64,
    pub risk_level: RiskLevel,
    pub decision: &'static str,
}

pub async fn predict(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    match score_transaction(&state, &headers, &body).await {
        Ok(resp) => Json(resp).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Prediction failed");
            Json(e.to_prediction_body()).into_response()
        }
    }
}

async fn score_transaction(state: &AppState, headers: &HeaderMap, body: &[u8]) -> AppResult<PredictionResponse> {
    if !is_json_content(headers) {
        return Err(AppError::InvalidInput(
            "Unsupported Media Type: request Content-Type must be 'application/json'".to_string(),
        ));
    }

    let payload: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| AppError::InvalidInput(format!("invalid JSON body: {}", e)))?;
    let input = TransactionInput::from_json(&payload)?;

    let features = synthesize(&input);
    let fraud_probability = state.engine.score(&features)?;
    let decision = decide(fraud_probability);

    let mut conn = state.db.connect().await?;
    let id = Transaction::create(&mut conn, &NewTransaction {
        amount: input.amount,
        time: input.time,
        fraud_probability,
        risk_level: decision.risk_level,
        decision: decision.decision.to_string(),
    }).await?;
    conn.close().await?;

    tracing::info!(
        id,
        amount = input.amount,
        fraud_probability,
        risk_level = %decision.risk_level,
        "Transaction scored"
    );

    Ok(PredictionResponse {
        fraud_probability: round4(fraud_probability),
        risk_level: decision.risk_level,
        decision: decision.decision,
    })
}

/// `application/json` or any `application/*+json` type, parameters ignored
fn is_json_content(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let mime = value.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json"
        || (mime.starts_with("application/") && mime.ends_with("+json"))
}

fn round4(p: f64) -> f64 {
    (p * 10_000.0).round() / 10_000.0
}
