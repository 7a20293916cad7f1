//! Feature Synthesizer
//!
//! Builds the 30-column row the classifier was trained on. Only `Time` and
//! `Amount` come from the caller; `V1..V28` stand in for the upstream PCA
//! pipeline and are drawn from a standard normal on every call, so two
//! identical requests produce different rows.

use rand::distributions::Distribution;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use statrs::distribution::Normal;

use crate::error::AppError;

/// Number of columns in a feature row
pub const FEATURE_COUNT: usize = 30;

/// Number of synthetic `V*` columns
pub const SYNTHETIC_COUNT: usize = 28;

/// Column order the artifacts were fitted with. Changing it invalidates them.
pub const FEATURE_LAYOUT: [&str; FEATURE_COUNT] = [
    "Time",
    "V1", "V2", "V3", "V4", "V5", "V6", "V7", "V8", "V9", "V10",
    "V11", "V12", "V13", "V14", "V15", "V16", "V17", "V18", "V19", "V20",
    "V21", "V22", "V23", "V24", "V25", "V26", "V27", "V28",
    "Amount",
];

/// Caller-supplied part of a transaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransactionInput {
    pub time: f64,
    pub amount: f64,
}

impl TransactionInput {
    /// Extract `Time` and `Amount` from a JSON request body
    pub fn from_json(body: &Value) -> Result<Self, AppError> {
        let obj = body.as_object()
            .ok_or_else(|| AppError::InvalidInput("request body must be a JSON object".to_string()))?;

        Ok(Self {
            time: numeric_field(obj, "Time")?,
            amount: numeric_field(obj, "Amount")?,
        })
    }
}

fn numeric_field(obj: &serde_json::Map<String, Value>, key: &str) -> Result<f64, AppError> {
    let value = obj.get(key)
        .ok_or_else(|| AppError::InvalidInput(format!("missing required field '{}'", key)))?;

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(AppError::InvalidInput(format!(
            "field '{}' contains infinity or NaN: {}",
            key, value
        ))),
        None => Err(AppError::InvalidInput(format!(
            "could not convert field '{}' to float: {}",
            key, value
        ))),
    }
}

/// One row in `FEATURE_LAYOUT` order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Build a feature row using the thread-local RNG
pub fn synthesize(input: &TransactionInput) -> FeatureVector {
    synthesize_with(input, &mut rand::thread_rng())
}

/// Build a feature row from an explicit RNG
pub fn synthesize_with<R: Rng + ?Sized>(input: &TransactionInput, rng: &mut R) -> FeatureVector {
    let normal = Normal::standard();

    let mut values = [0.0f64; FEATURE_COUNT];
    values[0] = input.time;
    for slot in values.iter_mut().skip(1).take(SYNTHETIC_COUNT) {
        *slot = normal.sample(rng);
    }
    values[FEATURE_COUNT - 1] = input.amount;

    FeatureVector { values }
}
