//! Scoring Engine - scaler then classifier

use crate::error::AppError;
use crate::features::{FeatureVector, FEATURE_LAYOUT};
use crate::model::Artifacts;

/// Turns a feature row into a fraud probability
#[derive(Clone)]
pub struct ScoringEngine {
    artifacts: Artifacts,
}

impl ScoringEngine {
    pub fn new(artifacts: Artifacts) -> Self {
        Self { artifacts }
    }

    pub fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Probability mass of the fraud class (index 1)
    pub fn score(&self, features: &FeatureVector) -> Result<f64, AppError> {
        if let Some(names) = self.artifacts.scaler.feature_names() {
            check_columns("scaler", names)?;
        }
        if let Some(names) = self.artifacts.classifier.feature_names() {
            check_columns("classifier", names)?;
        }

        let scaled = self.artifacts.scaler.transform(features.as_slice())?;
        let proba = self.artifacts.classifier.predict_proba(&scaled)?;

        Ok(proba[1])
    }
}

fn check_columns(artifact: &str, fitted: &[String]) -> Result<(), AppError> {
    if fitted.len() != FEATURE_LAYOUT.len() {
        return Err(AppError::SchemaMismatch(format!(
            "{} was fitted on {} columns, got {}",
            artifact,
            fitted.len(),
            FEATURE_LAYOUT.len()
        )));
    }

    match fitted.iter().zip(FEATURE_LAYOUT).position(|(a, b)| a != b) {
        Some(i) => Err(AppError::SchemaMismatch(format!(
            "{} column {} is '{}', got '{}'",
            artifact, i, fitted[i], FEATURE_LAYOUT[i]
        ))),
        None => Ok(()),
    }
}
