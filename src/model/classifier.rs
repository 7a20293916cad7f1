//! Binary classifiers

use serde::{Deserialize, Serialize};

use super::{check_width, ArtifactError};

/// Two-class probabilistic classifier
pub trait Classifier: Send + Sync {
    fn feature_names(&self) -> Option<&[String]>;

    fn n_features(&self) -> usize;

    /// Class probabilities `[p(legit), p(fraud)]` for one scaled row
    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ArtifactError>;
}

/// Logistic regression: `p(fraud) = sigmoid(w·x + b)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// On-disk classifier document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression(LogisticRegression),
}

impl ClassifierArtifact {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let ClassifierArtifact::LogisticRegression(lr) = self;

        if lr.coefficients.is_empty() {
            return Err(ArtifactError::Invalid("classifier has no coefficients".to_string()));
        }
        if !lr.intercept.is_finite() || lr.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::Invalid("classifier weights must be finite".to_string()));
        }
        if let Some(names) = &lr.feature_names {
            if names.len() != lr.coefficients.len() {
                return Err(ArtifactError::Invalid(format!(
                    "classifier lists {} feature names for {} coefficients",
                    names.len(),
                    lr.coefficients.len()
                )));
            }
        }
        Ok(())
    }
}

impl Classifier for ClassifierArtifact {
    fn feature_names(&self) -> Option<&[String]> {
        let ClassifierArtifact::LogisticRegression(lr) = self;
        lr.feature_names.as_deref()
    }

    fn n_features(&self) -> usize {
        let ClassifierArtifact::LogisticRegression(lr) = self;
        lr.coefficients.len()
    }

    fn predict_proba(&self, row: &[f64]) -> Result<[f64; 2], ArtifactError> {
        let ClassifierArtifact::LogisticRegression(lr) = self;
        check_width(lr.coefficients.len(), row)?;

        let logit = lr.coefficients.iter()
            .zip(row)
            .map(|(w, x)| w * x)
            .sum::<f64>() + lr.intercept;

        let fraud = sigmoid(logit);
        Ok([1.0 - fraud, fraud])
    }
}

fn sigmoid(z: f64) -> f64 {
    // Split on sign so exp() never overflows
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
