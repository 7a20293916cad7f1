//! Feature scalers
//!
//! Scaling parameters exported from training, stored as JSON with a `kind`
//! tag. Both kinds operate column-wise on a single row.

use serde::{Deserialize, Serialize};

use super::{check_width, ArtifactError};

/// Column-wise transform applied before the classifier
pub trait FeatureScaler: Send + Sync {
    /// Column names seen at fit time, if the artifact recorded them
    fn feature_names(&self) -> Option<&[String]>;

    fn n_features(&self) -> usize;

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ArtifactError>;
}

/// Standardization: `(x - mean) / scale`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Normalization into the fitted range: `(x - min) / (max - min)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

/// On-disk scaler document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl ScalerArtifact {
    /// Check that all parameter vectors agree in length.
    pub fn validate(&self) -> Result<(), ArtifactError> {
        let (names, a, b, label) = match self {
            ScalerArtifact::Standard(s) => (&s.feature_names, s.mean.len(), s.scale.len(), "mean/scale"),
            ScalerArtifact::MinMax(s) => (&s.feature_names, s.min.len(), s.max.len(), "min/max"),
        };

        if a == 0 {
            return Err(ArtifactError::Invalid("scaler has no features".to_string()));
        }
        if a != b {
            return Err(ArtifactError::Invalid(format!(
                "scaler {} lengths differ ({} vs {})",
                label, a, b
            )));
        }
        if let Some(names) = names {
            if names.len() != a {
                return Err(ArtifactError::Invalid(format!(
                    "scaler lists {} feature names for {} features",
                    names.len(),
                    a
                )));
            }
        }
        Ok(())
    }
}

impl FeatureScaler for ScalerArtifact {
    fn feature_names(&self) -> Option<&[String]> {
        match self {
            ScalerArtifact::Standard(s) => s.feature_names.as_deref(),
            ScalerArtifact::MinMax(s) => s.feature_names.as_deref(),
        }
    }

    fn n_features(&self) -> usize {
        match self {
            ScalerArtifact::Standard(s) => s.mean.len(),
            ScalerArtifact::MinMax(s) => s.min.len(),
        }
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        check_width(self.n_features(), row)?;

        let scaled = match self {
            ScalerArtifact::Standard(s) => row.iter()
                .zip(s.mean.iter().zip(&s.scale))
                .map(|(x, (mean, scale))| (x - mean) / non_zero(*scale))
                .collect(),
            ScalerArtifact::MinMax(s) => row.iter()
                .zip(s.min.iter().zip(&s.max))
                .map(|(x, (min, max))| (x - min) / non_zero(max - min))
                .collect(),
        };

        Ok(scaled)
    }
}

/// Constant columns are left unscaled
fn non_zero(v: f64) -> f64 {
    if v == 0.0 { 1.0 } else { v }
}
