//! Model Module - pre-trained artifacts and inference
//!
//! The classifier and scaler are produced by an external training job and
//! loaded once at startup. The rest of the service only sees the
//! [`Classifier`] and [`FeatureScaler`] traits.

pub mod artifacts;
pub mod classifier;
pub mod scaler;

pub use artifacts::{Artifacts, ArtifactMetadata};
pub use classifier::{Classifier, ClassifierArtifact, LogisticRegression};
pub use scaler::{FeatureScaler, MinMaxScaler, ScalerArtifact, StandardScaler};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("cannot read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Artifact is internally inconsistent (load time)
    #[error("invalid artifact: {0}")]
    Invalid(String),

    /// Input row does not fit the artifact (request time)
    #[error("{0}")]
    Shape(String),
}

/// Reject a row whose width differs from what the artifact was trained on.
pub(crate) fn check_width(expected: usize, row: &[f64]) -> Result<(), ArtifactError> {
    if row.len() != expected {
        return Err(ArtifactError::Shape(format!(
            "X has {} features, but the artifact is expecting {} features as input",
            row.len(),
            expected
        )));
    }
    Ok(())
}
