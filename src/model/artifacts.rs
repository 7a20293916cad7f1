//! Artifact loading
//!
//! Reads the scaler and classifier documents once at startup. Any failure
//! here is fatal: the server must not come up without both artifacts.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use super::{ArtifactError, Classifier, ClassifierArtifact, FeatureScaler, ScalerArtifact};

/// Where an artifact came from and what it looked like on disk
#[derive(Debug, Clone)]
pub struct ArtifactMetadata {
    pub path: String,
    pub sha256: String,
    pub n_features: usize,
}

/// Read-only scaler + classifier pair shared by all requests
#[derive(Clone)]
pub struct Artifacts {
    pub scaler: Arc<dyn FeatureScaler>,
    pub classifier: Arc<dyn Classifier>,
    pub scaler_meta: Option<ArtifactMetadata>,
    pub classifier_meta: Option<ArtifactMetadata>,
}

impl Artifacts {
    /// Wrap already-built artifacts (no file provenance)
    pub fn new(scaler: Arc<dyn FeatureScaler>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            scaler,
            classifier,
            scaler_meta: None,
            classifier_meta: None,
        }
    }

    /// Load both artifacts from disk
    pub fn load(model_path: impl AsRef<Path>, scaler_path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let (scaler, scaler_meta) = read_document::<ScalerArtifact>(scaler_path.as_ref())?;
        scaler.validate()?;

        let (classifier, classifier_meta) = read_document::<ClassifierArtifact>(model_path.as_ref())?;
        classifier.validate()?;

        if scaler.n_features() != classifier.n_features() {
            return Err(ArtifactError::Invalid(format!(
                "scaler outputs {} features but classifier expects {}",
                scaler.n_features(),
                classifier.n_features()
            )));
        }

        let scaler_meta = ArtifactMetadata { n_features: scaler.n_features(), ..scaler_meta };
        let classifier_meta = ArtifactMetadata { n_features: classifier.n_features(), ..classifier_meta };

        tracing::info!(
            path = %scaler_meta.path,
            sha256 = %scaler_meta.sha256,
            features = scaler_meta.n_features,
            "Scaler loaded"
        );
        tracing::info!(
            path = %classifier_meta.path,
            sha256 = %classifier_meta.sha256,
            features = classifier_meta.n_features,
            "Classifier loaded"
        );

        Ok(Self {
            scaler: Arc::new(scaler),
            classifier: Arc::new(classifier),
            scaler_meta: Some(scaler_meta),
            classifier_meta: Some(classifier_meta),
        })
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<(T, ArtifactMetadata), ArtifactError> {
    let bytes = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let doc = serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let meta = ArtifactMetadata {
        path: path.display().to_string(),
        sha256: hex::encode(Sha256::digest(&bytes)),
        n_features: 0,
    };

    Ok((doc, meta))
}
