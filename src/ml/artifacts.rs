//! Paired persistence of the vectorizer and classifier artifacts.
//!
//! The two blobs are only meaningful together: a model's weight vector is
//! defined over the exact vocabulary of the vectorizer it was trained
//! with. `load` therefore refuses pairs whose dimensions disagree, and a
//! missing or corrupt file is reported as a load-time artifact error so
//! callers can block inference up front instead of failing per request.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Result, VeritasError};
use crate::ml::linear::LinearClassifier;
use crate::ml::tfidf::TfIdfVectorizer;

/// File name of the serialized vectorizer.
pub const VECTORIZER_FILE: &str = "vectorizer.bin";
/// File name of the serialized classifier.
pub const MODEL_FILE: &str = "model.bin";

/// A fitted vectorizer and the classifier trained against it.
#[derive(Debug, Clone)]
pub struct ArtifactPair {
    /// Fitted TF-IDF vectorizer.
    pub vectorizer: TfIdfVectorizer,
    /// Fitted linear classifier.
    pub model: LinearClassifier,
}

impl ArtifactPair {
    /// Bundle a fitted pair, validating that they belong together.
    pub fn new(vectorizer: TfIdfVectorizer, model: LinearClassifier) -> Result<Self> {
        check_pair(&vectorizer, &model)?;
        Ok(ArtifactPair { vectorizer, model })
    }

    /// Persist both artifacts under `dir`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;

        write_blob(&dir.join(VECTORIZER_FILE), &self.vectorizer)?;
        write_blob(&dir.join(MODEL_FILE), &self.model)?;
        info!(dir = %dir.display(), "artifact pair saved");
        Ok(())
    }

    /// Load both artifacts from `dir`, verifying they form a valid pair.
    pub fn load(dir: &Path) -> Result<Self> {
        let vectorizer: TfIdfVectorizer = read_blob(&dir.join(VECTORIZER_FILE))?;
        let model: LinearClassifier = read_blob(&dir.join(MODEL_FILE))?;
        check_pair(&vectorizer, &model)?;
        Ok(ArtifactPair { vectorizer, model })
    }
}

fn check_pair(vectorizer: &TfIdfVectorizer, model: &LinearClassifier) -> Result<()> {
    if !vectorizer.is_fitted() {
        return Err(VeritasError::artifact("vectorizer is not fitted"));
    }
    if !model.is_trained() {
        return Err(VeritasError::artifact("model is not trained"));
    }
    if vectorizer.vocabulary_size() != model.dimension() {
        return Err(VeritasError::artifact(format!(
            "vectorizer/model dimension mismatch: vocabulary {} vs weights {} (the pair must be \
             trained together)",
            vectorizer.vocabulary_size(),
            model.dimension()
        )));
    }
    Ok(())
}

fn write_blob<T: serde::Serialize>(path: &PathBuf, value: &T) -> Result<()> {
    let bytes = bincode::serialize(value)
        .map_err(|e| VeritasError::artifact(format!("failed to serialize '{}': {e}", path.display())))?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn read_blob<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<T> {
    if !path.exists() {
        return Err(VeritasError::artifact(format!(
            "artifact not found at '{}'; run `veritas train` first",
            path.display()
        )));
    }
    let bytes = std::fs::read(path)?;
    bincode::deserialize(&bytes)
        .map_err(|e| VeritasError::artifact(format!("corrupt artifact '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use crate::ml::linear::{LinearClassifier, LinearClassifierConfig};
    use tempfile::tempdir;

    fn fitted_pair() -> ArtifactPair {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&[
                "aliens landed in the capital".to_string(),
                "parliament passed the budget".to_string(),
            ])
            .unwrap();

        let samples = vec![
            vectorizer.transform("aliens landed in the capital"),
            vectorizer.transform("parliament passed the budget"),
        ];
        let labels = vec![Label::Fake, Label::Real];

        let mut model = LinearClassifier::new(LinearClassifierConfig::default());
        model
            .fit(&samples, &labels, vectorizer.vocabulary_size())
            .unwrap();

        ArtifactPair::new(vectorizer, model).unwrap()
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let pair = fitted_pair();
        pair.save(dir.path()).unwrap();

        let loaded = ArtifactPair::load(dir.path()).unwrap();
        assert_eq!(
            loaded.vectorizer.vocabulary_size(),
            pair.vectorizer.vocabulary_size()
        );
        assert_eq!(loaded.model.dimension(), pair.model.dimension());

        use crate::ml::linear::Classifier;
        let features = loaded.vectorizer.transform("aliens landed");
        assert_eq!(loaded.model.predict(&features).unwrap(), Label::Fake);
    }

    #[test]
    fn test_missing_artifacts_are_actionable() {
        let dir = tempdir().unwrap();
        let err = ArtifactPair::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("veritas train"), "got: {err}");
    }

    #[test]
    fn test_corrupt_artifact_is_rejected() {
        let dir = tempdir().unwrap();
        let pair = fitted_pair();
        pair.save(dir.path()).unwrap();
        std::fs::write(dir.path().join(MODEL_FILE), b"garbage").unwrap();

        let err = ArtifactPair::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("corrupt"), "got: {err}");
    }

    #[test]
    fn test_mismatched_pair_is_rejected() {
        let dir = tempdir().unwrap();
        let pair = fitted_pair();
        pair.save(dir.path()).unwrap();

        // Overwrite the vectorizer with one fitted on a different corpus.
        let mut other = TfIdfVectorizer::new();
        other
            .fit(&["a completely different and much longer vocabulary set".to_string()])
            .unwrap();
        let bytes = bincode::serialize(&other).unwrap();
        std::fs::write(dir.path().join(VECTORIZER_FILE), bytes).unwrap();

        let err = ArtifactPair::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"), "got: {err}");
    }

    #[test]
    fn test_unfitted_pair_is_rejected() {
        let vectorizer = TfIdfVectorizer::new();
        let model = LinearClassifier::new(LinearClassifierConfig::default());
        assert!(ArtifactPair::new(vectorizer, model).is_err());
    }
}
