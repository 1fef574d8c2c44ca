//! The inference engine shared by the web form and the console predictor.
//!
//! Construction loads the artifact pair exactly once; the engine is then
//! read-only and safe to share behind an `Arc` for the process lifetime.
//! Classification order: empty-input rejection, knowledge-base override,
//! then the model: by decision margin when the classifier exposes one,
//! by plain class prediction otherwise.

pub mod knowledge;

use std::path::Path;

use serde::Serialize;

use crate::error::{Result, VeritasError};
use crate::infer::knowledge::KnowledgeBase;
use crate::label::Label;
use crate::ml::artifacts::ArtifactPair;
use crate::ml::linear::Classifier;
use crate::ml::tfidf::SparseVector;
use crate::normalize::normalize;

/// Where a verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    /// A knowledge-base rule fired before the model ran.
    KnowledgeBase,
    /// Sign of the model's decision margin.
    DecisionMargin,
    /// Plain class prediction (no margin available).
    ClassPrediction,
}

/// Result of analyzing one input.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    /// Predicted class.
    pub label: Label,
    /// Confidence proxy (margin magnitude), when available.
    pub confidence: Option<f64>,
    /// Human-readable explanation line.
    pub explanation: String,
    /// Which path produced the verdict.
    pub source: VerdictSource,
}

/// Loaded model pair plus the override rule table.
#[derive(Debug)]
pub struct InferenceEngine {
    artifacts: ArtifactPair,
    knowledge: KnowledgeBase,
}

impl InferenceEngine {
    /// Load the artifact pair from `model_dir` with the built-in knowledge
    /// base. Fails up front when either artifact is missing, corrupt, or
    /// mismatched, so callers can block inference instead of crashing on
    /// the first request.
    pub fn load(model_dir: &Path) -> Result<Self> {
        Ok(InferenceEngine {
            artifacts: ArtifactPair::load(model_dir)?,
            knowledge: KnowledgeBase::builtin(),
        })
    }

    /// Build an engine from already-loaded parts.
    pub fn new(artifacts: ArtifactPair, knowledge: KnowledgeBase) -> Self {
        InferenceEngine {
            artifacts,
            knowledge,
        }
    }

    /// Replace the knowledge base.
    pub fn with_knowledge(mut self, knowledge: KnowledgeBase) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Analyze a user-supplied text.
    ///
    /// Blank input is rejected with a non-fatal error; the UI layers render
    /// it as a warning and skip inference.
    pub fn analyze(&self, input: &str) -> Result<Verdict> {
        if input.trim().is_empty() {
            return Err(VeritasError::invalid_argument(
                "enter some text to analyze",
            ));
        }

        // Manual overrides take precedence over the model.
        if let Some(rule) = self.knowledge.lookup(input) {
            return Ok(Verdict {
                label: rule.label,
                confidence: None,
                explanation: rule.explanation.clone(),
                source: VerdictSource::KnowledgeBase,
            });
        }

        let cleaned = normalize(input);
        let features = self.artifacts.vectorizer.transform(&cleaned);
        classify(&self.artifacts.model, &features)
    }
}

/// Classify vectorized features, preferring the decision margin.
fn classify(model: &dyn Classifier, features: &SparseVector) -> Result<Verdict> {
    match model.decision_score(features) {
        Some(score) => {
            let label = if score > 0.0 { Label::Real } else { Label::Fake };
            Ok(Verdict {
                label,
                confidence: Some(score.abs()),
                explanation: format!("Model confidence: {:.2}", score.abs()),
                source: VerdictSource::DecisionMargin,
            })
        }
        None => {
            let label = model.predict(features)?;
            Ok(Verdict {
                label,
                confidence: None,
                explanation: "Model prediction".to_string(),
                source: VerdictSource::ClassPrediction,
            })
        }
    }
}
