//! Linear margin classifier trained with stochastic gradient descent.
//!
//! Hinge loss with L2 regularization, i.e. a linear SVM. The decision function
//! is `w . x + b`; a positive margin means [`Label::Real`], a negative one
//! [`Label::Fake`], and the magnitude is the confidence proxy surfaced by
//! the inference layer. Training shuffles with a seeded RNG each epoch, so
//! identical data and configuration reproduce identical weights.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeritasError};
use crate::label::Label;
use crate::ml::tfidf::SparseVector;

/// Trait for classifiers over sparse feature vectors.
///
/// `decision_score` is optional: classifiers without a usable margin keep
/// the default `None` and callers fall back to plain class prediction.
pub trait Classifier: Send + Sync {
    /// Predict the class for a feature vector.
    fn predict(&self, features: &SparseVector) -> Result<Label>;

    /// Signed decision margin, when the classifier exposes one.
    fn decision_score(&self, _features: &SparseVector) -> Option<f64> {
        None
    }
}

/// Per-class weights applied to the hinge-loss gradient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassWeights {
    /// Weight for fake-class samples.
    pub fake: f64,
    /// Weight for real-class samples.
    pub real: f64,
}

impl Default for ClassWeights {
    fn default() -> Self {
        ClassWeights { fake: 1.0, real: 1.0 }
    }
}

impl ClassWeights {
    fn for_label(&self, label: Label) -> f64 {
        match label {
            Label::Fake => self.fake,
            Label::Real => self.real,
        }
    }
}

/// Hyperparameters for [`LinearClassifier`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifierConfig {
    /// Number of passes over the training set.
    pub epochs: usize,
    /// Initial learning rate; decays as `eta0 / (1 + eta0 * lambda * t)`.
    pub learning_rate: f64,
    /// L2 regularization strength.
    pub lambda: f64,
    /// Per-class gradient weights.
    pub class_weights: ClassWeights,
    /// Seed for the per-epoch shuffle.
    pub seed: u64,
}

impl Default for LinearClassifierConfig {
    fn default() -> Self {
        LinearClassifierConfig {
            epochs: 50,
            learning_rate: 1.0,
            lambda: 1e-4,
            class_weights: ClassWeights::default(),
            seed: 42,
        }
    }
}

/// A linear decision boundary over a fixed-dimension sparse feature space.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    weights: Vec<f64>,
    bias: f64,
    config: LinearClassifierConfig,
    /// When the model was trained, for artifact bookkeeping.
    trained_at: Option<DateTime<Utc>>,
    /// Number of training examples the weights were fitted on.
    training_examples: usize,
}

impl LinearClassifier {
    /// Create an untrained classifier.
    pub fn new(config: LinearClassifierConfig) -> Self {
        LinearClassifier {
            weights: Vec::new(),
            bias: 0.0,
            config,
            trained_at: None,
            training_examples: 0,
        }
    }

    /// Fit the decision boundary on vectorized training samples.
    ///
    /// `dimension` is the vectorizer's vocabulary size; every feature index
    /// must be below it.
    pub fn fit(
        &mut self,
        samples: &[SparseVector],
        labels: &[Label],
        dimension: usize,
    ) -> Result<()> {
        if samples.len() != labels.len() {
            return Err(VeritasError::training(format!(
                "sample/label length mismatch: {} vs {}",
                samples.len(),
                labels.len()
            )));
        }
        if samples.is_empty() {
            return Err(VeritasError::training("cannot fit on zero samples"));
        }

        let mut weights = vec![0.0; dimension];
        let mut bias = 0.0;
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut indices: Vec<usize> = (0..samples.len()).collect();

        let eta0 = self.config.learning_rate;
        let lambda = self.config.lambda;
        let mut t = 0usize;

        for _ in 0..self.config.epochs {
            indices.shuffle(&mut rng);

            for &i in &indices {
                t += 1;
                let eta = eta0 / (1.0 + eta0 * lambda * t as f64);

                let x = &samples[i];
                let y = labels[i].as_signed();
                let cw = self.config.class_weights.for_label(labels[i]);
                let score = dot(&weights, x) + bias;

                let shrink = 1.0 - eta * lambda;
                for w in &mut weights {
                    *w *= shrink;
                }

                if y * score < 1.0 {
                    for &(idx, v) in x {
                        weights[idx] += eta * cw * y * v;
                    }
                    bias += eta * cw * y;
                }
            }
        }

        self.weights = weights;
        self.bias = bias;
        self.trained_at = Some(Utc::now());
        self.training_examples = samples.len();

        Ok(())
    }

    /// Whether the model has been trained.
    pub fn is_trained(&self) -> bool {
        !self.weights.is_empty()
    }

    /// Dimension of the feature space the model was trained on.
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    /// When the model was trained, if it has been.
    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.trained_at
    }

    /// Number of examples used to fit the current weights.
    pub fn training_examples(&self) -> usize {
        self.training_examples
    }

    fn raw_score(&self, features: &SparseVector) -> f64 {
        dot(&self.weights, features) + self.bias
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &SparseVector) -> Result<Label> {
        if !self.is_trained() {
            return Err(VeritasError::inference("model is not trained"));
        }
        let label = if self.raw_score(features) > 0.0 {
            Label::Real
        } else {
            Label::Fake
        };
        Ok(label)
    }

    fn decision_score(&self, features: &SparseVector) -> Option<f64> {
        if self.is_trained() {
            Some(self.raw_score(features))
        } else {
            None
        }
    }
}

fn dot(weights: &[f64], features: &SparseVector) -> f64 {
    features
        .iter()
        .filter(|(idx, _)| *idx < weights.len())
        .map(|&(idx, v)| weights[idx] * v)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two well-separated clusters on a 4-dimensional space.
    fn separable_data() -> (Vec<SparseVector>, Vec<Label>) {
        let samples = vec![
            vec![(0, 1.0)],
            vec![(0, 0.9), (1, 0.3)],
            vec![(1, 1.0)],
            vec![(2, 1.0)],
            vec![(2, 0.8), (3, 0.4)],
            vec![(3, 1.0)],
        ];
        let labels = vec![
            Label::Fake,
            Label::Fake,
            Label::Fake,
            Label::Real,
            Label::Real,
            Label::Real,
        ];
        (samples, labels)
    }

    #[test]
    fn test_untrained_model() {
        let model = LinearClassifier::new(LinearClassifierConfig::default());
        assert!(!model.is_trained());
        assert!(model.decision_score(&vec![(0, 1.0)]).is_none());
        assert!(model.predict(&vec![(0, 1.0)]).is_err());
    }

    #[test]
    fn test_fits_separable_data() {
        let (samples, labels) = separable_data();
        let mut model = LinearClassifier::new(LinearClassifierConfig::default());
        model.fit(&samples, &labels, 4).unwrap();

        assert!(model.is_trained());
        assert_eq!(model.dimension(), 4);
        assert_eq!(model.training_examples(), 6);
        for (sample, label) in samples.iter().zip(&labels) {
            assert_eq!(model.predict(sample).unwrap(), *label);
        }
    }

    #[test]
    fn test_margin_sign_matches_prediction() {
        let (samples, labels) = separable_data();
        let mut model = LinearClassifier::new(LinearClassifierConfig::default());
        model.fit(&samples, &labels, 4).unwrap();

        for sample in &samples {
            let score = model.decision_score(sample).unwrap();
            let label = model.predict(sample).unwrap();
            match label {
                Label::Real => assert!(score > 0.0),
                Label::Fake => assert!(score <= 0.0),
            }
        }
    }

    #[test]
    fn test_training_is_reproducible() {
        let (samples, labels) = separable_data();

        let mut a = LinearClassifier::new(LinearClassifierConfig::default());
        a.fit(&samples, &labels, 4).unwrap();
        let mut b = LinearClassifier::new(LinearClassifierConfig::default());
        b.fit(&samples, &labels, 4).unwrap();

        for sample in &samples {
            assert_eq!(
                a.decision_score(sample).unwrap(),
                b.decision_score(sample).unwrap()
            );
        }
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let mut model = LinearClassifier::new(LinearClassifierConfig::default());
        let result = model.fit(&[vec![(0, 1.0)]], &[], 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_decision_score_is_none() {
        struct Stub;
        impl Classifier for Stub {
            fn predict(&self, _features: &SparseVector) -> Result<Label> {
                Ok(Label::Fake)
            }
        }

        let stub = Stub;
        assert!(stub.decision_score(&vec![(0, 1.0)]).is_none());
        assert_eq!(stub.predict(&vec![(0, 1.0)]).unwrap(), Label::Fake);
    }
}
