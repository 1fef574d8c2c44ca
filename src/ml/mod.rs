//! Machine learning pieces of the classification pipeline.
//!
//! The pipeline is deliberately small: TF-IDF features over normalized text
//! ([`tfidf`]), a linear margin classifier trained by SGD ([`linear`]), a
//! seeded train/test split ([`split`]), evaluation metrics ([`metrics`]),
//! and the paired on-disk artifacts that tie a model to the exact
//! vectorizer it was trained against ([`artifacts`]).

pub mod artifacts;
pub mod linear;
pub mod metrics;
pub mod split;
pub mod tfidf;

pub use artifacts::ArtifactPair;
pub use linear::{Classifier, LinearClassifier, LinearClassifierConfig};
pub use metrics::Evaluation;
pub use tfidf::{SparseVector, TfIdfVectorizer};
