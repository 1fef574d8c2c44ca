//! TF-IDF vectorizer for text feature extraction.
//!
//! Fitted on the training partition only; the inverse document frequencies
//! therefore never see held-out or serving-time text. Documents are expected
//! to be pre-normalized (see [`crate::normalize`]); the vectorizer's own
//! tokenization is runs of two or more word characters.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VeritasError};

/// Sparse feature vector: `(vocabulary index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w\w+").expect("token pattern should be valid"));

/// TF-IDF vectorizer with a fixed vocabulary and smoothed IDF table.
#[derive(Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Vocabulary: token -> index mapping.
    vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per vocabulary index.
    idf: Vec<f64>,
    /// Number of documents seen during fitting.
    n_documents: usize,
}

impl std::fmt::Debug for TfIdfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfIdfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("n_documents", &self.n_documents)
            .finish()
    }
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfIdfVectorizer {
    /// Create a new, unfitted vectorizer.
    pub fn new() -> Self {
        TfIdfVectorizer {
            vocabulary: HashMap::new(),
            idf: Vec::new(),
            n_documents: 0,
        }
    }

    /// Fit the vocabulary and IDF table on training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(VeritasError::training(
                "cannot fit vectorizer on zero documents",
            ));
        }

        self.n_documents = documents.len();
        let mut vocabulary = HashMap::new();
        let mut document_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique_tokens: HashSet<String> = tokenize(doc).into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                if !vocabulary.contains_key(&token) {
                    let idx = vocabulary.len();
                    vocabulary.insert(token, idx);
                }
            }
        }

        // Smoothed IDF: ln((1 + N) / (1 + df)) + 1
        let mut idf = vec![0.0; vocabulary.len()];
        for (token, &idx) in &vocabulary {
            let df = document_frequency.get(token).copied().unwrap_or(0);
            idf[idx] = ((1.0 + self.n_documents as f64) / (1.0 + df as f64)).ln() + 1.0;
        }

        self.vocabulary = vocabulary;
        self.idf = idf;

        Ok(())
    }

    /// Transform a document into an L2-normalized sparse TF-IDF vector.
    ///
    /// Out-of-vocabulary tokens are ignored; a document with no known
    /// tokens transforms to an empty (all-zero) vector.
    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();
        features.sort_by_key(|&(idx, _)| idx);

        let norm: f64 = features.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut features {
                *v /= norm;
            }
        }

        features
    }

    /// Size of the fitted vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Whether `fit` has been called.
    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }
}

/// Tokenize into runs of two or more word characters.
fn tokenize(text: &str) -> Vec<String> {
    TOKEN.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_fit_builds_vocabulary() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&docs(&["parliament passes budget", "budget debate continues"]))
            .unwrap();

        assert!(vectorizer.is_fitted());
        assert_eq!(vectorizer.vocabulary_size(), 5);
    }

    #[test]
    fn test_fit_on_empty_corpus_fails() {
        let mut vectorizer = TfIdfVectorizer::new();
        assert!(vectorizer.fit(&[]).is_err());
    }

    #[test]
    fn test_transform_is_l2_normalized() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&docs(&["aliens landed today", "markets rallied today"]))
            .unwrap();

        let features = vectorizer.transform("aliens rallied");
        let norm: f64 = features.iter().map(|(_, v)| v * v).sum::<f64>();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_tokens_vectorize_to_zero() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&docs(&["known words only"])).unwrap();

        assert!(vectorizer.transform("completely different tokens").is_empty());
        assert!(vectorizer.transform("").is_empty());
    }

    #[test]
    fn test_single_char_tokens_are_ignored() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer.fit(&docs(&["a big b deal"])).unwrap();
        assert_eq!(vectorizer.vocabulary_size(), 2);
    }

    #[test]
    fn test_rare_terms_weigh_more_than_common_ones() {
        let mut vectorizer = TfIdfVectorizer::new();
        vectorizer
            .fit(&docs(&["shared rare", "shared other", "shared another"]))
            .unwrap();

        // "shared" appears in every document, "rare" in one; within a mixed
        // vector the rare term must carry the larger weight.
        let shared_idx = vectorizer.transform("shared")[0].0;
        let features = vectorizer.transform("shared rare");
        assert_eq!(features.len(), 2);

        let mut shared_weight = 0.0;
        let mut rare_weight = 0.0;
        for (idx, value) in features {
            if idx == shared_idx {
                shared_weight = value;
            } else {
                rare_weight = value;
            }
        }
        assert!(rare_weight > shared_weight);
    }
}
