//! The offline training pipeline.
//!
//! Load the master dataset, defensively re-map labels, normalize text,
//! split with a fixed seed, fit the TF-IDF vectorizer on the training
//! partition only, fit the linear classifier, evaluate on the held-out
//! partition, and persist the artifact pair plus the report images. Run to
//! completion as a batch job; there is no incremental mode.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::dataset::read_master;
use crate::error::{Result, VeritasError};
use crate::label::Label;
use crate::ml::artifacts::ArtifactPair;
use crate::ml::linear::{Classifier, LinearClassifier, LinearClassifierConfig};
use crate::ml::metrics::{Evaluation, evaluate};
use crate::ml::split::train_test_split;
use crate::ml::tfidf::TfIdfVectorizer;
use crate::normalize::normalize;
use crate::report::write_reports;

/// Configuration for a training run.
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Master dataset produced by the merger.
    pub dataset: PathBuf,
    /// Directory receiving the artifact pair and report images.
    pub model_dir: PathBuf,
    /// Held-out fraction for evaluation.
    pub test_ratio: f64,
    /// Seed for the split shuffle.
    pub seed: u64,
    /// Classifier hyperparameters.
    pub classifier: LinearClassifierConfig,
    /// Whether to render the report SVGs.
    pub write_reports: bool,
}

impl TrainConfig {
    /// Default configuration for the given dataset and model directory.
    pub fn new(dataset: PathBuf, model_dir: PathBuf) -> Self {
        TrainConfig {
            dataset,
            model_dir,
            test_ratio: 0.2,
            seed: 42,
            classifier: LinearClassifierConfig::default(),
            write_reports: true,
        }
    }
}

/// Summary of a completed training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainReport {
    /// Rows read from the master dataset.
    pub total_rows: usize,
    /// Rows dropped for unmappable labels or missing text.
    pub dropped_rows: usize,
    /// Training partition size.
    pub train_rows: usize,
    /// Held-out partition size.
    pub test_rows: usize,
    /// Fitted vocabulary size.
    pub vocabulary_size: usize,
    /// Held-out evaluation metrics.
    pub evaluation: Evaluation,
    /// Where the artifacts were written.
    pub model_dir: String,
}

/// Run the full training pipeline.
pub fn train(config: &TrainConfig) -> Result<TrainReport> {
    let rows = read_master(&config.dataset)?;
    let total_rows = rows.len();
    info!(rows = total_rows, dataset = %config.dataset.display(), "loaded master dataset");

    // Defensive label re-mapping: idempotent on canonical 0/1 rows, and a
    // second chance to drop garbage that slipped into the master file.
    let mut records: Vec<(String, Label)> = Vec::with_capacity(rows.len());
    for row in rows {
        match Label::from_raw(&row.label) {
            Some(label) if !row.text.trim().is_empty() => {
                records.push((normalize(&row.text), label));
            }
            _ => {}
        }
    }
    let dropped_rows = total_rows - records.len();
    if dropped_rows > 0 {
        warn!(dropped = dropped_rows, "dropped unreadable rows");
    }

    if records.len() < 2 {
        return Err(VeritasError::training(format!(
            "not enough usable rows to train: {} (need at least 2)",
            records.len()
        )));
    }

    let (train_set, test_set) = train_test_split(&records, config.test_ratio, config.seed);
    if train_set.is_empty() || test_set.is_empty() {
        return Err(VeritasError::training(
            "train/test split produced an empty partition; adjust the test ratio",
        ));
    }
    info!(train = train_set.len(), test = test_set.len(), "split dataset");

    // Vocabulary statistics come from the training partition only.
    let train_texts: Vec<String> = train_set.iter().map(|(t, _)| t.clone()).collect();
    let mut vectorizer = TfIdfVectorizer::new();
    vectorizer.fit(&train_texts)?;
    info!(vocabulary = vectorizer.vocabulary_size(), "fitted vectorizer");

    let train_features: Vec<_> = train_set.iter().map(|(t, _)| vectorizer.transform(t)).collect();
    let train_labels: Vec<Label> = train_set.iter().map(|(_, l)| *l).collect();

    let mut model = LinearClassifier::new(config.classifier.clone());
    model.fit(&train_features, &train_labels, vectorizer.vocabulary_size())?;

    let test_labels: Vec<Label> = test_set.iter().map(|(_, l)| *l).collect();
    let predictions = test_set
        .iter()
        .map(|(t, _)| model.predict(&vectorizer.transform(t)))
        .collect::<Result<Vec<Label>>>()?;
    let evaluation = evaluate(&test_labels, &predictions)?;
    info!(
        accuracy = evaluation.accuracy,
        f1 = evaluation.f1,
        "evaluated on held-out partition"
    );

    let vocabulary_size = vectorizer.vocabulary_size();
    let pair = ArtifactPair::new(vectorizer, model)?;
    pair.save(&config.model_dir)?;

    if config.write_reports {
        write_reports(&config.model_dir, &evaluation)?;
    }

    Ok(TrainReport {
        total_rows,
        dropped_rows,
        train_rows: train_set.len(),
        test_rows: test_set.len(),
        vocabulary_size,
        evaluation,
        model_dir: config.model_dir.display().to_string(),
    })
}
