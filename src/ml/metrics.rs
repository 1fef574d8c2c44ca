//! Evaluation metrics for binary classification.
//!
//! Precision, recall, and F1 are averaged over the two classes weighted by
//! class support, matching the reporting convention of the training
//! pipeline this replaces. All metric values lie in `[0, 1]`; empty
//! denominators contribute zero rather than NaN.

use serde::Serialize;

use crate::error::{Result, VeritasError};
use crate::label::Label;

/// 2x2 confusion matrix, indexed `[actual][predicted]` with fake first.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ConfusionMatrix {
    /// Actual fake, predicted fake.
    pub fake_as_fake: usize,
    /// Actual fake, predicted real.
    pub fake_as_real: usize,
    /// Actual real, predicted fake.
    pub real_as_fake: usize,
    /// Actual real, predicted real.
    pub real_as_real: usize,
}

impl ConfusionMatrix {
    /// Total number of evaluated samples.
    pub fn total(&self) -> usize {
        self.fake_as_fake + self.fake_as_real + self.real_as_fake + self.real_as_real
    }
}

/// Held-out evaluation results.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Fraction of correct predictions.
    pub accuracy: f64,
    /// Support-weighted precision.
    pub precision: f64,
    /// Support-weighted recall.
    pub recall: f64,
    /// Support-weighted F1 score.
    pub f1: f64,
    /// Raw confusion counts.
    pub confusion: ConfusionMatrix,
}

/// Compare predictions against ground truth.
pub fn evaluate(actual: &[Label], predicted: &[Label]) -> Result<Evaluation> {
    if actual.len() != predicted.len() {
        return Err(VeritasError::training(format!(
            "evaluation length mismatch: {} vs {}",
            actual.len(),
            predicted.len()
        )));
    }
    if actual.is_empty() {
        return Err(VeritasError::training("cannot evaluate zero samples"));
    }

    let mut confusion = ConfusionMatrix {
        fake_as_fake: 0,
        fake_as_real: 0,
        real_as_fake: 0,
        real_as_real: 0,
    };
    for (a, p) in actual.iter().zip(predicted) {
        match (a, p) {
            (Label::Fake, Label::Fake) => confusion.fake_as_fake += 1,
            (Label::Fake, Label::Real) => confusion.fake_as_real += 1,
            (Label::Real, Label::Fake) => confusion.real_as_fake += 1,
            (Label::Real, Label::Real) => confusion.real_as_real += 1,
        }
    }

    let n = actual.len() as f64;
    let accuracy = (confusion.fake_as_fake + confusion.real_as_real) as f64 / n;

    // Per-class scores, weighted by support.
    let fake_support = (confusion.fake_as_fake + confusion.fake_as_real) as f64;
    let real_support = (confusion.real_as_fake + confusion.real_as_real) as f64;

    let fake_precision = ratio(
        confusion.fake_as_fake as f64,
        (confusion.fake_as_fake + confusion.real_as_fake) as f64,
    );
    let fake_recall = ratio(confusion.fake_as_fake as f64, fake_support);
    let real_precision = ratio(
        confusion.real_as_real as f64,
        (confusion.real_as_real + confusion.fake_as_real) as f64,
    );
    let real_recall = ratio(confusion.real_as_real as f64, real_support);

    let precision = (fake_precision * fake_support + real_precision * real_support) / n;
    let recall = (fake_recall * fake_support + real_recall * real_support) / n;
    let f1 = (f1_score(fake_precision, fake_recall) * fake_support
        + f1_score(real_precision, real_recall) * real_support)
        / n;

    Ok(Evaluation {
        accuracy,
        precision,
        recall,
        f1,
        confusion,
    })
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_predictions() {
        let actual = vec![Label::Fake, Label::Real, Label::Fake, Label::Real];
        let eval = evaluate(&actual, &actual).unwrap();

        assert_eq!(eval.accuracy, 1.0);
        assert_eq!(eval.precision, 1.0);
        assert_eq!(eval.recall, 1.0);
        assert_eq!(eval.f1, 1.0);
        assert_eq!(eval.confusion.total(), 4);
    }

    #[test]
    fn test_all_wrong() {
        let actual = vec![Label::Fake, Label::Real];
        let predicted = vec![Label::Real, Label::Fake];
        let eval = evaluate(&actual, &predicted).unwrap();

        assert_eq!(eval.accuracy, 0.0);
        assert_eq!(eval.f1, 0.0);
    }

    #[test]
    fn test_metrics_stay_in_unit_interval() {
        let actual = vec![
            Label::Fake,
            Label::Fake,
            Label::Fake,
            Label::Real,
            Label::Real,
        ];
        let predicted = vec![
            Label::Fake,
            Label::Real,
            Label::Fake,
            Label::Real,
            Label::Fake,
        ];
        let eval = evaluate(&actual, &predicted).unwrap();

        for value in [eval.accuracy, eval.precision, eval.recall, eval.f1] {
            assert!((0.0..=1.0).contains(&value), "metric out of range: {value}");
        }
    }

    #[test]
    fn test_single_class_ground_truth() {
        // Degenerate but must not produce NaN.
        let actual = vec![Label::Real, Label::Real];
        let predicted = vec![Label::Real, Label::Fake];
        let eval = evaluate(&actual, &predicted).unwrap();

        assert_eq!(eval.accuracy, 0.5);
        assert!(eval.precision.is_finite());
        assert!(eval.f1.is_finite());
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let result = evaluate(&[Label::Fake], &[]);
        assert!(result.is_err());
    }
}
