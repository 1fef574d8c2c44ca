//! Training report visualizations.
//!
//! Two SVG files rendered after evaluation: a confusion matrix and a metric
//! bar chart. These are reporting artifacts only; the serving layer embeds
//! them when present and degrades to a "graph unavailable" message when they
//! are not, so nothing here is required for correctness.

use std::path::Path;

use crate::error::Result;
use crate::ml::metrics::{ConfusionMatrix, Evaluation};

/// File name of the confusion matrix image.
pub const CONFUSION_MATRIX_FILE: &str = "confusion_matrix.svg";
/// File name of the metric bar chart image.
pub const METRICS_CHART_FILE: &str = "metrics_chart.svg";

/// Write both report images under `dir`.
pub fn write_reports(dir: &Path, evaluation: &Evaluation) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    std::fs::write(
        dir.join(CONFUSION_MATRIX_FILE),
        confusion_matrix_svg(&evaluation.confusion),
    )?;
    std::fs::write(dir.join(METRICS_CHART_FILE), metrics_chart_svg(evaluation))?;
    Ok(())
}

fn confusion_matrix_svg(confusion: &ConfusionMatrix) -> String {
    let cells = [
        (confusion.fake_as_fake, 90, 70),
        (confusion.fake_as_real, 230, 70),
        (confusion.real_as_fake, 90, 190),
        (confusion.real_as_real, 230, 190),
    ];
    let max = cells.iter().map(|(v, _, _)| *v).max().unwrap_or(0).max(1);

    let mut body = String::new();
    for (value, x, y) in cells {
        // Darker fill for heavier cells.
        let intensity = 235 - (150 * value / max) as i32;
        body.push_str(&format!(
            r##"<rect x="{x}" y="{y}" width="120" height="100" fill="rgb({intensity},{intensity},245)" stroke="#333"/>
<text x="{tx}" y="{ty}" text-anchor="middle" font-size="20" fill="#111">{value}</text>
"##,
            tx = x + 60,
            ty = y + 56,
        ));
    }

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="340" font-family="sans-serif">
<text x="200" y="30" text-anchor="middle" font-size="16">Confusion Matrix</text>
<text x="150" y="58" text-anchor="middle" font-size="12">Fake</text>
<text x="290" y="58" text-anchor="middle" font-size="12">Real</text>
<text x="220" y="320" text-anchor="middle" font-size="12">Predicted</text>
<text x="60" y="124" text-anchor="end" font-size="12">Fake</text>
<text x="60" y="244" text-anchor="end" font-size="12">Real</text>
<text x="20" y="180" text-anchor="middle" font-size="12" transform="rotate(-90 20 180)">Actual</text>
{body}</svg>
"##
    )
}

fn metrics_chart_svg(evaluation: &Evaluation) -> String {
    let metrics = [
        ("Accuracy", evaluation.accuracy, "#4caf50"),
        ("Precision", evaluation.precision, "#2196f3"),
        ("Recall", evaluation.recall, "#ff9800"),
        ("F1", evaluation.f1, "#f44336"),
    ];

    let mut body = String::new();
    for (i, (name, value, color)) in metrics.iter().enumerate() {
        let x = 50 + i * 100;
        let height = (value * 220.0).round() as usize;
        let y = 270 - height;
        body.push_str(&format!(
            r##"<rect x="{x}" y="{y}" width="70" height="{height}" fill="{color}" stroke="#333"/>
<text x="{cx}" y="{vy}" text-anchor="middle" font-size="13" font-weight="bold">{pct:.1}%</text>
<text x="{cx}" y="292" text-anchor="middle" font-size="12">{name}</text>
"##,
            cx = x + 35,
            vy = y.saturating_sub(6).max(14),
            pct = value * 100.0,
        ));
    }

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="460" height="310" font-family="sans-serif">
<text x="230" y="24" text-anchor="middle" font-size="16">Model Performance Metrics</text>
<line x1="40" y1="270" x2="440" y2="270" stroke="#999"/>
{body}</svg>
"##
    )
}
