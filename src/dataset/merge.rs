//! Merging heterogeneous source CSVs into the master dataset.
//!
//! Every configured source that exists on disk is loaded, its columns
//! matched against the spec's aliases, its labels derived per policy, and
//! the surviving rows projected to `(text, label)` records. Sources that
//! are missing, unreadable, or lack a usable text column are skipped with a
//! diagnostic; the merge only fails outright when nothing at all was
//! loaded, in which case no output file is written.

use tracing::{info, warn};

use crate::dataset::source::{LabelPolicy, MergeConfig, SourceSpec};
use crate::dataset::{Record, write_master};
use crate::error::{Result, VeritasError};
use crate::label::Label;

/// Per-source merge outcome.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SourceReport {
    /// Source name from the spec.
    pub name: String,
    /// Rows that made it into the master dataset (after weighting).
    pub rows_kept: usize,
    /// Rows dropped for blank text or unmappable labels.
    pub rows_dropped: usize,
    /// Reason the source was skipped entirely, if it was.
    pub skipped: Option<String>,
}

/// Outcome of a whole merge run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct MergeReport {
    /// Per-source outcomes, in configuration order.
    pub sources: Vec<SourceReport>,
    /// Total rows written to the master dataset.
    pub total_rows: usize,
    /// Where the master dataset was written.
    pub output: String,
}

/// Merge all configured sources and write the master dataset.
///
/// Returns an error without writing anything when zero rows were loaded.
pub fn merge(config: &MergeConfig) -> Result<MergeReport> {
    let mut all_records = Vec::new();
    let mut reports = Vec::new();

    for spec in &config.sources {
        if !spec.path.exists() {
            warn!(source = %spec.name, path = %spec.path.display(), "source file not found, skipping");
            reports.push(SourceReport {
                name: spec.name.clone(),
                rows_kept: 0,
                rows_dropped: 0,
                skipped: Some("file not found".to_string()),
            });
            continue;
        }

        match load_source(spec) {
            Ok((records, dropped)) => {
                info!(
                    source = %spec.name,
                    rows = records.len(),
                    dropped,
                    "loaded source"
                );
                reports.push(SourceReport {
                    name: spec.name.clone(),
                    rows_kept: records.len(),
                    rows_dropped: dropped,
                    skipped: None,
                });
                all_records.extend(records);
            }
            Err(e) => {
                warn!(source = %spec.name, error = %e, "failed to load source, skipping");
                reports.push(SourceReport {
                    name: spec.name.clone(),
                    rows_kept: 0,
                    rows_dropped: 0,
                    skipped: Some(e.to_string()),
                });
            }
        }
    }

    if all_records.is_empty() {
        return Err(VeritasError::dataset(
            "no source data loaded; nothing was written (check that the configured CSV files exist)",
        ));
    }

    write_master(&config.output, &all_records)?;
    info!(rows = all_records.len(), output = %config.output.display(), "master dataset written");

    Ok(MergeReport {
        sources: reports,
        total_rows: all_records.len(),
        output: config.output.display().to_string(),
    })
}

/// Load one source into `(records, dropped_count)`.
fn load_source(spec: &SourceSpec) -> Result<(Vec<Record>, usize)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(&spec.path)?;

    // Header matching is case-insensitive on trimmed names.
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let text_idx = find_column(&headers, &spec.text_aliases).ok_or_else(|| {
        VeritasError::dataset(format!(
            "no text column among [{}] in '{}'",
            spec.text_aliases.join(", "),
            spec.path.display()
        ))
    })?;
    let title_idx = headers.iter().position(|h| h == "title");

    let label_idx = match &spec.label {
        LabelPolicy::Fixed { .. } => None,
        LabelPolicy::FixedIfMissing { column_aliases, .. } => find_column(&headers, column_aliases),
        LabelPolicy::Mapped { column_aliases } => {
            let idx = find_column(&headers, column_aliases).ok_or_else(|| {
                VeritasError::dataset(format!(
                    "no label column among [{}] in '{}'",
                    column_aliases.join(", "),
                    spec.path.display()
                ))
            })?;
            Some(idx)
        }
    };

    let mut records = Vec::new();
    let mut dropped = 0usize;
    let weight = spec.weight.max(1) as usize;

    for row in reader.records() {
        let row = row?;

        let text = assemble_text(&row, text_idx, title_idx);
        if text.is_empty() {
            dropped += 1;
            continue;
        }

        let label = match (&spec.label, label_idx) {
            (LabelPolicy::Fixed { value }, _) => Some(*value),
            (LabelPolicy::FixedIfMissing { value, .. }, None) => Some(*value),
            (LabelPolicy::FixedIfMissing { .. }, Some(idx))
            | (LabelPolicy::Mapped { .. }, Some(idx)) => {
                row.get(idx).and_then(Label::from_raw)
            }
            (LabelPolicy::Mapped { .. }, None) => None,
        };

        match label {
            Some(label) => {
                for _ in 0..weight {
                    records.push(Record::new(text.clone(), label));
                }
            }
            None => dropped += 1,
        }
    }

    Ok((records, dropped))
}

/// Pick the first alias that names an existing column.
fn find_column(headers: &[String], aliases: &[String]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == &alias.trim().to_lowercase()))
}

/// Assemble the text field, prefixing a title column when one exists.
fn assemble_text(row: &csv::StringRecord, text_idx: usize, title_idx: Option<usize>) -> String {
    let text = row.get(text_idx).unwrap_or("").trim();
    let title = title_idx.and_then(|i| row.get(i)).unwrap_or("").trim();

    if title.is_empty() {
        text.to_string()
    } else if text.is_empty() {
        title.to_string()
    } else {
        format!("{title} {text}")
    }
}
