//! Source dataset descriptions and merge configuration.
//!
//! Each source CSV carries its own column schema and labeling convention, so
//! every source is described by a [`SourceSpec`]: where the file lives, which
//! columns can hold the text, how labels are derived, and how heavily the
//! source weighs in the final mix. A [`MergeConfig`] is a list of specs plus
//! the output path, loadable from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::label::Label;

fn default_text_aliases() -> Vec<String> {
    ["text", "headline_text", "content", "misinformation"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_label_aliases() -> Vec<String> {
    ["label", "fake", "class"].iter().map(|s| s.to_string()).collect()
}

fn default_weight() -> u32 {
    1
}

/// How a source's labels are derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Every row of this source gets the same label.
    Fixed { value: Label },
    /// Use a label column when the file has one, otherwise fall back to a
    /// constant. Rows whose column value is unmappable are dropped.
    FixedIfMissing {
        value: Label,
        #[serde(default = "default_label_aliases")]
        column_aliases: Vec<String>,
    },
    /// Map a label column through the canonical label mapper; rows with
    /// unmappable values are dropped. A source without any matching column
    /// is skipped entirely.
    Mapped {
        #[serde(default = "default_label_aliases")]
        column_aliases: Vec<String>,
    },
}

impl Default for LabelPolicy {
    fn default() -> Self {
        LabelPolicy::Mapped {
            column_aliases: default_label_aliases(),
        }
    }
}

/// Description of one source CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Human-readable source name, used in diagnostics and reports.
    pub name: String,
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Column names that may hold the text, in preference order. Header
    /// comparison is case-insensitive on trimmed names.
    #[serde(default = "default_text_aliases")]
    pub text_aliases: Vec<String>,
    /// Label derivation policy.
    #[serde(default)]
    pub label: LabelPolicy,
    /// Row repetition factor biasing this source's influence. Defaults to 1.
    #[serde(default = "default_weight")]
    pub weight: u32,
}

/// Configuration for a merge run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Where the master dataset is written.
    pub output: PathBuf,
    /// Sources to merge, in order.
    pub sources: Vec<SourceSpec>,
}

impl MergeConfig {
    /// Load a merge configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The built-in source list, rooted at `data_dir`.
    ///
    /// Mirrors the historical ingest set: a curated correction file (heavily
    /// weighted), an all-real headline feed, an all-fake generated-text
    /// dump, the paired True/Fake article archives, and one mixed-label
    /// source with inconsistent label spellings.
    pub fn default_sources(data_dir: &Path, output: PathBuf) -> Self {
        let src = |name: &str, file: &str| (name.to_string(), data_dir.join(file));

        let (custom_name, custom_path) = src("custom", "custom_2025.csv");
        let (india_name, india_path) = src("india-headlines", "india-news-headlines.csv");
        let (gen_ai_name, gen_ai_path) = src("gen-ai", "gen_ai.csv");
        let (true_name, true_path) = src("true-archive", "True.csv");
        let (fake_name, fake_path) = src("fake-archive", "Fake.csv");
        let (bharat_name, bharat_path) = src("bharat", "bharat.csv");

        MergeConfig {
            output,
            sources: vec![
                SourceSpec {
                    name: custom_name,
                    path: custom_path,
                    text_aliases: default_text_aliases(),
                    label: LabelPolicy::FixedIfMissing {
                        value: Label::Fake,
                        column_aliases: default_label_aliases(),
                    },
                    weight: 100,
                },
                SourceSpec {
                    name: india_name,
                    path: india_path,
                    text_aliases: default_text_aliases(),
                    label: LabelPolicy::Fixed { value: Label::Real },
                    weight: 1,
                },
                SourceSpec {
                    name: gen_ai_name,
                    path: gen_ai_path,
                    text_aliases: default_text_aliases(),
                    label: LabelPolicy::Fixed { value: Label::Fake },
                    weight: 1,
                },
                SourceSpec {
                    name: true_name,
                    path: true_path,
                    text_aliases: default_text_aliases(),
                    label: LabelPolicy::Fixed { value: Label::Real },
                    weight: 1,
                },
                SourceSpec {
                    name: fake_name,
                    path: fake_path,
                    text_aliases: default_text_aliases(),
                    label: LabelPolicy::Fixed { value: Label::Fake },
                    weight: 1,
                },
                SourceSpec {
                    name: bharat_name,
                    path: bharat_path,
                    text_aliases: default_text_aliases(),
                    label: LabelPolicy::default(),
                    weight: 1,
                },
            ],
        }
    }
}
