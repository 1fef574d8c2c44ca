//! Canonical text normalization.
//!
//! This module provides the single normalization policy shared by the
//! trainer and every inference entry point. The classifier's feature space
//! is defined over normalized text, so training-time and serving-time
//! cleaning must be byte-identical; a divergence degrades accuracy silently
//! instead of raising an error. Everything routes through [`normalize`].
//!
//! The policy, applied in order:
//!
//! 1. lowercase
//! 2. remove URLs (`https?://...` and `www....` spans)
//! 3. remove HTML-like tags
//! 4. remove characters that are neither word characters nor whitespace
//! 5. remove digit characters
//! 6. replace newlines with a space
//!
//! # Examples
//!
//! ```
//! use veritas::normalize::normalize;
//!
//! let cleaned = normalize("Read MORE at https://example.com <b>now</b>, 24/7!");
//! assert_eq!(cleaned, "read more at  now ");
//! ```

use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("URL pattern should be valid"));

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("tag pattern should be valid"));

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("non-word pattern should be valid"));

static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("digit pattern should be valid"));

static NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n").expect("newline pattern should be valid"));

/// Normalize raw text into the canonical form used for feature extraction.
///
/// Pure function: no side effects, never fails, and the output is never
/// null, though it may be empty (an empty result vectorizes to an all-zero
/// feature row). Idempotent: applying it to its own output is a no-op.
pub fn normalize(text: &str) -> String {
    let text = text.to_lowercase();
    let text = URL.replace_all(&text, "");
    let text = HTML_TAG.replace_all(&text, "");
    let text = NON_WORD.replace_all(&text, "");
    let text = DIGIT.replace_all(&text, "");
    let text = NEWLINE.replace_all(&text, " ");
    text.into_owned()
}
