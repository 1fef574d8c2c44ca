//! Binary veracity labels and raw-value mapping.
//!
//! Source datasets spell their labels many ways (`"True"`, `"FAKE"`, `1`,
//! `"0"`, ...). [`Label::from_raw`] is the single total mapping from those
//! spellings to the canonical classes; anything outside the alias set is
//! unmapped (`None`) and callers drop the record. Mapping must always run
//! before null-filtering; filtering first would discard valid rows whose
//! labels are spelled as text.

use serde::{Deserialize, Serialize};

/// Binary label for news veracity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// Fabricated or misleading content (class 0).
    Fake,
    /// Authentic content (class 1).
    Real,
}

impl Label {
    /// Map a raw label value to a canonical label.
    ///
    /// Total and deterministic: every spelling in the known alias set maps
    /// to exactly `Fake` or `Real`; any other value is unmapped. Surrounding
    /// whitespace is ignored. Already-canonical `"0"`/`"1"` values map to
    /// themselves, so re-applying the mapper is a no-op.
    pub fn from_raw(raw: &str) -> Option<Label> {
        match raw.trim() {
            "True" | "TRUE" | "true" | "Real" | "REAL" | "real" | "1" => Some(Label::Real),
            "Fake" | "FAKE" | "fake" | "0" => Some(Label::Fake),
            _ => None,
        }
    }

    /// Numeric class value (`Fake` = 0, `Real` = 1).
    pub fn as_i64(&self) -> i64 {
        match self {
            Label::Fake => 0,
            Label::Real => 1,
        }
    }

    /// Build a label from a numeric class value.
    pub fn from_i64(value: i64) -> Option<Label> {
        match value {
            0 => Some(Label::Fake),
            1 => Some(Label::Real),
            _ => None,
        }
    }

    /// Signed target for margin-based training (`Fake` = -1.0, `Real` = +1.0).
    pub fn as_signed(&self) -> f64 {
        match self {
            Label::Fake => -1.0,
            Label::Real => 1.0,
        }
    }

    /// Human-readable class name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Fake => "Fake",
            Label::Real => "Real",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_aliases() {
        for raw in ["True", "TRUE", "true", "Real", "REAL", "real", "1", " 1 "] {
            assert_eq!(Label::from_raw(raw), Some(Label::Real), "alias {raw:?}");
        }
    }

    #[test]
    fn test_fake_aliases() {
        for raw in ["Fake", "FAKE", "fake", "0", "0 "] {
            assert_eq!(Label::from_raw(raw), Some(Label::Fake), "alias {raw:?}");
        }
    }

    #[test]
    fn test_unmapped_values() {
        for raw in ["", "maybe", "2", "-1", "yes", "truth"] {
            assert_eq!(Label::from_raw(raw), None, "value {raw:?}");
        }
    }

    #[test]
    fn test_mapping_is_idempotent_on_canonical_form() {
        for label in [Label::Fake, Label::Real] {
            let canonical = label.as_i64().to_string();
            assert_eq!(Label::from_raw(&canonical), Some(label));
        }
    }

    #[test]
    fn test_numeric_round_trip() {
        assert_eq!(Label::from_i64(0), Some(Label::Fake));
        assert_eq!(Label::from_i64(1), Some(Label::Real));
        assert_eq!(Label::from_i64(7), None);
        assert_eq!(Label::Real.as_signed(), 1.0);
        assert_eq!(Label::Fake.as_signed(), -1.0);
    }
}
