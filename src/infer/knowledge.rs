//! Knowledge-base overrides for known cases.
//!
//! An ordered table of `(keyword set, label, explanation)` rules evaluated
//! before the statistical model. A rule fires when ALL of its keywords are
//! substrings of the lowercased raw input; the first firing rule wins and
//! short-circuits classification. The table is plain data so deployments
//! can swap it out from a JSON file without touching the model.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::label::Label;

/// One override rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Keywords that must all appear in the lowercased input.
    pub keywords: Vec<String>,
    /// Label returned when the rule fires.
    pub label: Label,
    /// Human-readable explanation shown instead of a confidence score.
    pub explanation: String,
}

/// Ordered rule table checked before the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase {
    rules: Vec<Rule>,
}

impl KnowledgeBase {
    /// Create a knowledge base from an ordered rule list.
    pub fn new(rules: Vec<Rule>) -> Self {
        KnowledgeBase { rules }
    }

    /// An empty knowledge base (every input goes to the model).
    pub fn empty() -> Self {
        KnowledgeBase { rules: Vec::new() }
    }

    /// Load a rule table from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// The built-in rule table of manually verified cases.
    pub fn builtin() -> Self {
        let real = "Verified fact (knowledge base)";
        let fake = "Known hoax (knowledge base)";
        let rule = |keywords: &[&str], label: Label, explanation: &str| Rule {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            label,
            explanation: explanation.to_string(),
        };

        KnowledgeBase {
            rules: vec![
                rule(&["modi", "pm"], Label::Real, real),
                rule(&["modi", "prime minister"], Label::Real, real),
                rule(&["trump", "president"], Label::Real, real),
                rule(&["trump", "election"], Label::Real, real),
                rule(&["isro", "moon"], Label::Real, real),
                rule(&["rbi", "bank"], Label::Real, real),
                rule(&["india", "g20"], Label::Real, real),
                rule(&["indian-origin", "woman"], Label::Real, real),
                rule(&["green card", "ice"], Label::Real, real),
                rule(&["detained", "ice"], Label::Real, real),
                rule(&["visa", "us"], Label::Real, real),
                rule(&["chip", "note"], Label::Fake, fake),
                rule(&["unesco", "anthem"], Label::Fake, fake),
                rule(&["aliens", "nasa"], Label::Fake, fake),
                rule(&["stop", "spinning"], Label::Fake, fake),
            ],
        }
    }

    /// Find the first rule whose keywords all occur in the input.
    ///
    /// Matching is against the raw lowercased input, not the normalized
    /// form: rules may contain phrases and punctuation-adjacent terms that
    /// normalization would destroy.
    pub fn lookup(&self, input: &str) -> Option<&Rule> {
        let haystack = input.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().all(|k| haystack.contains(k.as_str())))
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_keywords_must_match() {
        let kb = KnowledgeBase::builtin();

        assert!(kb.lookup("Trump wins the election in a landslide").is_some());
        assert!(kb.lookup("trump went golfing").is_none());
        assert!(kb.lookup("the election was held in May").is_none());
    }

    #[test]
    fn test_matching_is_case_insensitive_on_raw_input() {
        let kb = KnowledgeBase::builtin();
        let rule = kb.lookup("ALIENS spotted by NASA telescope!").unwrap();
        assert_eq!(rule.label, Label::Fake);
        assert!(rule.explanation.contains("hoax"));
    }

    #[test]
    fn test_first_match_wins() {
        let kb = KnowledgeBase::new(vec![
            Rule {
                keywords: vec!["moon".to_string()],
                label: Label::Real,
                explanation: "first".to_string(),
            },
            Rule {
                keywords: vec!["moon".to_string()],
                label: Label::Fake,
                explanation: "second".to_string(),
            },
        ]);

        let rule = kb.lookup("moon mission update").unwrap();
        assert_eq!(rule.explanation, "first");
    }

    #[test]
    fn test_empty_table_never_matches() {
        let kb = KnowledgeBase::empty();
        assert!(kb.is_empty());
        assert!(kb.lookup("anything at all").is_none());
    }

    #[test]
    fn test_json_round_trip() {
        let kb = KnowledgeBase::builtin();
        let json = serde_json::to_string(&kb).unwrap();
        let loaded: KnowledgeBase = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.len(), kb.len());
    }
}
