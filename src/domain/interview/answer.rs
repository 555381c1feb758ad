//! Extracted answers and the per-session answer sheet.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::Quality;

use super::question::QuestionCatalog;

/// One extracted answer to a catalog question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The answer text as extracted from conversation.
    pub text: String,
    /// Extraction confidence, 1 to 5.
    pub quality: Quality,
}

impl Answer {
    /// Creates a new answer.
    pub fn new(text: impl Into<String>, quality: Quality) -> Self {
        Self {
            text: text.into(),
            quality,
        }
    }

    /// True if the answer has text and sufficient quality to count
    /// toward completion.
    pub fn is_settled(&self) -> bool {
        !self.text.trim().is_empty() && self.quality.is_sufficient()
    }
}

/// Mapping from question key to its current answer.
///
/// Owned by the caller between turns; the engine receives a sheet,
/// returns a merged copy, and never holds on to either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(BTreeMap<String, Answer>);

/// Result of merging oracle extractions into a sheet.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The merged sheet.
    pub sheet: AnswerSheet,
    /// Extracted keys that were not in the catalog and were dropped.
    pub dropped_keys: Vec<String>,
}

impl AnswerSheet {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sheet from key/answer pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Answer)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Returns the answer for a question key, if present.
    pub fn get(&self, key: &str) -> Option<&Answer> {
        self.0.get(key)
    }

    /// Iterates answers in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.0.iter()
    }

    /// Keys present in the sheet, in key order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Number of answered keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no keys are answered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges newly extracted answers into this sheet.
    ///
    /// Last write wins: an extracted answer replaces any existing answer
    /// for that key unconditionally, so a clarified re-answer simply
    /// overwrites the earlier low-quality attempt. Keys absent from the
    /// extraction are left untouched. Keys outside the catalog are never
    /// merged; they are reported in [`MergeOutcome::dropped_keys`] for the
    /// caller to log.
    pub fn merge(
        &self,
        extracted: &BTreeMap<String, Answer>,
        catalog: &QuestionCatalog,
    ) -> MergeOutcome {
        let mut sheet = self.clone();
        let mut dropped_keys = Vec::new();

        for (key, answer) in extracted {
            if catalog.contains_key(key) {
                sheet.0.insert(key.clone(), answer.clone());
            } else {
                dropped_keys.push(key.clone());
            }
        }

        MergeOutcome { sheet, dropped_keys }
    }
}
