//! Parsing of structured oracle replies, with a well-formed fallback.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::Quality;

use super::answer::Answer;
use super::question::QuestionCatalog;

/// Canned clarifying response used when the oracle reply is unusable.
const FALLBACK_RESPONSE: &str =
    "Thanks. Could you tell me a bit more about that, in your own words?";

/// Structured result of one extraction turn.
///
/// `all_answered` and `current_focus` are advisory as parsed here; the
/// engine recomputes completion and validates focus against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    /// Answers the oracle extracted from the latest message, by catalog key.
    pub extracted_answers: BTreeMap<String, Answer>,
    /// Conversational reply to show the user.
    pub response: String,
    /// The question id the oracle suggests focusing on next.
    pub current_focus: String,
    /// The oracle's own completeness claim.
    pub all_answered: bool,
}

impl Extraction {
    /// The fallback extraction for an unusable oracle reply.
    ///
    /// Empty extractions, a generic clarifying response, focus on the first
    /// catalog question, and not complete. Guarantees the engine always has
    /// a well-formed extraction to merge.
    pub fn fallback(catalog: &QuestionCatalog) -> Self {
        Self {
            extracted_answers: BTreeMap::new(),
            response: FALLBACK_RESPONSE.to_string(),
            current_focus: catalog.first().id.clone(),
            all_answered: false,
        }
    }

    /// Parses an oracle reply body into an extraction.
    ///
    /// Never fails: a body that does not contain the demanded object in any
    /// recognizable form yields [`Extraction::fallback`]. Callers that need
    /// to observe the malformed-reply case use [`Extraction::try_parse`].
    pub fn parse(reply: &str, catalog: &QuestionCatalog) -> Self {
        Self::try_parse(reply).unwrap_or_else(|| Self::fallback(catalog))
    }

    /// Parses an oracle reply body, or `None` when the body does not
    /// contain the demanded object.
    ///
    /// The reply may wrap the object in markdown code fences or surrounding
    /// prose. Quality scores outside 1..=5 are clamped; entries with empty
    /// text are discarded as non-answers.
    pub fn try_parse(reply: &str) -> Option<Self> {
        let candidate = extract_json_object(reply);

        let raw: RawExtraction = serde_json::from_str(&candidate).ok()?;

        let mut extracted_answers = BTreeMap::new();
        for (key, raw_answer) in raw.extracted_answers {
            let text = raw_answer.text.trim();
            if text.is_empty() {
                continue;
            }
            extracted_answers.insert(
                key,
                Answer::new(text, Quality::clamped(raw_answer.quality)),
            );
        }

        let response = if raw.response.trim().is_empty() {
            FALLBACK_RESPONSE.to_string()
        } else {
            raw.response
        };

        Some(Self {
            extracted_answers,
            response,
            current_focus: raw.current_focus,
            all_answered: raw.all_answered,
        })
    }
}

/// Oracle reply shape before domain validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExtraction {
    #[serde(default)]
    extracted_answers: BTreeMap<String, RawAnswer>,
    #[serde(default)]
    response: String,
    #[serde(default)]
    current_focus: String,
    #[serde(default)]
    all_answered: bool,
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    #[serde(default)]
    text: String,
    #[serde(default = "default_raw_quality")]
    quality: i64,
}

fn default_raw_quality() -> i64 {
    1
}

/// Pulls a JSON object out of a reply that may contain code fences or prose.
fn extract_json_object(reply: &str) -> String {
    let trimmed = reply.trim();

    if let Some(json) = extract_from_code_block(trimmed) {
        return json;
    }

    if let Some(start) = trimmed.find('{') {
        if let Some(json) = extract_balanced_object(trimmed, start) {
            return json;
        }
    }

    trimmed.to_string()
}

fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let json_start = start + pattern.len();
            if let Some(end) = s[json_start..].find("```") {
                return Some(s[json_start..json_start + end].trim().to_string());
            }
        }
    }
    None
}

fn extract_balanced_object(s: &str, start: usize) -> Option<String> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(s[start..start + offset + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}
