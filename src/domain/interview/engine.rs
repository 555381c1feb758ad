//! Turn assembly for the interview orchestration engine.
//!
//! One turn is: validate the request, query the oracle, parse its reply,
//! then settle - merge extractions into the sheet, recompute completion,
//! and resolve the next focus. The oracle call itself happens behind the
//! `Oracle` port in the application layer; everything here is pure.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::foundation::SessionId;

use super::answer::{Answer, AnswerSheet};
use super::completion::all_answered;
use super::extraction::Extraction;
use super::focus::resolve_focus;
use super::message::ChatMessage;
use super::question::QuestionCatalog;

/// One interview turn as received from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    /// The session this turn belongs to.
    pub session_id: SessionId,
    /// Question catalog for the session.
    pub catalog: QuestionCatalog,
    /// Answers accumulated over prior turns.
    pub answers: AnswerSheet,
    /// Transcript so far; only the trailing window is read.
    pub history: Vec<ChatMessage>,
    /// The latest user message. May be empty; an empty message yields no
    /// extraction but still produces a turn.
    pub message: String,
}

/// Errors that end a turn.
///
/// A malformed oracle reply is not here on purpose: it is absorbed into
/// the fallback extraction and the turn still completes.
#[derive(Debug, Clone, Error)]
pub enum TurnError {
    /// The request payload is malformed. Not retried.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The oracle service could not be reached or returned a failure.
    /// Surfaced as an upstream error; the caller may retry the turn.
    #[error("Oracle unavailable: {0}")]
    OracleUnavailable(String),
}

/// Result of one settled turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    /// Answers newly extracted this turn (catalog keys only).
    pub extracted_answers: BTreeMap<String, Answer>,
    /// Conversational reply to show the user.
    pub response: String,
    /// The question id to address next.
    pub current_focus: String,
    /// Authoritative completion determination over the merged sheet.
    pub all_answered: bool,
    /// The merged sheet; the caller persists it across turns.
    pub answers: AnswerSheet,
    /// Extracted keys outside the catalog, dropped by the merge.
    #[serde(skip)]
    pub dropped_keys: Vec<String>,
}

/// Validates a turn request before the oracle is queried.
///
/// Catalog well-formedness is a construction invariant of
/// [`QuestionCatalog`]; what remains is checking that the prior sheet only
/// references catalog keys.
pub fn validate_turn(request: &TurnRequest) -> Result<(), TurnError> {
    for key in request.answers.keys() {
        if !request.catalog.contains_key(key) {
            return Err(TurnError::InvalidRequest(format!(
                "answer key '{}' is not in the catalog",
                key
            )));
        }
    }
    Ok(())
}

/// Settles a turn from a parsed oracle extraction.
///
/// Runs the merge first, recomputes completion over the merged sheet
/// (overwriting the oracle's advisory claim), and resolves focus against
/// the merged sheet. Pure function of its inputs.
pub fn settle(
    catalog: &QuestionCatalog,
    prior: &AnswerSheet,
    extraction: Extraction,
) -> TurnOutcome {
    let merge = prior.merge(&extraction.extracted_answers, catalog);

    // Strictly after the merge, so this turn's extractions are counted.
    let all_answered = all_answered(catalog, &merge.sheet);
    let current_focus = resolve_focus(&extraction.current_focus, catalog, &merge.sheet);

    let extracted_answers = extraction
        .extracted_answers
        .into_iter()
        .filter(|(key, _)| catalog.contains_key(key))
        .collect();

    TurnOutcome {
        extracted_answers,
        response: extraction.response,
        current_focus,
        all_answered,
        answers: merge.sheet,
        dropped_keys: merge.dropped_keys,
    }
}
