//! ProcessTurn command handler.
//!
//! The orchestrator for one interview turn: validate the request, query
//! the oracle for a structured extraction, then settle the turn - merge,
//! recompute completion, resolve focus. One request/response transaction;
//! the caller persists the merged sheet between turns.

use std::sync::Arc;

use crate::domain::interview::{
    extraction_prompt, settle, validate_turn, Extraction, TurnError, TurnOutcome, TurnRequest,
    EXTRACTION_SYSTEM_PROMPT,
};
use crate::ports::{Oracle, OracleRequest, OracleRole};

/// Maximum tokens for an extraction reply.
const EXTRACTION_MAX_TOKENS: u32 = 1024;

/// Low temperature keeps extraction output close to the contract.
const EXTRACTION_TEMPERATURE: f32 = 0.2;

/// Handles one interview turn against the oracle.
pub struct ProcessTurnHandler {
    oracle: Arc<dyn Oracle>,
}

impl ProcessTurnHandler {
    /// Creates a new handler.
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Processes one turn.
    ///
    /// A single oracle failure surfaces immediately as
    /// [`TurnError::OracleUnavailable`]; no retries are attempted here, the
    /// caller may retry the whole turn. A malformed oracle reply is absorbed
    /// into the fallback extraction and the turn still completes.
    pub async fn handle(&self, request: TurnRequest) -> Result<TurnOutcome, TurnError> {
        validate_turn(&request)?;

        let prompt = extraction_prompt(
            &request.catalog,
            &request.answers,
            &request.history,
            &request.message,
        );

        let oracle_request = OracleRequest::new()
            .with_system_prompt(EXTRACTION_SYSTEM_PROMPT)
            .with_message(OracleRole::User, prompt)
            .json_only()
            .with_max_tokens(EXTRACTION_MAX_TOKENS)
            .with_temperature(EXTRACTION_TEMPERATURE);

        let reply = self
            .oracle
            .complete(oracle_request)
            .await
            .map_err(|e| TurnError::OracleUnavailable(e.to_string()))?;

        let extraction = match Extraction::try_parse(&reply.content) {
            Some(extraction) => extraction,
            None => {
                tracing::warn!(
                    session_id = %request.session_id,
                    model = %reply.model,
                    "Oracle reply did not parse as an extraction; using fallback"
                );
                Extraction::fallback(&request.catalog)
            }
        };

        let outcome = settle(&request.catalog, &request.answers, extraction);

        if !outcome.dropped_keys.is_empty() {
            tracing::warn!(
                session_id = %request.session_id,
                dropped_keys = ?outcome.dropped_keys,
                "Oracle extracted keys outside the catalog; dropped"
            );
        }

        tracing::debug!(
            session_id = %request.session_id,
            extracted = outcome.extracted_answers.len(),
            focus = %outcome.current_focus,
            all_answered = outcome.all_answered,
            "Turn settled"
        );

        Ok(outcome)
    }
}
