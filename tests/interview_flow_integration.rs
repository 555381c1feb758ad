//! Integration tests for the interview orchestration flow.
//!
//! Drives the application handlers end-to-end with a scripted oracle and
//! an in-memory store: multi-turn interviews, completion, fallback
//! behavior, and finalization.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use ai_intake::adapters::ai::MockOracle;
use ai_intake::application::handlers::interview::{
    FinalizeSessionCommand, FinalizeSessionHandler, ProcessTurnHandler,
};
use ai_intake::domain::foundation::{DomainError, SessionId};
use ai_intake::domain::interview::{
    AnswerSheet, ChatMessage, Question, QuestionCatalog, TurnError, TurnRequest,
};
use ai_intake::ports::{IntakeRecord, IntakeStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// In-memory intake store for integration tests.
struct InMemoryIntakeStore {
    records: Mutex<Vec<IntakeRecord>>,
}

impl InMemoryIntakeStore {
    fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl IntakeStore for InMemoryIntakeStore {
    async fn save(&self, record: &IntakeRecord) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        records.retain(|r| r.session_id != record.session_id);
        records.push(record.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<IntakeRecord>, DomainError> {
        Ok(self.records.lock().unwrap().clone())
    }
}

fn single_question_catalog() -> QuestionCatalog {
    QuestionCatalog::new(vec![Question::new("q1", "problem", "What problem?")]).unwrap()
}

fn intake_catalog() -> QuestionCatalog {
    QuestionCatalog::new(vec![
        Question::new("q1", "problem", "What problem are you solving?"),
        Question::new("q2", "ai_fit", "Why is this a good fit for AI?"),
    ])
    .unwrap()
}

fn turn(catalog: QuestionCatalog, answers: AnswerSheet, message: &str) -> TurnRequest {
    TurnRequest {
        session_id: SessionId::new(),
        catalog,
        answers,
        history: vec![],
        message: message.to_string(),
    }
}

// =============================================================================
// Turn Processing
// =============================================================================

#[tokio::test]
async fn clear_answer_completes_single_question_interview() {
    let oracle = Arc::new(MockOracle::replying(
        r#"{
            "extractedAnswers": {"problem": {"text": "manual invoice checks", "quality": 4}},
            "response": "Thanks, that is everything I needed.",
            "currentFocus": "q1",
            "allAnswered": true
        }"#,
    ));
    let handler = ProcessTurnHandler::new(oracle);

    let outcome = handler
        .handle(turn(
            single_question_catalog(),
            AnswerSheet::new(),
            "We spend too much time on manual invoice checks",
        ))
        .await
        .unwrap();

    assert_eq!(outcome.answers.get("problem").unwrap().quality.value(), 4);
    assert_eq!(
        outcome.answers.get("problem").unwrap().text,
        "manual invoice checks"
    );
    assert!(outcome.all_answered);
}

#[tokio::test]
async fn vague_answer_keeps_focus_on_same_question() {
    let oracle = Arc::new(MockOracle::replying(
        r#"{
            "extractedAnswers": {"problem": {"text": "not sure", "quality": 1}},
            "response": "That's fine - what part of your week disappears into it?",
            "currentFocus": "q1",
            "allAnswered": false
        }"#,
    ));
    let handler = ProcessTurnHandler::new(oracle);

    let outcome = handler
        .handle(turn(
            single_question_catalog(),
            AnswerSheet::new(),
            "not sure",
        ))
        .await
        .unwrap();

    assert!(!outcome.all_answered);
    assert_eq!(outcome.current_focus, "q1");
}

#[tokio::test]
async fn multi_turn_interview_accumulates_and_completes() {
    // Turn 1: answers the problem question; turn 2: a brief AI-fit answer
    // that the leniency contract scores at 3.
    let oracle = Arc::new(MockOracle::new());
    oracle.push_reply(
        r#"{
            "extractedAnswers": {"problem": {"text": "demand planning is manual", "quality": 4}},
            "response": "Got it. Why do you think AI could help here?",
            "currentFocus": "q2",
            "allAnswered": false
        }"#,
    );
    oracle.push_reply(
        r#"{
            "extractedAnswers": {"ai_fit": {"text": "could help predict demand", "quality": 3}},
            "response": "That's everything, thanks!",
            "currentFocus": "q2",
            "allAnswered": true
        }"#,
    );
    let handler = ProcessTurnHandler::new(oracle);

    let first = handler
        .handle(turn(
            intake_catalog(),
            AnswerSheet::new(),
            "demand planning is manual",
        ))
        .await
        .unwrap();

    assert!(!first.all_answered);
    assert_eq!(first.current_focus, "q2");

    let second = handler
        .handle(turn(
            intake_catalog(),
            first.answers.clone(),
            "could help predict demand",
        ))
        .await
        .unwrap();

    assert!(second.all_answered);
    assert!(second
        .answers
        .get("ai_fit")
        .unwrap()
        .quality
        .is_sufficient());
    // The first turn's answer survived the second merge untouched.
    assert_eq!(
        second.answers.get("problem").unwrap().text,
        "demand planning is manual"
    );
}

#[tokio::test]
async fn clarified_reanswer_overwrites_earlier_attempt() {
    let oracle = Arc::new(MockOracle::new());
    oracle.push_reply(
        r#"{
            "extractedAnswers": {"problem": {"text": "stuff is slow", "quality": 2}},
            "response": "Which process specifically?",
            "currentFocus": "q1",
            "allAnswered": false
        }"#,
    );
    oracle.push_reply(
        r#"{
            "extractedAnswers": {"problem": {"text": "invoice approval takes two weeks", "quality": 5}},
            "response": "Crystal clear, thanks.",
            "currentFocus": "q1",
            "allAnswered": true
        }"#,
    );
    let handler = ProcessTurnHandler::new(oracle);

    let first = handler
        .handle(turn(single_question_catalog(), AnswerSheet::new(), "stuff is slow"))
        .await
        .unwrap();
    assert!(!first.all_answered);

    let second = handler
        .handle(turn(
            single_question_catalog(),
            first.answers,
            "invoice approval takes two weeks",
        ))
        .await
        .unwrap();

    let answer = second.answers.get("problem").unwrap();
    assert_eq!(answer.text, "invoice approval takes two weeks");
    assert_eq!(answer.quality.value(), 5);
    assert!(second.all_answered);
}

#[tokio::test]
async fn unusable_oracle_reply_degrades_to_clarifying_turn() {
    let oracle = Arc::new(MockOracle::replying("Certainly! Let me think about that..."));
    let handler = ProcessTurnHandler::new(oracle);

    let prior = AnswerSheet::new();
    let outcome = handler
        .handle(turn(intake_catalog(), prior, "we lose invoices"))
        .await
        .unwrap();

    // The turn still completes: no extraction, generic response, focus on
    // the first question.
    assert!(outcome.extracted_answers.is_empty());
    assert!(outcome.answers.is_empty());
    assert!(!outcome.all_answered);
    assert_eq!(outcome.current_focus, "q1");
    assert!(!outcome.response.is_empty());
}

#[tokio::test]
async fn hallucinated_keys_never_reach_the_sheet() {
    let oracle = Arc::new(MockOracle::replying(
        r#"{
            "extractedAnswers": {
                "problem": {"text": "slow reviews", "quality": 4},
                "headcount": {"text": "seventeen", "quality": 5}
            },
            "response": "Noted.",
            "currentFocus": "q2",
            "allAnswered": false
        }"#,
    ));
    let handler = ProcessTurnHandler::new(oracle);

    let outcome = handler
        .handle(turn(intake_catalog(), AnswerSheet::new(), "slow reviews"))
        .await
        .unwrap();

    assert!(outcome.answers.get("headcount").is_none());
    assert!(!outcome.extracted_answers.contains_key("headcount"));
    assert_eq!(outcome.answers.get("problem").unwrap().text, "slow reviews");
}

#[tokio::test]
async fn oracle_outage_fails_the_turn_without_inventing_answers() {
    let oracle = Arc::new(MockOracle::unavailable("503 from provider"));
    let handler = ProcessTurnHandler::new(oracle);

    let result = handler
        .handle(turn(intake_catalog(), AnswerSheet::new(), "hello"))
        .await;

    match result {
        Err(TurnError::OracleUnavailable(msg)) => assert!(msg.contains("503")),
        other => panic!("expected OracleUnavailable, got {:?}", other.map(|_| ())),
    }
}

// =============================================================================
// Finalization
// =============================================================================

#[tokio::test]
async fn finalize_persists_summary_for_admin_listing() {
    let oracle = Arc::new(MockOracle::replying(
        "Finance spends two weeks per cycle on manual invoice approval.\n\
         An extraction model could cut that to days.\n\
         ---\n\
         Business Unit: Finance\n\
         Category (tag): document-processing\n\
         Urgency (high/med/low): high",
    ));
    let store = Arc::new(InMemoryIntakeStore::new());
    let handler = FinalizeSessionHandler::new(oracle, store.clone());

    let session_id = SessionId::new();
    let answers = AnswerSheet::from_entries([(
        "problem".to_string(),
        ai_intake::domain::interview::Answer::new(
            "invoice approval takes two weeks",
            ai_intake::domain::foundation::Quality::try_from_u8(5).unwrap(),
        ),
    )]);

    let finalized = handler
        .handle(FinalizeSessionCommand {
            session_id,
            catalog: single_question_catalog(),
            answers: answers.clone(),
            history: vec![ChatMessage::assistant("Anything else?"), ChatMessage::user("no")],
        })
        .await
        .unwrap();

    assert!(finalized.record.summary.contains("Business Unit: Finance"));

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].session_id, session_id);
    assert_eq!(listed[0].answers, answers);
}

#[tokio::test]
async fn refinalizing_a_session_replaces_its_record() {
    let oracle = Arc::new(MockOracle::new());
    oracle.push_reply("First summary.");
    oracle.push_reply("Second, better summary.");
    let store = Arc::new(InMemoryIntakeStore::new());
    let handler = FinalizeSessionHandler::new(oracle, store.clone());

    let session_id = SessionId::new();
    let command = || FinalizeSessionCommand {
        session_id,
        catalog: single_question_catalog(),
        answers: AnswerSheet::new(),
        history: vec![],
    };

    handler.handle(command()).await.unwrap();
    handler.handle(command()).await.unwrap();

    let listed = store.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].summary, "Second, better summary.");
}
