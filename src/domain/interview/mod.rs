//! Interview domain - the intake interview orchestration core.
//!
//! Turns one user message plus accumulated answer state into an oracle
//! query, a merge of oracle output into per-field answers, a next-focus
//! decision, and a completion determination. Everything here is a pure
//! function of its inputs; the oracle network call lives behind the
//! `Oracle` port and is wired in by the application layer.

mod answer;
mod completion;
mod engine;
mod extraction;
mod focus;
mod message;
mod prompt;
mod question;

pub use answer::{Answer, AnswerSheet, MergeOutcome};
pub use completion::all_answered;
pub use engine::{settle, validate_turn, TurnError, TurnOutcome, TurnRequest};
pub use extraction::Extraction;
pub use focus::resolve_focus;
pub use message::{recent_window, ChatMessage, ChatRole, HISTORY_WINDOW};
pub use prompt::{extraction_prompt, summary_prompt, EXTRACTION_SYSTEM_PROMPT};
pub use question::{default_catalog, Question, QuestionCatalog};
