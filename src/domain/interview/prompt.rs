//! Prompt construction for the extraction and summary oracle calls.
//!
//! The quality-scoring contract and the AI-candidacy leniency rule live
//! here, in prompt text; the only code-enforced check is the engine's
//! recomputation of completion against the quality threshold.

use std::fmt::Write;

use super::answer::AnswerSheet;
use super::message::{recent_window, ChatMessage, ChatRole};
use super::question::QuestionCatalog;

/// System prompt for the structured extraction call.
pub const EXTRACTION_SYSTEM_PROMPT: &str = "\
You are an intake interviewer collecting details about a proposed AI project. \
Your job each turn: read the user's latest message, extract answers to the \
interview questions it clearly addresses, and decide which question to ask \
about next.

Reply with a single JSON object and nothing else, using exactly these keys:
{
  \"extractedAnswers\": {\"<question key>\": {\"text\": \"<extracted answer>\", \"quality\": <1-5>}},
  \"response\": \"<your next conversational message to the user>\",
  \"currentFocus\": \"<id of the question to address next>\",
  \"allAnswered\": <true|false>
}

Rules:
- Only include a key in extractedAnswers when the latest message gives a \
clear, directly-extractable answer for it. Never invent or infer answers \
for questions the message does not address.
- Use the question keys exactly as listed; never introduce other keys.
- quality is your confidence in the extraction, 1 (vague) to 5 (specific \
and complete). Vague or low-detail answers must score below 3.
- Exception: for the question about why the problem is a good fit for AI, \
score generously - at least 3 - whenever the answer mentions automation, \
data processing, pattern recognition, or prediction, even briefly.
- If an answered question's quality was below 3, prefer re-asking it over \
moving to an unanswered question, and point currentFocus at it.
- Keep response short, friendly, and focused on one question at a time.";

/// Builds the user-role prompt for one extraction turn.
///
/// Partitions the catalog into answered and unanswered questions, lists
/// every question with its id, key, and text (plus current quality when
/// answered), and appends the trailing chat window and the latest user
/// message.
pub fn extraction_prompt(
    catalog: &QuestionCatalog,
    answers: &AnswerSheet,
    history: &[ChatMessage],
    message: &str,
) -> String {
    let mut prompt = String::new();

    prompt.push_str("Interview questions still to answer:\n");
    let mut any_unanswered = false;
    for question in catalog.iter() {
        if answers.get(&question.key).is_none() {
            any_unanswered = true;
            let _ = writeln!(
                prompt,
                "- id: {}, key: {}, question: {}",
                question.id, question.key, question.text
            );
        }
    }
    if !any_unanswered {
        prompt.push_str("(none)\n");
    }

    prompt.push_str("\nQuestions already answered:\n");
    let mut any_answered = false;
    for question in catalog.iter() {
        if let Some(answer) = answers.get(&question.key) {
            any_answered = true;
            let _ = writeln!(
                prompt,
                "- id: {}, key: {}, question: {}, current answer (quality {}): {}",
                question.id, question.key, question.text, answer.quality, answer.text
            );
        }
    }
    if !any_answered {
        prompt.push_str("(none)\n");
    }

    prompt.push_str("\nRecent conversation:\n");
    let window = recent_window(history);
    if window.is_empty() {
        prompt.push_str("(start of interview)\n");
    } else {
        for msg in window {
            let _ = writeln!(prompt, "{}: {}", role_label(msg.role), msg.text);
        }
    }

    if message.trim().is_empty() {
        prompt.push_str("\nThe user sent an empty message; there is nothing new to extract.\n");
    } else {
        let _ = writeln!(prompt, "\nLatest user message:\n{}", message);
    }

    prompt
}

/// Builds the plain-text summary prompt for a finished interview.
///
/// The reply contract is prose, not JSON: two paragraphs summarizing the
/// proposal, then a tagged tail with business unit, category, and urgency.
pub fn summary_prompt(
    catalog: &QuestionCatalog,
    answers: &AnswerSheet,
    history: &[ChatMessage],
) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "Summarize the following AI-idea interview in two paragraphs, then output:\n\
         ---\n\
         Business Unit:\n\
         Category (tag):\n\
         Urgency (high/med/low):\n\
         ---\n\n\
         Collected answers:\n",
    );

    for question in catalog.iter() {
        if let Some(answer) = answers.get(&question.key) {
            let _ = writeln!(prompt, "- {}: {}", question.text, answer.text);
        }
    }

    let window = recent_window(history);
    if !window.is_empty() {
        prompt.push_str("\nClosing conversation:\n");
        for msg in window {
            let _ = writeln!(prompt, "{}: {}", role_label(msg.role), msg.text);
        }
    }

    prompt
}

fn role_label(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "User",
        ChatRole::Assistant => "Interviewer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Quality;
    use crate::domain::interview::answer::Answer;
    use crate::domain::interview::question::Question;
    use crate::domain::interview::HISTORY_WINDOW;

    fn catalog() -> QuestionCatalog {
        QuestionCatalog::new(vec![
            Question::new("q1", "problem", "What problem are you solving?"),
            Question::new("q2", "ai_fit", "Why is AI a good fit?"),
        ])
        .unwrap()
    }

    fn sheet_with_problem() -> AnswerSheet {
        AnswerSheet::from_entries([(
            "problem".to_string(),
            Answer::new("manual invoice checks", Quality::try_from_u8(4).unwrap()),
        )])
    }

    #[test]
    fn prompt_partitions_answered_and_unanswered() {
        let prompt = extraction_prompt(&catalog(), &sheet_with_problem(), &[], "hello");

        let unanswered_section = prompt.split("already answered").next().unwrap();
        assert!(unanswered_section.contains("key: ai_fit"));
        assert!(!unanswered_section.contains("key: problem"));

        assert!(prompt.contains("current answer (quality 4): manual invoice checks"));
    }

    #[test]
    fn prompt_includes_ids_keys_and_text_for_every_question() {
        let prompt = extraction_prompt(&catalog(), &AnswerSheet::new(), &[], "hello");
        assert!(prompt.contains("id: q1"));
        assert!(prompt.contains("id: q2"));
        assert!(prompt.contains("What problem are you solving?"));
        assert!(prompt.contains("Why is AI a good fit?"));
    }

    #[test]
    fn prompt_truncates_history_to_window() {
        let history: Vec<ChatMessage> = (0..20)
            .map(|i| ChatMessage::user(format!("turn {}", i)))
            .collect();

        let prompt = extraction_prompt(&catalog(), &AnswerSheet::new(), &history, "latest");
        assert!(!prompt.contains("turn 13"));
        assert!(prompt.contains(&format!("turn {}", 20 - HISTORY_WINDOW)));
        assert!(prompt.contains("turn 19"));
    }

    #[test]
    fn empty_message_is_flagged_not_quoted() {
        let prompt = extraction_prompt(&catalog(), &AnswerSheet::new(), &[], "   ");
        assert!(prompt.contains("empty message"));
        assert!(!prompt.contains("Latest user message"));
    }

    #[test]
    fn system_prompt_carries_scoring_contract() {
        assert!(EXTRACTION_SYSTEM_PROMPT.contains("extractedAnswers"));
        assert!(EXTRACTION_SYSTEM_PROMPT.contains("currentFocus"));
        assert!(EXTRACTION_SYSTEM_PROMPT.contains("allAnswered"));
        assert!(EXTRACTION_SYSTEM_PROMPT.contains("1 (vague) to 5"));
        assert!(EXTRACTION_SYSTEM_PROMPT.contains("pattern recognition"));
    }

    #[test]
    fn summary_prompt_lists_answers_and_tail_tags() {
        let prompt = summary_prompt(&catalog(), &sheet_with_problem(), &[]);
        assert!(prompt.contains("two paragraphs"));
        assert!(prompt.contains("Business Unit:"));
        assert!(prompt.contains("Urgency (high/med/low):"));
        assert!(prompt.contains("manual invoice checks"));
    }
}
