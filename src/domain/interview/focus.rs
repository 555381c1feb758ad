//! Next-focus selection for the conversation.

use super::answer::AnswerSheet;
use super::question::QuestionCatalog;

/// Resolves which question the next turn should address.
///
/// The oracle's suggestion is honored whenever it names a catalog id.
/// That includes pointing back at an already-answered question: the prompt
/// contract tells the oracle to re-focus low-quality answers, and a
/// low-confidence answer is worse for conversational flow than no answer,
/// so the suggestion is not overridden here.
///
/// An unrecognized suggestion falls back to the first catalog question
/// whose answer is absent or not yet settled; with everything settled, the
/// first question's id is returned.
pub fn resolve_focus(
    oracle_focus: &str,
    catalog: &QuestionCatalog,
    answers: &AnswerSheet,
) -> String {
    if catalog.by_id(oracle_focus).is_some() {
        return oracle_focus.to_string();
    }

    catalog
        .iter()
        .find(|question| {
            answers
                .get(&question.key)
                .map_or(true, |answer| !answer.is_settled())
        })
        .map(|question| question.id.clone())
        .unwrap_or_else(|| catalog.first().id.clone())
}
