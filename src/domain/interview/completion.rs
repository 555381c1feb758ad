//! Authoritative completion determination.

use super::answer::AnswerSheet;
use super::question::QuestionCatalog;

/// True iff every catalog question has a settled answer.
///
/// Settled means non-empty text with quality at or above the threshold.
/// This is the authoritative completeness check; the oracle's own
/// `allAnswered` claim is never trusted because it cannot see the merged
/// state. Callers must run this strictly after the merge so answers
/// extracted this turn are counted.
pub fn all_answered(catalog: &QuestionCatalog, answers: &AnswerSheet) -> bool {
    catalog.iter().all(|question| {
        answers
            .get(&question.key)
            .is_some_and(|answer| answer.is_settled())
    })
}
