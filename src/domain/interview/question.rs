//! Interview questions and the per-session question catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::foundation::ValidationError;

/// A single interview question.
///
/// `id` is the externally-visible focus token; `key` is the storage field
/// name answers are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Focus token, e.g. "q1".
    pub id: String,
    /// Storage field name, e.g. "problem".
    pub key: String,
    /// The question as asked to the user.
    pub text: String,
}

impl Question {
    /// Creates a new question.
    pub fn new(
        id: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
            text: text.into(),
        }
    }
}

/// The fixed, ordered set of questions for one interview session.
///
/// Immutable once built. Construction enforces that the catalog is
/// non-empty, that every question carries non-empty `id`, `key`, and
/// `text`, and that `id` and `key` are unique within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Builds a catalog, validating the catalog invariants.
    pub fn new(questions: Vec<Question>) -> Result<Self, ValidationError> {
        if questions.is_empty() {
            return Err(ValidationError::empty_field("catalog"));
        }

        let mut ids = HashSet::new();
        let mut keys = HashSet::new();
        for question in &questions {
            if question.id.trim().is_empty() {
                return Err(ValidationError::empty_field("id"));
            }
            if question.key.trim().is_empty() {
                return Err(ValidationError::empty_field("key"));
            }
            if question.text.trim().is_empty() {
                return Err(ValidationError::empty_field("text"));
            }
            if !ids.insert(question.id.as_str()) {
                return Err(ValidationError::duplicate("id", &question.id));
            }
            if !keys.insert(question.key.as_str()) {
                return Err(ValidationError::duplicate("key", &question.key));
            }
        }

        Ok(Self { questions })
    }

    /// Iterates questions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// The first question in catalog order.
    pub fn first(&self) -> &Question {
        // Non-empty is a construction invariant.
        &self.questions[0]
    }

    /// Looks up a question by its focus token.
    pub fn by_id(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Looks up a question by its storage key.
    pub fn by_key(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.key == key)
    }

    /// Returns true if the catalog contains the given storage key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key(key).is_some()
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; catalogs cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl TryFrom<Vec<Question>> for QuestionCatalog {
    type Error = ValidationError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        QuestionCatalog::new(questions)
    }
}

impl From<QuestionCatalog> for Vec<Question> {
    fn from(catalog: QuestionCatalog) -> Self {
        catalog.questions
    }
}

/// The built-in AI project intake catalog.
///
/// Used when a turn request does not supply its own catalog.
pub fn default_catalog() -> QuestionCatalog {
    QuestionCatalog::new(vec![
        Question::new(
            "q1",
            "problem",
            "What problem are you trying to solve?",
        ),
        Question::new(
            "q2",
            "current_process",
            "How is this handled today, and what does it cost in time or money?",
        ),
        Question::new(
            "q3",
            "ai_fit",
            "Why do you think AI is a good fit for this problem?",
        ),
        Question::new(
            "q4",
            "data_sources",
            "What data exists today that an AI system could learn from or act on?",
        ),
        Question::new(
            "q5",
            "success_metric",
            "How would you measure whether the project succeeded?",
        ),
        Question::new(
            "q6",
            "business_unit",
            "Which business unit or team would own this project?",
        ),
        Question::new(
            "q7",
            "urgency",
            "How urgent is this - what happens if nothing changes this year?",
        ),
    ])
    .expect("built-in catalog is valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(id: &str, key: &str) -> Question {
        Question::new(id, key, format!("Question about {}?", key))
    }

    #[test]
    fn catalog_preserves_order() {
        let catalog = QuestionCatalog::new(vec![q("q1", "a"), q("q2", "b")]).unwrap();
        let keys: Vec<&str> = catalog.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(catalog.first().id, "q1");
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(QuestionCatalog::new(vec![]).is_err());
    }

    #[test]
    fn blank_fields_rejected() {
        assert!(QuestionCatalog::new(vec![Question::new("", "a", "text")]).is_err());
        assert!(QuestionCatalog::new(vec![Question::new("q1", " ", "text")]).is_err());
        assert!(QuestionCatalog::new(vec![Question::new("q1", "a", "")]).is_err());
    }

    #[test]
    fn duplicate_id_rejected() {
        let result = QuestionCatalog::new(vec![q("q1", "a"), q("q1", "b")]);
        assert!(matches!(
            result,
            Err(ValidationError::Duplicate { ref field, .. }) if field == "id"
        ));
    }

    #[test]
    fn duplicate_key_rejected() {
        let result = QuestionCatalog::new(vec![q("q1", "a"), q("q2", "a")]);
        assert!(matches!(
            result,
            Err(ValidationError::Duplicate { ref field, .. }) if field == "key"
        ));
    }

    #[test]
    fn lookup_by_id_and_key() {
        let catalog = QuestionCatalog::new(vec![q("q1", "a"), q("q2", "b")]).unwrap();
        assert_eq!(catalog.by_id("q2").unwrap().key, "b");
        assert_eq!(catalog.by_key("a").unwrap().id, "q1");
        assert!(catalog.by_id("q9").is_none());
        assert!(catalog.contains_key("b"));
        assert!(!catalog.contains_key("z"));
    }

    #[test]
    fn deserialization_enforces_invariants() {
        let json = r#"[
            {"id": "q1", "key": "a", "text": "A?"},
            {"id": "q1", "key": "b", "text": "B?"}
        ]"#;
        let result: Result<QuestionCatalog, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn default_catalog_is_well_formed() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 7);
        assert_eq!(catalog.first().key, "problem");
        assert!(catalog.contains_key("ai_fit"));
    }
}
