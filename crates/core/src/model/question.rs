use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("expected answer cannot be empty")]
    EmptyExpectedAnswer,
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// One quiz question together with the answer the grader compares against.
///
/// Immutable once fetched; the expected answer is only shown to the learner
/// after their own answer has been graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    prompt: String,
    expected_answer: String,
}

impl Question {
    /// Creates a question from a prompt and its expected answer.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if either side is empty or whitespace-only.
    pub fn new(
        prompt: impl Into<String>,
        expected_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        let expected_answer = expected_answer.into();
        if expected_answer.trim().is_empty() {
            return Err(QuestionError::EmptyExpectedAnswer);
        }
        Ok(Self {
            prompt,
            expected_answer,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn expected_answer(&self) -> &str {
        &self.expected_answer
    }
}

//
// ─── QUESTION SET ──────────────────────────────────────────────────────────────
//

/// The ordered questions fetched for one topic.
///
/// Presentation order is the remote service's order; it is never rearranged
/// client-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet(Vec<Question>);

impl QuestionSet {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self(questions)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Question> {
        self.0.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.0.iter()
    }
}

impl From<Vec<Question>> for QuestionSet {
    fn from(questions: Vec<Question>) -> Self {
        Self::new(questions)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_rejects_blank_prompt() {
        let err = Question::new("  ", "four").unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }

    #[test]
    fn question_rejects_blank_expected_answer() {
        let err = Question::new("2+2?", "\n").unwrap_err();
        assert_eq!(err, QuestionError::EmptyExpectedAnswer);
    }

    #[test]
    fn set_preserves_fetch_order() {
        let set = QuestionSet::new(vec![
            Question::new("first?", "a").unwrap(),
            Question::new("second?", "b").unwrap(),
            Question::new("third?", "c").unwrap(),
        ]);

        assert_eq!(set.len(), 3);
        assert_eq!(set.get(0).unwrap().prompt(), "first?");
        assert_eq!(set.get(2).unwrap().prompt(), "third?");
        assert!(set.get(3).is_none());

        let prompts: Vec<_> = set.iter().map(Question::prompt).collect();
        assert_eq!(prompts, ["first?", "second?", "third?"]);
    }
}
