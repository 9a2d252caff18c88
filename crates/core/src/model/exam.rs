use serde::{Deserialize, Serialize};

/// One exam-generation result: a question paper and its answer key.
///
/// Both sides are opaque formatted text. Answer-key visibility is not part
/// of the content itself; it is governed by `session::ExamReveal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamContent {
    questions: String,
    answers: String,
}

impl ExamContent {
    #[must_use]
    pub fn new(questions: impl Into<String>, answers: impl Into<String>) -> Self {
        Self {
            questions: questions.into(),
            answers: answers.into(),
        }
    }

    #[must_use]
    pub fn questions(&self) -> &str {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &str {
        &self.answers
    }
}
