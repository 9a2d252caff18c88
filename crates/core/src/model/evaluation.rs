use serde::{Deserialize, Serialize};

/// The grader's verdict and free-text feedback for one submitted answer.
///
/// Produced once per submission by the remote service, which is the sole
/// authority on correctness. Discarded on advance or topic change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    feedback: String,
    is_correct: bool,
}

impl Evaluation {
    #[must_use]
    pub fn new(feedback: impl Into<String>, is_correct: bool) -> Self {
        Self {
            feedback: feedback.into(),
            is_correct,
        }
    }

    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}
