use thiserror::Error;

use crate::model::Evaluation;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CycleError {
    #[error("answer cannot be empty")]
    EmptyAnswer,

    #[error("an evaluation is already in flight")]
    EvaluationPending,

    #[error("question has already been graded")]
    AlreadyGraded,

    #[error("no evaluation is in flight")]
    NotPending,
}

//
// ─── ANSWER CYCLE ──────────────────────────────────────────────────────────────
//

/// Lifecycle of the answer for the question currently on screen.
///
/// `Unanswered → Pending → Graded`, one consolidated value so a renderer can
/// never observe a half-updated intermediate state. The answer text is
/// editable only while unanswered; once submitted it is locked until the
/// verdict lands or the evaluation fails, and a failed evaluation hands the
/// text back as the draft so it can be resubmitted unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerCycle {
    Unanswered { draft: String },
    Pending { answer: String },
    Graded { answer: String, evaluation: Evaluation },
}

impl Default for AnswerCycle {
    fn default() -> Self {
        Self::idle()
    }
}

impl AnswerCycle {
    /// An unanswered cycle with an empty draft.
    #[must_use]
    pub fn idle() -> Self {
        Self::Unanswered {
            draft: String::new(),
        }
    }

    /// Replaces the editable draft.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::EvaluationPending` or `CycleError::AlreadyGraded`
    /// once the answer is locked; the lock lives here, not in the
    /// presentation layer.
    pub fn edit(&mut self, text: impl Into<String>) -> Result<(), CycleError> {
        match self {
            Self::Unanswered { draft } => {
                *draft = text.into();
                Ok(())
            }
            Self::Pending { .. } => Err(CycleError::EvaluationPending),
            Self::Graded { .. } => Err(CycleError::AlreadyGraded),
        }
    }

    /// Locks in an answer for grading.
    ///
    /// Whitespace-only input is rejected without a state change, so the
    /// caller issues no grading request for it. At most one evaluation is
    /// outstanding: submitting while pending is rejected.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::EmptyAnswer` for blank input,
    /// `CycleError::EvaluationPending` while a verdict is outstanding and
    /// `CycleError::AlreadyGraded` once one has landed.
    pub fn submit(&mut self, answer: impl Into<String>) -> Result<(), CycleError> {
        match self {
            Self::Unanswered { .. } => {
                let answer = answer.into();
                if answer.trim().is_empty() {
                    return Err(CycleError::EmptyAnswer);
                }
                *self = Self::Pending { answer };
                Ok(())
            }
            Self::Pending { .. } => Err(CycleError::EvaluationPending),
            Self::Graded { .. } => Err(CycleError::AlreadyGraded),
        }
    }

    /// Records the grader's verdict for the submitted answer.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::NotPending` unless an evaluation is in flight.
    pub fn resolve(&mut self, evaluation: Evaluation) -> Result<(), CycleError> {
        match self {
            Self::Pending { answer } => {
                let answer = std::mem::take(answer);
                *self = Self::Graded { answer, evaluation };
                Ok(())
            }
            _ => Err(CycleError::NotPending),
        }
    }

    /// Abandons the in-flight evaluation, keeping the submitted text as the
    /// draft so the learner can resubmit it.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::NotPending` unless an evaluation is in flight.
    pub fn reject(&mut self) -> Result<(), CycleError> {
        match self {
            Self::Pending { answer } => {
                let draft = std::mem::take(answer);
                *self = Self::Unanswered { draft };
                Ok(())
            }
            _ => Err(CycleError::NotPending),
        }
    }

    /// Resets to an empty, editable state for a new question.
    pub fn reset(&mut self) {
        *self = Self::idle();
    }

    #[must_use]
    pub fn is_unanswered(&self) -> bool {
        matches!(self, Self::Unanswered { .. })
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    #[must_use]
    pub fn is_graded(&self) -> bool {
        matches!(self, Self::Graded { .. })
    }

    /// The draft or submitted text, whichever state the cycle is in.
    #[must_use]
    pub fn answer_text(&self) -> &str {
        match self {
            Self::Unanswered { draft } => draft,
            Self::Pending { answer } | Self::Graded { answer, .. } => answer,
        }
    }

    #[must_use]
    pub fn evaluation(&self) -> Option<&Evaluation> {
        match self {
            Self::Graded { evaluation, .. } => Some(evaluation),
            _ => None,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unanswered_with_empty_draft() {
        let cycle = AnswerCycle::idle();
        assert!(cycle.is_unanswered());
        assert_eq!(cycle.answer_text(), "");
        assert!(cycle.evaluation().is_none());
    }

    #[test]
    fn edit_updates_the_draft() {
        let mut cycle = AnswerCycle::idle();
        cycle.edit("the duodenum").unwrap();
        assert_eq!(cycle.answer_text(), "the duodenum");
    }

    #[test]
    fn blank_submit_is_rejected_without_a_state_change() {
        let mut cycle = AnswerCycle::idle();
        cycle.edit("kept").unwrap();

        assert_eq!(cycle.submit("").unwrap_err(), CycleError::EmptyAnswer);
        assert_eq!(cycle.submit(" \t\n").unwrap_err(), CycleError::EmptyAnswer);

        assert!(cycle.is_unanswered());
        assert_eq!(cycle.answer_text(), "kept");
    }

    #[test]
    fn submit_locks_the_answer() {
        let mut cycle = AnswerCycle::idle();
        cycle.submit("four").unwrap();

        assert!(cycle.is_pending());
        assert_eq!(cycle.answer_text(), "four");
        assert_eq!(cycle.edit("five").unwrap_err(), CycleError::EvaluationPending);
        assert_eq!(cycle.submit("five").unwrap_err(), CycleError::EvaluationPending);
    }

    #[test]
    fn resolve_stores_the_verdict_and_keeps_the_lock() {
        let mut cycle = AnswerCycle::idle();
        cycle.submit("four").unwrap();
        cycle.resolve(Evaluation::new("well done", true)).unwrap();

        assert!(cycle.is_graded());
        assert_eq!(cycle.answer_text(), "four");
        let evaluation = cycle.evaluation().unwrap();
        assert!(evaluation.is_correct());
        assert_eq!(evaluation.feedback(), "well done");

        assert_eq!(cycle.submit("again").unwrap_err(), CycleError::AlreadyGraded);
        assert_eq!(cycle.edit("again").unwrap_err(), CycleError::AlreadyGraded);
    }

    #[test]
    fn reject_hands_the_answer_back_as_draft() {
        let mut cycle = AnswerCycle::idle();
        cycle.submit("four").unwrap();
        cycle.reject().unwrap();

        assert!(cycle.is_unanswered());
        assert_eq!(cycle.answer_text(), "four");

        // Recoverable: the same text can go straight back out.
        cycle.submit("four").unwrap();
        assert!(cycle.is_pending());
    }

    #[test]
    fn resolve_and_reject_require_a_pending_evaluation() {
        let mut cycle = AnswerCycle::idle();
        assert_eq!(
            cycle.resolve(Evaluation::new("nope", false)).unwrap_err(),
            CycleError::NotPending
        );
        assert_eq!(cycle.reject().unwrap_err(), CycleError::NotPending);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut cycle = AnswerCycle::idle();
        cycle.submit("four").unwrap();
        cycle.resolve(Evaluation::new("ok", true)).unwrap();

        cycle.reset();
        assert!(cycle.is_unanswered());
        assert_eq!(cycle.answer_text(), "");
        assert!(cycle.evaluation().is_none());
    }
}
