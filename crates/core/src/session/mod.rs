mod cycle;
mod exam;
mod quiz;

// Public API of the session subsystem.
pub use cycle::{AnswerCycle, CycleError};
pub use exam::ExamReveal;
pub use quiz::{
    Advance, ApplyOutcome, EvaluationRequest, QuizProgress, QuizSession, SessionError,
};
