use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::{Evaluation, Question, QuestionSet, Topic};

use super::cycle::{AnswerCycle, CycleError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no questions available for this topic")]
    EmptyQuestionSet,

    #[error("current question has not been graded yet")]
    NotGraded,

    #[error(transparent)]
    Cycle(#[from] CycleError),
}

//
// ─── EVALUATION TAGGING ────────────────────────────────────────────────────────
//

/// Identity tag and payload for one outstanding grading request.
///
/// Captured when the answer is submitted and checked again when the response
/// lands, so a response that outlives its question, topic or submission
/// attempt is discarded instead of applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRequest {
    topic: Topic,
    position: usize,
    attempt: u64,
    question: Question,
    answer: String,
}

impl EvaluationRequest {
    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// What became of a grading response once it was checked against the
/// session's live state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum ApplyOutcome {
    /// The response matched the outstanding request and took effect.
    Applied,
    /// The session had moved on; nothing changed.
    Stale,
}

/// Outcome of a permitted advance call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at the given position.
    Next(usize),
    /// The last question has been graded; the session is over.
    Complete,
}

//
// ─── QUIZ SESSION ──────────────────────────────────────────────────────────────
//

/// One topic's quiz traversal: the fetched questions, the position within
/// them, and the answer lifecycle for the question on screen.
///
/// Positions only ever move forward, one at a time, and only once the
/// current question has been graded. The whole session is a single value;
/// every transition replaces the relevant piece atomically.
pub struct QuizSession {
    topic: Topic,
    questions: QuestionSet,
    position: usize,
    cycle: AnswerCycle,
    attempt: u64,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Seeds a session at the first question with an idle answer cycle.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuestionSet` if there is nothing to ask.
    pub fn new(
        topic: Topic,
        questions: QuestionSet,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }

        Ok(Self {
            topic,
            questions,
            position: 0,
            cycle: AnswerCycle::idle(),
            attempt: 0,
            started_at,
            completed_at: None,
        })
    }

    #[must_use]
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total number of questions in this session.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn cycle(&self) -> &AnswerCycle {
        &self.cycle
    }

    /// The question on screen.
    ///
    /// Stays on the last question after completion so its feedback remains
    /// visible; only an empty set would have no current question, and that
    /// cannot be constructed.
    #[must_use]
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    /// Returns a snapshot of the traversal for a renderer.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let answered = self.position + usize::from(self.cycle.is_graded());
        QuizProgress {
            total: self.total(),
            position: self.position,
            answered,
            remaining: self.total().saturating_sub(answered),
            is_complete: self.is_complete(),
        }
    }

    /// Replaces the editable draft for the current question.
    ///
    /// # Errors
    ///
    /// Returns `CycleError` once the answer is locked by a submission.
    pub fn edit_answer(&mut self, text: impl Into<String>) -> Result<(), CycleError> {
        self.cycle.edit(text)
    }

    /// Submits the current answer and returns the tagged request to grade it
    /// with.
    ///
    /// The tag carries the topic, position and a per-session attempt counter;
    /// `apply_evaluation`/`fail_evaluation` only act on a response whose tag
    /// still matches, so late responses from superseded requests fall away.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Cycle(CycleError::EmptyAnswer)` for blank input
    /// with no state change (and therefore no request to send), and the other
    /// cycle errors per its submission rules.
    pub fn begin_evaluation(
        &mut self,
        answer: impl Into<String>,
    ) -> Result<EvaluationRequest, SessionError> {
        let Some(question) = self.questions.get(self.position) else {
            return Err(SessionError::EmptyQuestionSet);
        };
        let question = question.clone();

        let answer = answer.into();
        self.cycle.submit(answer.clone())?;
        self.attempt += 1;

        Ok(EvaluationRequest {
            topic: self.topic.clone(),
            position: self.position,
            attempt: self.attempt,
            question,
            answer,
        })
    }

    /// Applies a grading response if its tag still matches the live state.
    pub fn apply_evaluation(
        &mut self,
        request: &EvaluationRequest,
        evaluation: Evaluation,
    ) -> ApplyOutcome {
        if !self.is_current(request) {
            return ApplyOutcome::Stale;
        }
        match self.cycle.resolve(evaluation) {
            Ok(()) => ApplyOutcome::Applied,
            Err(_) => ApplyOutcome::Stale,
        }
    }

    /// Reverts to an editable state after a failed grading call, keeping the
    /// submitted text as the draft; stale failures are ignored the same way
    /// as stale responses.
    pub fn fail_evaluation(&mut self, request: &EvaluationRequest) -> ApplyOutcome {
        if !self.is_current(request) {
            return ApplyOutcome::Stale;
        }
        match self.cycle.reject() {
            Ok(()) => ApplyOutcome::Applied,
            Err(_) => ApplyOutcome::Stale,
        }
    }

    fn is_current(&self, request: &EvaluationRequest) -> bool {
        request.topic == self.topic
            && request.position == self.position
            && request.attempt == self.attempt
    }

    /// Moves to the next question, or reports completion at the end.
    ///
    /// Valid only once the current question is graded; the position never
    /// moves otherwise and never wraps. At the last question the session
    /// completes with the position unchanged, and repeated calls keep
    /// reporting completion.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotGraded` while the current question is still
    /// unanswered or pending.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, SessionError> {
        if !self.cycle.is_graded() {
            return Err(SessionError::NotGraded);
        }

        if self.position + 1 < self.questions.len() {
            self.position += 1;
            self.cycle.reset();
            Ok(Advance::Next(self.position))
        } else {
            if self.completed_at.is_none() {
                self.completed_at = Some(now);
            }
            Ok(Advance::Complete)
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("topic", &self.topic)
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("cycle", &self.cycle)
            .field("attempt", &self.attempt)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

/// Renderer-facing snapshot of traversal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub position: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
