use std::sync::Arc;

use chrono::{DateTime, Utc};

use study_core::Clock;
use study_core::model::{SessionContext, Topic};
use study_core::session::{Advance, ApplyOutcome, QuizProgress, QuizSession};

use crate::api::StudyApi;
use crate::error::QuizFlowError;

/// Outcome of a topic selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicSelection {
    /// Questions arrived and a fresh session is live at position 0.
    Loaded { total: usize },
    /// The topic was already selected; nothing was fetched.
    Unchanged,
    /// Selection cleared; no session remains.
    Cleared,
    /// The service has no questions for this topic.
    NoQuestions,
    /// A competing selection landed first; this response was discarded.
    Superseded,
}

/// Outcome of submitting an answer for grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The grader's verdict was applied to the current question.
    Graded { is_correct: bool },
    /// The response arrived after the session moved on and was discarded.
    Superseded,
}

/// Drives one learner's quiz-taking: topic selection, question traversal and
/// answer grading over the remote service.
///
/// All transitions happen on this value in response to user actions or
/// completed remote calls. Every remote response is checked against the
/// request's originating topic/question identity before it is applied; a
/// response that no longer matches is dropped without touching the session.
pub struct QuizFlow {
    clock: Clock,
    api: Arc<dyn StudyApi>,
    ctx: SessionContext,
    selected: Option<Topic>,
    session: Option<QuizSession>,
}

impl QuizFlow {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn StudyApi>, ctx: SessionContext) -> Self {
        Self {
            clock,
            api,
            ctx,
            selected: None,
            session: None,
        }
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    #[must_use]
    pub fn selected_topic(&self) -> Option<&Topic> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> Option<QuizProgress> {
        self.session.as_ref().map(QuizSession::progress)
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.session.as_ref().map(QuizSession::started_at)
    }

    /// Lists the topics available to this learner.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Api` on a failed listing.
    pub async fn topics(&self) -> Result<Vec<Topic>, QuizFlowError> {
        Ok(self.api.list_topics(&self.ctx).await?)
    }

    /// Switches the session to a topic, or clears it with `None`.
    ///
    /// Re-selecting the current topic is a no-op and fetches nothing. A new
    /// topic discards the previous session before fetching; should the fetch
    /// fail, the previous selection and session are restored so the caller
    /// can simply retry the selection.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Api` when the question fetch fails.
    pub async fn select_topic(
        &mut self,
        topic: Option<Topic>,
    ) -> Result<TopicSelection, QuizFlowError> {
        let Some(topic) = topic else {
            self.selected = None;
            self.session = None;
            return Ok(TopicSelection::Cleared);
        };

        if self.selected.as_ref() == Some(&topic) {
            return Ok(TopicSelection::Unchanged);
        }

        // Discard the old session up front; a stale grade response for it
        // can no longer match anything.
        let prev_selected = self.selected.take();
        let prev_session = self.session.take();
        self.selected = Some(topic.clone());

        let questions = match self.api.fetch_questions(&topic).await {
            Ok(questions) => questions,
            Err(err) => {
                tracing::warn!(topic = topic.name(), error = %err, "question fetch failed");
                self.selected = prev_selected;
                self.session = prev_session;
                return Err(err.into());
            }
        };

        // The fetch is tagged by its topic: only the selection that issued
        // it may install the result.
        if self.selected.as_ref() != Some(&topic) {
            tracing::debug!(topic = topic.name(), "stale question set discarded");
            return Ok(TopicSelection::Superseded);
        }

        match QuizSession::new(topic, questions, self.clock.now()) {
            Ok(session) => {
                let total = session.total();
                self.session = Some(session);
                Ok(TopicSelection::Loaded { total })
            }
            // Construction only fails on an empty set.
            Err(_) => {
                self.session = None;
                Ok(TopicSelection::NoQuestions)
            }
        }
    }

    /// Replaces the draft answer for the question on screen.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::NoSession` without a live session, or the
    /// cycle's lock error once an answer is submitted.
    pub fn edit_answer(&mut self, text: impl Into<String>) -> Result<(), QuizFlowError> {
        let session = self.session.as_mut().ok_or(QuizFlowError::NoSession)?;
        Ok(session.edit_answer(text)?)
    }

    /// Submits an answer for the current question and waits for the verdict.
    ///
    /// Exactly one grading request goes out; blank input is rejected before
    /// any network call. On transport failure the cycle reverts to an
    /// editable state with the submitted text preserved, and the error is
    /// surfaced as retryable.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::NoSession` without a live session, the
    /// cycle's validation errors, or `QuizFlowError::Api` on a failed call.
    pub async fn submit_answer(
        &mut self,
        answer: impl Into<String>,
    ) -> Result<SubmitOutcome, QuizFlowError> {
        let session = self.session.as_mut().ok_or(QuizFlowError::NoSession)?;
        let request = session.begin_evaluation(answer)?;

        match self
            .api
            .grade_answer(request.question(), request.answer())
            .await
        {
            Ok(evaluation) => {
                let is_correct = evaluation.is_correct();
                let Some(session) = self.session.as_mut() else {
                    tracing::debug!("grade response arrived with no session; dropped");
                    return Ok(SubmitOutcome::Superseded);
                };
                match session.apply_evaluation(&request, evaluation) {
                    ApplyOutcome::Applied => Ok(SubmitOutcome::Graded { is_correct }),
                    ApplyOutcome::Stale => {
                        tracing::debug!(
                            position = request.position(),
                            "stale grade response dropped"
                        );
                        Ok(SubmitOutcome::Superseded)
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "answer evaluation failed");
                if let Some(session) = self.session.as_mut() {
                    let _ = session.fail_evaluation(&request);
                }
                Err(err.into())
            }
        }
    }

    /// Moves to the next question once the current one is graded.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::NoSession` without a live session, or
    /// `SessionError::NotGraded` while a verdict is missing.
    pub fn advance(&mut self) -> Result<Advance, QuizFlowError> {
        let now = self.clock.now();
        let session = self.session.as_mut().ok_or(QuizFlowError::NoSession)?;
        Ok(session.advance(now)?)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
