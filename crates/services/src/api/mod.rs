mod http;

pub use http::{ApiConfig, HttpStudyApi};

use async_trait::async_trait;

use study_core::model::{Evaluation, ExamContent, Question, QuestionSet, SessionContext, Topic};

use crate::error::ApiError;

/// Remote study service contract.
///
/// Each operation is one request/response exchange: the client issues
/// exactly one network attempt per call, with no retry or backoff, and
/// callers recover by re-invoking. All operations are idempotent from the
/// caller's perspective.
#[async_trait]
pub trait StudyApi: Send + Sync {
    /// List the topics the caller has question sets for.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on a non-success response or network failure.
    async fn list_topics(&self, ctx: &SessionContext) -> Result<Vec<Topic>, ApiError>;

    /// Fetch the ordered question set for a topic.
    ///
    /// An empty set is a valid response; interpreting it is left to the
    /// caller.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on a non-success response or network failure.
    async fn fetch_questions(&self, topic: &Topic) -> Result<QuestionSet, ApiError>;

    /// Grade a free-text answer against the question's expected answer.
    ///
    /// The service is the sole authority on correctness; nothing is graded
    /// client-side. The caller validates that `user_answer` is non-blank
    /// before calling.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on a non-success response or network failure.
    async fn grade_answer(
        &self,
        question: &Question,
        user_answer: &str,
    ) -> Result<Evaluation, ApiError>;

    /// Generate an exam paper and its answer key from study material.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on a non-success response or network failure.
    async fn generate_exam(&self, material: &str) -> Result<ExamContent, ApiError>;

    /// Answer a free question using only the given study material.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on a non-success response or network failure.
    async fn ask_material(&self, material: &str, question: &str) -> Result<String, ApiError>;
}
