use std::sync::Arc;

use study_core::model::ExamContent;
use study_core::session::ExamReveal;

use crate::api::StudyApi;
use crate::error::ExamFlowError;

/// Drives the exam page: generate a paper from pasted material, then toggle
/// the answer key.
pub struct ExamFlow {
    api: Arc<dyn StudyApi>,
    reveal: ExamReveal,
}

impl ExamFlow {
    #[must_use]
    pub fn new(api: Arc<dyn StudyApi>) -> Self {
        Self {
            api,
            reveal: ExamReveal::new(),
        }
    }

    /// Generates a fresh exam from the given material.
    ///
    /// New content always lands with the answer key hidden, even when the
    /// previous key was revealed. A failed call leaves the previous exam and
    /// its visibility untouched.
    ///
    /// # Errors
    ///
    /// Returns `ExamFlowError::EmptyMaterial` for blank input (no request is
    /// made) and `ExamFlowError::Api` when generation fails.
    pub async fn generate(&mut self, material: &str) -> Result<(), ExamFlowError> {
        if material.trim().is_empty() {
            return Err(ExamFlowError::EmptyMaterial);
        }

        let content = match self.api.generate_exam(material).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(error = %err, "exam generation failed");
                return Err(err.into());
            }
        };

        self.reveal.set_content(content);
        Ok(())
    }

    /// Flips answer-key visibility; a no-op until an exam exists.
    ///
    /// Returns whether the key is visible afterwards.
    pub fn toggle_answers(&mut self) -> bool {
        self.reveal.toggle()
    }

    #[must_use]
    pub fn content(&self) -> Option<&ExamContent> {
        self.reveal.content()
    }

    #[must_use]
    pub fn answers_visible(&self) -> bool {
        self.reveal.answers_visible()
    }

    #[must_use]
    pub fn visible_answers(&self) -> Option<&str> {
        self.reveal.visible_answers()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use study_core::model::{Evaluation, Question, QuestionSet, SessionContext, Topic};

    use crate::error::ApiError;

    #[derive(Default)]
    struct FakeApi {
        fail_generate: AtomicBool,
        generate_calls: AtomicUsize,
    }

    #[async_trait]
    impl StudyApi for FakeApi {
        async fn list_topics(&self, _ctx: &SessionContext) -> Result<Vec<Topic>, ApiError> {
            Ok(Vec::new())
        }

        async fn fetch_questions(&self, _topic: &Topic) -> Result<QuestionSet, ApiError> {
            Ok(QuestionSet::default())
        }

        async fn grade_answer(
            &self,
            _question: &Question,
            _user_answer: &str,
        ) -> Result<Evaluation, ApiError> {
            Ok(Evaluation::new("fine", true))
        }

        async fn generate_exam(&self, material: &str) -> Result<ExamContent, ApiError> {
            let call = self.generate_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_generate.load(Ordering::SeqCst) {
                return Err(ApiError::HttpStatus(
                    reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                ));
            }
            Ok(ExamContent::new(
                format!("paper #{call} from: {material}"),
                format!("key #{call}"),
            ))
        }

        async fn ask_material(&self, _material: &str, _question: &str) -> Result<String, ApiError> {
            Ok("answer".to_string())
        }
    }

    fn flow() -> (ExamFlow, Arc<FakeApi>) {
        let api = Arc::new(FakeApi::default());
        (ExamFlow::new(api.clone()), api)
    }

    #[tokio::test]
    async fn blank_material_is_rejected_without_a_request() {
        let (mut exam, api) = flow();

        let err = exam.generate("   ").await.unwrap_err();
        assert!(matches!(err, ExamFlowError::EmptyMaterial));
        assert_eq!(api.generate_calls.load(Ordering::SeqCst), 0);
        assert!(exam.content().is_none());
    }

    #[tokio::test]
    async fn generated_content_starts_hidden() {
        let (mut exam, _api) = flow();

        exam.generate("the digestive system").await.unwrap();
        assert!(exam.content().is_some());
        assert!(!exam.answers_visible());

        assert!(exam.toggle_answers());
        assert_eq!(exam.visible_answers(), Some("key #1"));
    }

    #[tokio::test]
    async fn regenerating_rehides_a_revealed_key() {
        let (mut exam, _api) = flow();

        exam.generate("material").await.unwrap();
        assert!(exam.toggle_answers());

        exam.generate("material, revised").await.unwrap();
        assert!(!exam.answers_visible());
        assert!(exam.visible_answers().is_none());
        assert_eq!(exam.content().unwrap().answers(), "key #2");
    }

    #[tokio::test]
    async fn toggling_without_an_exam_is_a_noop() {
        let (mut exam, _api) = flow();
        assert!(!exam.toggle_answers());
        assert!(!exam.answers_visible());
    }

    #[tokio::test]
    async fn failed_generation_keeps_the_previous_exam() {
        let (mut exam, api) = flow();

        exam.generate("material").await.unwrap();
        assert!(exam.toggle_answers());
        api.fail_generate.store(true, Ordering::SeqCst);

        let err = exam.generate("newer material").await.unwrap_err();
        assert!(matches!(err, ExamFlowError::Api(_)));
        assert_eq!(exam.content().unwrap().answers(), "key #1");
        assert!(exam.answers_visible());
    }
}
