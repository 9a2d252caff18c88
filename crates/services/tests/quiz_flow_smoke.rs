use std::sync::Arc;

use async_trait::async_trait;

use services::{ApiError, Clock, QuizFlow, StudyApi, SubmitOutcome, TopicSelection};
use study_core::model::{
    Evaluation, ExamContent, Question, QuestionSet, SessionContext, Topic, UserId,
};
use study_core::session::Advance;
use study_core::time::fixed_now;

struct ScriptedApi;

#[async_trait]
impl StudyApi for ScriptedApi {
    async fn list_topics(&self, _ctx: &SessionContext) -> Result<Vec<Topic>, ApiError> {
        Ok(vec![Topic::new("digestion").unwrap()])
    }

    async fn fetch_questions(&self, topic: &Topic) -> Result<QuestionSet, ApiError> {
        assert_eq!(topic.name(), "digestion");
        Ok(QuestionSet::new(vec![
            Question::new("Name the three parts of the small intestine.", "Duodenum, jejunum, ileum.").unwrap(),
            Question::new("What is the cecum?", "The first part of the large intestine.").unwrap(),
        ]))
    }

    async fn grade_answer(
        &self,
        question: &Question,
        user_answer: &str,
    ) -> Result<Evaluation, ApiError> {
        let is_correct = user_answer == question.expected_answer();
        Ok(Evaluation::new(
            if is_correct { "Spot on." } else { "Not quite." },
            is_correct,
        ))
    }

    async fn generate_exam(&self, _material: &str) -> Result<ExamContent, ApiError> {
        Ok(ExamContent::new("questions", "answers"))
    }

    async fn ask_material(&self, _material: &str, _question: &str) -> Result<String, ApiError> {
        Ok("answer".to_string())
    }
}

#[tokio::test]
async fn quiz_flow_runs_a_topic_to_completion() {
    let ctx = SessionContext::new(UserId::new());
    let mut flow = QuizFlow::new(Clock::fixed(fixed_now()), Arc::new(ScriptedApi), ctx);

    let topics = flow.topics().await.unwrap();
    let outcome = flow.select_topic(Some(topics[0].clone())).await.unwrap();
    assert_eq!(outcome, TopicSelection::Loaded { total: 2 });

    // First question: a wrong answer still grades and advances.
    let outcome = flow.submit_answer("The ileum only.").await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Graded { is_correct: false });
    assert_eq!(flow.advance().unwrap(), Advance::Next(1));

    // Second question: correct, and the session completes.
    let outcome = flow
        .submit_answer("The first part of the large intestine.")
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Graded { is_correct: true });
    assert_eq!(flow.advance().unwrap(), Advance::Complete);

    let session = flow.session().unwrap();
    assert!(session.is_complete());
    assert_eq!(session.completed_at(), Some(fixed_now()));
    assert_eq!(session.position(), 1);

    // Completion is terminal for this set; only re-selection restarts it.
    assert_eq!(flow.advance().unwrap(), Advance::Complete);
}
