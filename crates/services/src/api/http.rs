use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use study_core::model::{Evaluation, ExamContent, Question, QuestionSet, SessionContext, Topic};

use super::StudyApi;
use crate::error::ApiError;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Where the study service lives.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Creates a config for the given base url.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BaseUrl` if the url does not parse.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        Url::parse(&base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Reads the base url from `STUDY_API_BASE_URL`, defaulting to the local
    /// development server.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BaseUrl` if the configured url does not parse.
    pub fn from_env() -> Result<Self, ApiError> {
        let base_url = env::var("STUDY_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        Self::new(base_url)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// `StudyApi` over HTTP.
///
/// One network attempt per call; retries are the caller's decision.
#[derive(Clone)]
pub struct HttpStudyApi {
    client: Client,
    config: ApiConfig,
}

impl HttpStudyApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url)
    }
}

#[async_trait]
impl StudyApi for HttpStudyApi {
    async fn list_topics(&self, ctx: &SessionContext) -> Result<Vec<Topic>, ApiError> {
        let url = self.endpoint(&format!("topics/{}", ctx.user()));
        tracing::debug!(user = %ctx.user(), "listing topics");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }

        let body: TopicsResponse = response.json().await?;
        body.topics
            .into_iter()
            .map(|name| Topic::new(name).map_err(|err| ApiError::Payload(err.to_string())))
            .collect()
    }

    async fn fetch_questions(&self, topic: &Topic) -> Result<QuestionSet, ApiError> {
        let url = self.endpoint(&format!("quiz/{}", topic.name()));
        tracing::debug!(topic = topic.name(), "fetching questions");

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }

        let body: QuizResponse = response.json().await?;
        let questions = body
            .questions
            .into_iter()
            .map(|item| {
                Question::new(item.question, item.answer)
                    .map_err(|err| ApiError::Payload(err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(QuestionSet::new(questions))
    }

    async fn grade_answer(
        &self,
        question: &Question,
        user_answer: &str,
    ) -> Result<Evaluation, ApiError> {
        let payload = CheckAnswerRequest {
            question: question.prompt(),
            expected_answer: question.expected_answer(),
            user_answer,
        };
        tracing::debug!("requesting answer evaluation");

        let response = self
            .client
            .post(self.endpoint("check-answer"))
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }

        let body: CheckAnswerResponse = response.json().await?;
        Ok(Evaluation::new(body.feedback, body.is_correct))
    }

    async fn generate_exam(&self, material: &str) -> Result<ExamContent, ApiError> {
        let payload = GenerateExamRequest { text: material };
        tracing::debug!("requesting exam generation");

        let response = self
            .client
            .post(self.endpoint("generate-exam"))
            .form(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }

        let body: GenerateExamResponse = response.json().await?;
        Ok(ExamContent::new(body.questions, body.answers))
    }

    async fn ask_material(&self, material: &str, question: &str) -> Result<String, ApiError> {
        let payload = AskMaterialRequest {
            text: material,
            question,
        };
        tracing::debug!("asking a question about material");

        let response = self
            .client
            .post(self.endpoint("answer-question"))
            .form(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }

        let body: AskMaterialResponse = response.json().await?;
        Ok(body.answer.trim().to_string())
    }
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct TopicsResponse {
    topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct QuizResponse {
    questions: Vec<QuizItem>,
}

#[derive(Debug, Deserialize)]
struct QuizItem {
    question: String,
    answer: String,
}

#[derive(Debug, Serialize)]
struct CheckAnswerRequest<'a> {
    question: &'a str,
    expected_answer: &'a str,
    user_answer: &'a str,
}

#[derive(Debug, Deserialize)]
struct CheckAnswerResponse {
    feedback: String,
    is_correct: bool,
}

#[derive(Debug, Serialize)]
struct GenerateExamRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateExamResponse {
    questions: String,
    answers: String,
}

#[derive(Debug, Serialize)]
struct AskMaterialRequest<'a> {
    text: &'a str,
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct AskMaterialResponse {
    answer: String,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
