//! Shared error types for the services crate.

use thiserror::Error;

use study_core::session::{CycleError, SessionError};

/// Errors emitted by the remote study service client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),

    #[error("study service request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("study service returned an invalid payload: {0}")]
    Payload(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `QuizFlow`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizFlowError {
    #[error("no quiz session is active")]
    NoSession,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `ExamFlow`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamFlowError {
    #[error("study material cannot be empty")]
    EmptyMaterial,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `MaterialQaService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MaterialQaError {
    #[error("study material cannot be empty")]
    EmptyMaterial,

    #[error("question cannot be empty")]
    EmptyQuestion,

    #[error(transparent)]
    Api(#[from] ApiError),
}
