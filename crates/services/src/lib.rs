#![forbid(unsafe_code)]

pub mod api;
pub mod error;
pub mod exam_flow;
pub mod material;
pub mod quiz_flow;

pub use study_core::Clock;

pub use api::{ApiConfig, HttpStudyApi, StudyApi};
pub use error::{ApiError, ExamFlowError, MaterialQaError, QuizFlowError};
pub use exam_flow::ExamFlow;
pub use material::MaterialQaService;
pub use quiz_flow::{QuizFlow, SubmitOutcome, TopicSelection};
