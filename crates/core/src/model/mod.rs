mod context;
mod evaluation;
mod exam;
mod question;
mod topic;

pub use context::{ParseUserIdError, SessionContext, UserId};
pub use evaluation::Evaluation;
pub use exam::ExamContent;
pub use question::{Question, QuestionError, QuestionSet};
pub use topic::{Topic, TopicError};
