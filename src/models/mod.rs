pub mod chat_model;
pub mod progress;
pub mod question;
pub mod summary;

pub use chat_model::ChatModel;
pub use progress::{ProgressEvent, ProgressSink, ProgressState, RunOutcome};
pub use question::QuestionList;
pub use summary::RunSummary;
