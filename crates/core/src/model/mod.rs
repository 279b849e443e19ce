mod answer;
mod completion;
mod console;
mod ids;
pub mod path;
mod progress;

pub use answer::{CheckAnswerRequest, CheckAnswerResponse, ServerErrorBody};
pub use completion::{
    CompletionDecodeError, CompletionSet, progress_key, progress_key_prefix,
    topic_from_progress_key,
};
pub use console::{ConsoleMode, normalize_command};
pub use ids::{LessonId, ParseIdError, TopicId};
pub use path::TutorialPath;
pub use progress::ProgressSummary;
