use std::sync::Arc;

use tracing::{error, info};
use tutorial_core::model::{
    CheckAnswerRequest, CheckAnswerResponse, ConsoleMode, LessonId, TopicId, normalize_command,
};

use crate::answer_client::AnswerChecker;
use crate::error::CheckAnswerError;
use crate::progress_service::{MarkOutcome, ProgressService};

const SERVER_ERROR_PREFIX: &str = "Server error: ";
const UNKNOWN_SERVER_ERROR: &str = "Unknown error";
const CONNECTION_ERROR_PREFIX: &str = "Error connecting to server: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTone {
    Success,
    Error,
}

impl FeedbackTone {
    /// CSS class applied to the feedback region.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            FeedbackTone::Success => "success",
            FeedbackTone::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub tone: FeedbackTone,
}

impl Feedback {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: FeedbackTone::Success,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tone: FeedbackTone::Error,
        }
    }
}

/// What the console should render after one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Blank input. Nothing was sent.
    Rejected { feedback: Feedback },
    /// The server evaluated the command.
    Answered {
        output: String,
        feedback: Option<Feedback>,
        /// Flash the input border; set for correct graded answers.
        highlight: bool,
        /// `None` when the lesson was not marked, or marking failed.
        completion: Option<MarkOutcome>,
    },
    /// Server-reported or transport failure. Output is left untouched.
    Failed { feedback: Feedback },
}

impl SubmissionOutcome {
    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        match self {
            SubmissionOutcome::Rejected { feedback } | SubmissionOutcome::Failed { feedback } => {
                Some(feedback)
            }
            SubmissionOutcome::Answered { feedback, .. } => feedback.as_ref(),
        }
    }

    #[must_use]
    pub fn output(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Answered { output, .. } => Some(output),
            _ => None,
        }
    }

    #[must_use]
    pub fn newly_completed(&self) -> bool {
        matches!(
            self,
            SubmissionOutcome::Answered {
                completion: Some(MarkOutcome::NewlyCompleted),
                ..
            }
        )
    }
}

/// Runs a console submission: validation, the answer check and completion
/// marking.
#[derive(Clone)]
pub struct ConsoleService {
    checker: Arc<dyn AnswerChecker>,
    progress: Arc<ProgressService>,
}

impl ConsoleService {
    #[must_use]
    pub fn new(checker: Arc<dyn AnswerChecker>, progress: Arc<ProgressService>) -> Self {
        Self { checker, progress }
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    /// Submit `raw_command` for `lesson`. Every failure is folded into the
    /// returned outcome as a user-facing message.
    pub async fn submit(
        &self,
        mode: ConsoleMode,
        topic: &TopicId,
        lesson: &LessonId,
        raw_command: &str,
    ) -> SubmissionOutcome {
        let Some(command) = normalize_command(raw_command) else {
            return SubmissionOutcome::Rejected {
                feedback: Feedback::error(mode.empty_input_message()),
            };
        };

        let request = CheckAnswerRequest {
            command: command.to_string(),
            topic: topic.clone(),
            lesson: lesson.clone(),
        };

        match self.checker.check(&request).await {
            Ok(response) => self.answered(mode, topic, lesson, response).await,
            Err(CheckAnswerError::Server { detail, .. }) => SubmissionOutcome::Failed {
                feedback: Feedback::error(format!(
                    "{SERVER_ERROR_PREFIX}{}",
                    detail.as_deref().unwrap_or(UNKNOWN_SERVER_ERROR)
                )),
            },
            Err(err) => {
                error!(target: "console", %topic, %lesson, error = %err, "check-answer request failed");
                SubmissionOutcome::Failed {
                    feedback: Feedback::error(format!("{CONNECTION_ERROR_PREFIX}{err}")),
                }
            }
        }
    }

    async fn answered(
        &self,
        mode: ConsoleMode,
        topic: &TopicId,
        lesson: &LessonId,
        response: CheckAnswerResponse,
    ) -> SubmissionOutcome {
        let correct = response.is_correct();
        let (feedback, completes) = match mode {
            ConsoleMode::Chat => (None, true),
            ConsoleMode::Check => {
                let feedback = response
                    .feedback_message
                    .filter(|message| !message.trim().is_empty())
                    .map(|message| {
                        if correct {
                            Feedback::success(message)
                        } else {
                            Feedback::error(message)
                        }
                    });
                (feedback, correct)
            }
        };

        let completion = if completes {
            self.mark(topic, lesson).await
        } else {
            None
        };

        SubmissionOutcome::Answered {
            output: response.output,
            feedback,
            highlight: mode.grades_answers() && correct,
            completion,
        }
    }

    async fn mark(&self, topic: &TopicId, lesson: &LessonId) -> Option<MarkOutcome> {
        match self.progress.mark_completed(topic, lesson).await {
            Ok(outcome) => {
                if outcome.is_new() {
                    info!(target: "console", %topic, %lesson, "submission completed lesson");
                }
                Some(outcome)
            }
            Err(err) => {
                error!(target: "console", %topic, %lesson, error = %err, "failed to record completion");
                None
            }
        }
    }
}

