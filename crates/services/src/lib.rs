#![forbid(unsafe_code)]

pub mod answer_client;
pub mod app_services;
pub mod catalog;
pub mod console_service;
pub mod error;
pub mod progress_service;

pub use tutorial_core::Clock;

pub use answer_client::{AnswerChecker, AnswerClientConfig, HttpAnswerClient};
pub use app_services::AppServices;
pub use catalog::{LessonCatalog, LessonEntry, TopicEntry};
pub use console_service::{ConsoleService, Feedback, FeedbackTone, SubmissionOutcome};
pub use error::{AppServicesError, CatalogError, CheckAnswerError, ProgressServiceError};
pub use progress_service::{MarkOutcome, ProgressService, TopicProgress};
