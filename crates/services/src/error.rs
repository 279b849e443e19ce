//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by an `AnswerChecker`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CheckAnswerError {
    /// The server answered with a non-success status.
    #[error("check-answer request failed with status {status}")]
    Server { status: u16, detail: Option<String> },
    /// The request never completed, or the response body could not be decoded.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while loading the lesson catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] toml::de::Error),
    #[error("duplicate topic in catalog: {0}")]
    DuplicateTopic(String),
    #[error("duplicate lesson {lesson} in topic {topic}")]
    DuplicateLesson { topic: String, lesson: String },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
