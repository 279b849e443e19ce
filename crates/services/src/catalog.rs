//! Lesson catalog: the topics and lesson cards the client lists.
//!
//! Loaded from TOML. A built-in catalog ships with the binary and is used
//! unless `TUTORIAL_CATALOG` or `--catalog` points elsewhere.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::info;
use tutorial_core::model::{ConsoleMode, LessonId, TopicId};

use crate::error::CatalogError;

const BUILTIN_CATALOG: &str = include_str!("../catalog/default.toml");

/// Label on lesson cards that have not been restyled as completed.
pub const START_LESSON_LABEL: &str = "Start Lesson";

#[derive(Clone, Debug, Default, Deserialize)]
pub struct LessonCatalog {
    #[serde(default)]
    topics: Vec<TopicEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TopicEntry {
    pub id: TopicId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub lessons: Vec<LessonEntry>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LessonEntry {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub mode: ConsoleMode,
    /// Multi-line inputs submit on Ctrl/Cmd+Enter instead of Enter.
    #[serde(default)]
    pub multiline: bool,
    #[serde(default = "default_button_label")]
    pub button_label: String,
}

fn default_button_label() -> String {
    START_LESSON_LABEL.to_string()
}

impl LessonCatalog {
    /// The catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded TOML is invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// # Errors
    ///
    /// Returns `CatalogError` on TOML errors, invalid ids or duplicate entries.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&raw)?;
        info!(
            target: "catalog",
            path = %path.display(),
            topics = catalog.topics.len(),
            "loaded lesson catalog"
        );
        Ok(catalog)
    }

    /// Load from `path` when given, otherwise use the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the chosen catalog cannot be loaded.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    #[must_use]
    pub fn topics(&self) -> &[TopicEntry] {
        &self.topics
    }

    #[must_use]
    pub fn topic(&self, id: &TopicId) -> Option<&TopicEntry> {
        self.topics.iter().find(|topic| &topic.id == id)
    }

    #[must_use]
    pub fn lesson(&self, topic: &TopicId, lesson: &LessonId) -> Option<&LessonEntry> {
        self.topic(topic)?.lesson(lesson)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut topics = HashSet::new();
        for topic in &self.topics {
            if !topics.insert(&topic.id) {
                return Err(CatalogError::DuplicateTopic(topic.id.to_string()));
            }
            let mut lessons = HashSet::new();
            for lesson in &topic.lessons {
                if !lessons.insert(&lesson.id) {
                    return Err(CatalogError::DuplicateLesson {
                        topic: topic.id.to_string(),
                        lesson: lesson.id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl TopicEntry {
    #[must_use]
    pub fn lesson(&self, id: &LessonId) -> Option<&LessonEntry> {
        self.lessons.iter().find(|lesson| &lesson.id == id)
    }
}
