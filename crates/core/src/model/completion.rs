use serde_json::Value;
use thiserror::Error;

use crate::model::{LessonId, TopicId};

const PROGRESS_KEY_PREFIX: &str = "tutorial_progress_";

/// Persistence key holding the completion set of a topic.
#[must_use]
pub fn progress_key(topic: &TopicId) -> String {
    format!("{PROGRESS_KEY_PREFIX}{topic}")
}

/// Inverse of [`progress_key`], used when listing stored topics.
#[must_use]
pub fn topic_from_progress_key(key: &str) -> Option<TopicId> {
    key.strip_prefix(PROGRESS_KEY_PREFIX)
        .and_then(|topic| TopicId::new(topic).ok())
}

#[must_use]
pub fn progress_key_prefix() -> &'static str {
    PROGRESS_KEY_PREFIX
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompletionDecodeError {
    #[error("stored progress is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored progress is not a JSON array")]
    NotAnArray,
}

/// Lessons a user has completed for one topic, in completion order.
///
/// Membership is the only semantic: inserting an id that is already present
/// is a no-op, and nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionSet {
    lessons: Vec<LessonId>,
}

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_lessons(lessons: impl IntoIterator<Item = LessonId>) -> Self {
        let mut set = Self::new();
        for lesson in lessons {
            set.insert(lesson);
        }
        set
    }

    #[must_use]
    pub fn contains(&self, lesson: &LessonId) -> bool {
        self.lessons.contains(lesson)
    }

    /// Appends the lesson. Returns `false` if it was already present.
    pub fn insert(&mut self, lesson: LessonId) -> bool {
        if self.contains(&lesson) {
            return false;
        }
        self.lessons.push(lesson);
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LessonId> {
        self.lessons.iter()
    }

    /// Decode the stored JSON array.
    ///
    /// Entries that are not strings, or not valid lesson ids, are skipped;
    /// duplicates keep their first position.
    ///
    /// # Errors
    ///
    /// Returns `CompletionDecodeError` if the value is not a JSON array.
    pub fn decode(raw: &str) -> Result<Self, CompletionDecodeError> {
        let Value::Array(items) = serde_json::from_str::<Value>(raw)? else {
            return Err(CompletionDecodeError::NotAnArray);
        };
        let lessons = items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => LessonId::new(s).ok(),
                _ => None,
            });
        Ok(Self::from_lessons(lessons))
    }

    /// Encode as a JSON array of strings.
    #[must_use]
    pub fn encode(&self) -> String {
        let items: Vec<Value> = self
            .lessons
            .iter()
            .map(|lesson| Value::String(lesson.as_str().to_string()))
            .collect();
        Value::Array(items).to_string()
    }
}
