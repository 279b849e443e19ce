use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{LessonId, TopicId};

/// Body of `POST /api/check-answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAnswerRequest {
    pub command: String,
    pub topic: TopicId,
    pub lesson: LessonId,
}

/// Successful response of `POST /api/check-answer`.
///
/// `feedback_message` and `is_correct` are only sent for graded lessons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckAnswerResponse {
    #[serde(default)]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckAnswerResponse {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct.unwrap_or(false)
    }
}

/// Error body of a non-OK response.
///
/// `detail` is usually a string, but request validation failures carry a
/// structured list instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ServerErrorBody {
    #[must_use]
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}
