use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a tutorial topic, e.g. `redis`.
///
/// Topics are URL path segments, so they must be non-empty and free of `/`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicId(String);

impl TopicId {
    /// Creates a new `TopicId` from a path segment.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the value is empty or contains a path separator.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseIdError> {
        let value = value.into();
        check_segment(&value, "TopicId")?;
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(value.to_string())
    }
}

/// Identifier of a lesson within a topic, e.g. `00_setup`.
///
/// Equal to the last path segment of the lesson page URL.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonId(String);

impl LessonId {
    /// Creates a new `LessonId` from a path segment.
    ///
    /// # Errors
    ///
    /// Returns `ParseIdError` if the value is empty or contains a path separator.
    pub fn new(value: impl Into<String>) -> Result<Self, ParseIdError> {
        let value = value.into();
        check_segment(&value, "LessonId")?;
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_segment(value: &str, kind: &'static str) -> Result<(), ParseIdError> {
    if value.trim().is_empty() || value.contains('/') {
        return Err(ParseIdError {
            kind,
            raw: value.to_string(),
        });
    }
    Ok(())
}

/// Error type for ids that are not valid path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: &'static str,
    raw: String,
}

impl ParseIdError {
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.kind, self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Debug for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LessonId({})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TopicId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl FromStr for LessonId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TopicId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for LessonId {
    type Error = ParseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TopicId> for String {
    fn from(id: TopicId) -> Self {
        id.0
    }
}

impl From<LessonId> for String {
    fn from(id: LessonId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_id_display() {
        let id = TopicId::new("redis").unwrap();
        assert_eq!(id.to_string(), "redis");
    }

    #[test]
    fn lesson_id_from_str() {
        let id: LessonId = "00_setup".parse().unwrap();
        assert_eq!(id.as_str(), "00_setup");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(LessonId::new("").is_err());
        assert!(TopicId::new("   ").is_err());
    }

    #[test]
    fn rejects_path_separators() {
        let err = LessonId::new("redis/00_setup").unwrap_err();
        assert_eq!(err.raw(), "redis/00_setup");
        assert!(err.to_string().contains("LessonId"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = LessonId::new("01_strings").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"01_strings\"");
        let back: LessonId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn deserialize_rejects_invalid_segment() {
        let result = serde_json::from_str::<TopicId>("\"\"");
        assert!(result.is_err());
    }
}
