//! URL convention shared by lesson pages and topic index pages.
//!
//! Lesson pages live at `/tutorial/{topic}/{lesson}`, index pages at
//! `/tutorial/{topic}`. Query strings and fragments are ignored.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::Error;
use crate::model::{LessonId, TopicId};

/// Topic used on lesson pages whose path carries no topic segment.
pub const DEFAULT_TOPIC: &str = "redis";

const TUTORIAL_SEGMENT: &str = "tutorial";

/// A parsed tutorial location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TutorialPath {
    Index { topic: TopicId },
    Lesson { topic: TopicId, lesson: LessonId },
}

impl TutorialPath {
    #[must_use]
    pub fn topic(&self) -> &TopicId {
        match self {
            TutorialPath::Index { topic } | TutorialPath::Lesson { topic, .. } => topic,
        }
    }

    #[must_use]
    pub fn lesson(&self) -> Option<&LessonId> {
        match self {
            TutorialPath::Index { .. } => None,
            TutorialPath::Lesson { lesson, .. } => Some(lesson),
        }
    }

    #[must_use]
    pub fn index_path(topic: &TopicId) -> String {
        format!("/{TUTORIAL_SEGMENT}/{topic}")
    }

    #[must_use]
    pub fn lesson_path(topic: &TopicId, lesson: &LessonId) -> String {
        format!("/{TUTORIAL_SEGMENT}/{topic}/{lesson}")
    }
}

impl fmt::Display for TutorialPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TutorialPath::Index { topic } => f.write_str(&Self::index_path(topic)),
            TutorialPath::Lesson { topic, lesson } => {
                f.write_str(&Self::lesson_path(topic, lesson))
            }
        }
    }
}

impl FromStr for TutorialPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = segments(s);
        match segments.as_slice() {
            [TUTORIAL_SEGMENT, topic] => Ok(TutorialPath::Index {
                topic: TopicId::new(*topic)?,
            }),
            [TUTORIAL_SEGMENT, topic, lesson] => Ok(TutorialPath::Lesson {
                topic: TopicId::new(*topic)?,
                lesson: LessonId::new(*lesson)?,
            }),
            _ => Err(Error::NotATutorialPath(s.to_string())),
        }
    }
}

/// Topic for an index page, or `None` when the path is not under `/tutorial/`.
#[must_use]
pub fn topic_for_index_page(path: &str) -> Option<TopicId> {
    match segments(path).as_slice() {
        [TUTORIAL_SEGMENT, topic, ..] => TopicId::new(*topic).ok(),
        _ => None,
    }
}

/// Topic for a lesson page, falling back to [`DEFAULT_TOPIC`].
#[must_use]
pub fn topic_for_lesson_page(path: &str) -> TopicId {
    topic_for_index_page(path).unwrap_or_else(default_topic)
}

/// The lesson id is the final path segment.
#[must_use]
pub fn lesson_from_path(path: &str) -> Option<LessonId> {
    segments(path)
        .last()
        .and_then(|segment| LessonId::new(*segment).ok())
}

/// Lesson id behind a lesson card link. Accepts absolute and root-relative
/// hrefs; links that do not point under `/tutorial/` yield `None`.
#[must_use]
pub fn lesson_from_href(href: &str) -> Option<LessonId> {
    let path = match Url::parse(href) {
        Ok(url) => url.path().to_string(),
        Err(_) => href.to_string(),
    };
    if !path.contains("/tutorial/") {
        return None;
    }
    lesson_from_path(&path)
}

#[must_use]
pub fn default_topic() -> TopicId {
    TopicId::from_static(DEFAULT_TOPIC)
}

fn segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}
