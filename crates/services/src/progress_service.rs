use std::sync::Arc;

use storage::repository::KeyValueStore;
use tracing::{debug, info, warn};
use tutorial_core::model::{
    CompletionSet, LessonId, ProgressSummary, TopicId, progress_key, progress_key_prefix,
    topic_from_progress_key,
};

use crate::error::ProgressServiceError;

/// Result of marking a lesson completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    NewlyCompleted,
    AlreadyCompleted,
}

impl MarkOutcome {
    #[must_use]
    pub fn is_new(self) -> bool {
        matches!(self, MarkOutcome::NewlyCompleted)
    }
}

/// Progress of one topic as shown on its index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicProgress {
    pub topic: TopicId,
    pub completed: CompletionSet,
    pub summary: ProgressSummary,
}

/// Persists which lessons the user has completed, one set per topic.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn KeyValueStore>,
}

impl ProgressService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Completed lessons of `topic`.
    ///
    /// A missing entry is an empty set. So is an entry that cannot be decoded;
    /// it is logged and left in place until the next completion overwrites it.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the store cannot be read.
    pub async fn completed(&self, topic: &TopicId) -> Result<CompletionSet, ProgressServiceError> {
        let Some(raw) = self.store.get(&progress_key(topic)).await? else {
            return Ok(CompletionSet::new());
        };
        match CompletionSet::decode(&raw) {
            Ok(set) => Ok(set),
            Err(err) => {
                warn!(target: "progress", %topic, error = %err, "ignoring malformed stored progress");
                Ok(CompletionSet::new())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the store cannot be read.
    pub async fn is_completed(
        &self,
        topic: &TopicId,
        lesson: &LessonId,
    ) -> Result<bool, ProgressServiceError> {
        Ok(self.completed(topic).await?.contains(lesson))
    }

    /// Add `lesson` to the completion set of `topic`.
    ///
    /// Writes only when the lesson was not already present, so repeated
    /// completions leave the stored value untouched.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the store cannot be read or written.
    pub async fn mark_completed(
        &self,
        topic: &TopicId,
        lesson: &LessonId,
    ) -> Result<MarkOutcome, ProgressServiceError> {
        let mut set = self.completed(topic).await?;
        if !set.insert(lesson.clone()) {
            debug!(target: "progress", %topic, %lesson, "lesson already completed");
            return Ok(MarkOutcome::AlreadyCompleted);
        }
        self.store.set(&progress_key(topic), &set.encode()).await?;
        info!(target: "progress", %topic, %lesson, completed = set.len(), "lesson completed");
        Ok(MarkOutcome::NewlyCompleted)
    }

    /// Summary for an index page listing `total_lessons` cards.
    ///
    /// The completed count is the size of the stored set, which may include
    /// lessons the page no longer lists.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the store cannot be read.
    pub async fn topic_progress(
        &self,
        topic: &TopicId,
        total_lessons: usize,
    ) -> Result<TopicProgress, ProgressServiceError> {
        let completed = self.completed(topic).await?;
        let summary = ProgressSummary::compute(completed.len(), total_lessons);
        Ok(TopicProgress {
            topic: topic.clone(),
            completed,
            summary,
        })
    }

    /// Topics that have a stored completion entry, in key order.
    ///
    /// # Errors
    ///
    /// Returns `ProgressServiceError` if the store cannot be read.
    pub async fn stored_topics(&self) -> Result<Vec<TopicId>, ProgressServiceError> {
        let keys = self.store.keys_with_prefix(progress_key_prefix()).await?;
        Ok(keys
            .iter()
            .filter_map(|key| topic_from_progress_key(key))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryStore;

    fn topic(id: &str) -> TopicId {
        TopicId::new(id).unwrap()
    }

    fn lesson(id: &str) -> LessonId {
        LessonId::new(id).unwrap()
    }

    fn service() -> (ProgressService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        (ProgressService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn unseen_topic_is_empty() {
        let (service, _) = service();
        let set = service.completed(&topic("redis")).await.unwrap();
        assert!(set.is_empty());
        assert!(!service.is_completed(&topic("redis"), &lesson("00_setup")).await.unwrap());
    }

    #[tokio::test]
    async fn mark_completed_persists_json_array() {
        let (service, store) = service();
        let outcome = service
            .mark_completed(&topic("redis"), &lesson("00_setup"))
            .await
            .unwrap();
        assert_eq!(outcome, MarkOutcome::NewlyCompleted);
        assert_eq!(
            store.get("tutorial_progress_redis").await.unwrap().as_deref(),
            Some(r#"["00_setup"]"#)
        );
    }

    #[tokio::test]
    async fn second_mark_is_a_no_op() {
        let (service, store) = service();
        let redis = topic("redis");
        service.mark_completed(&redis, &lesson("00_setup")).await.unwrap();
        service.mark_completed(&redis, &lesson("01_strings")).await.unwrap();
        let outcome = service.mark_completed(&redis, &lesson("00_setup")).await.unwrap();
        assert_eq!(outcome, MarkOutcome::AlreadyCompleted);
        assert_eq!(
            store.get("tutorial_progress_redis").await.unwrap().as_deref(),
            Some(r#"["00_setup","01_strings"]"#)
        );
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let (service, _) = service();
        service.mark_completed(&topic("redis"), &lesson("01")).await.unwrap();
        assert!(!service.is_completed(&topic("sql"), &lesson("01")).await.unwrap());
        assert!(service.is_completed(&topic("redis"), &lesson("01")).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_entry_reads_as_empty_and_is_repaired_on_write() {
        let (service, store) = service();
        store.set("tutorial_progress_redis", "{not json").await.unwrap();

        assert!(service.completed(&topic("redis")).await.unwrap().is_empty());

        service.mark_completed(&topic("redis"), &lesson("02_lists")).await.unwrap();
        assert_eq!(
            store.get("tutorial_progress_redis").await.unwrap().as_deref(),
            Some(r#"["02_lists"]"#)
        );
    }

    #[tokio::test]
    async fn topic_progress_counts_stored_lessons() {
        let (service, _) = service();
        let redis = topic("redis");
        service.mark_completed(&redis, &lesson("a")).await.unwrap();
        service.mark_completed(&redis, &lesson("b")).await.unwrap();

        let progress = service.topic_progress(&redis, 4).await.unwrap();
        assert_eq!(progress.summary.summary_text(), "2 of 4 lessons completed (50%)");
        assert!(progress.completed.contains(&lesson("b")));
    }

    #[tokio::test]
    async fn stored_topics_lists_progress_keys_only() {
        let (service, store) = service();
        store.set("theme", "dark").await.unwrap();
        service.mark_completed(&topic("sql"), &lesson("01")).await.unwrap();
        service.mark_completed(&topic("git"), &lesson("01")).await.unwrap();

        let topics = service.stored_topics().await.unwrap();
        assert_eq!(topics, vec![topic("git"), topic("sql")]);
    }
}
