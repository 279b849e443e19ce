use std::sync::Arc;

use async_trait::async_trait;
use storage::repository::{KeyValueStore, Storage, StorageError};
use tutorial_core::model::{LessonId, TopicId};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

fn redis() -> TopicId {
    TopicId::new("redis").unwrap()
}

fn lesson(id: &str) -> LessonId {
    LessonId::new(id).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_topics_with_progress() {
    let mut harness = setup_view_harness(ViewKind::Home);
    harness
        .progress
        .mark_completed(&redis(), &lesson("00_setup"))
        .await
        .expect("mark");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Redis"), "missing topic in {html}");
    assert!(
        html.contains("1 of 4 lessons completed (25%)"),
        "missing progress in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn topic_index_smoke_renders_bar_and_badges() {
    let mut harness = setup_view_harness(ViewKind::TopicIndex("redis".into()));
    for id in ["00_setup", "01_strings"] {
        harness
            .progress
            .mark_completed(&redis(), &lesson(id))
            .await
            .expect("mark");
    }

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("progress-fill"), "missing bar in {html}");
    assert!(html.contains("width: 50%"), "missing width in {html}");
    assert!(
        html.contains("2 of 4 lessons completed (50%)"),
        "missing summary in {html}"
    );
    assert_eq!(html.matches("completion-badge").count(), 2, "badges in {html}");
    assert_eq!(html.matches("✅ Completed").count(), 2, "labels in {html}");
    assert_eq!(html.matches("Start Lesson").count(), 2, "labels in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn topic_index_smoke_reports_unknown_topic() {
    let mut harness = setup_view_harness(ViewKind::TopicIndex("cobol".into()));
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("This tutorial page does not exist."),
        "missing not-found in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_renders_check_console() {
    let mut harness = setup_view_harness(ViewKind::Lesson("redis".into(), "01_strings".into()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("interactive-console"), "missing console in {html}");
    assert!(html.contains("data-mode=\"check\""), "missing mode in {html}");
    assert!(html.contains("Check Answer"), "missing label in {html}");
    assert!(html.contains("id=\"command-input\""), "missing input in {html}");
    assert!(html.contains("autofocus"), "input not focused in {html}");
    assert!(html.contains("Not completed yet"), "missing status in {html}");
    assert!(!html.contains("console-output visible"), "output shown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_shows_existing_completion() {
    let storage = Storage::in_memory();
    storage
        .kv
        .set("tutorial_progress_redis", r#"["01_strings"]"#)
        .await
        .expect("seed");
    let mut harness = setup_view_harness_with_storage(
        ViewKind::Lesson("redis".into(), "01_strings".into()),
        &storage,
    );
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("✅ Completed"), "missing status in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_renders_chat_console() {
    let mut harness = setup_view_harness(ViewKind::Lesson("llm".into(), "01_first_prompt".into()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("data-mode=\"chat\""), "missing mode in {html}");
    assert!(html.contains("Send"), "missing label in {html}");
    assert!(html.contains("<textarea"), "missing textarea in {html}");
    assert!(html.contains("autofocus"), "textarea not focused in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn console_submission_renders_output_and_completion() {
    let mut harness = setup_view_harness(ViewKind::SubmittedConsole(
        "redis".into(),
        "00_setup".into(),
        "  PING ".into(),
    ));
    harness.settle().await;
    for _ in 0..4 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("console-output visible"), "output hidden in {html}");
    assert!(html.contains(">PING</pre>"), "missing output in {html}");
    assert!(html.contains("✅ Completed"), "missing status in {html}");
    assert!(html.contains("Lesson completed!"), "missing notice in {html}");
    assert!(html.contains("input-success"), "missing highlight in {html}");
    assert!(html.contains("Correct!"), "missing feedback in {html}");
    assert!(html.contains("Check Answer"), "label not restored in {html}");

    let completed = harness.progress.completed(&redis()).await.expect("completed");
    assert_eq!(completed.len(), 1);
    assert!(completed.contains(&lesson("00_setup")));
}

#[tokio::test(flavor = "current_thread")]
async fn console_blank_submission_shows_validation_only() {
    let mut harness = setup_view_harness(ViewKind::SubmittedConsole(
        "redis".into(),
        "00_setup".into(),
        "   ".into(),
    ));
    harness.settle().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Please enter a command"), "missing message in {html}");
    assert!(html.contains("Not completed yet"), "status changed in {html}");
    assert!(!html.contains("console-output visible"), "output shown in {html}");
    assert!(
        harness
            .progress
            .completed(&redis())
            .await
            .expect("completed")
            .is_empty()
    );
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_swaps_console_when_lesson_changes() {
    let storage = Storage::in_memory();
    storage
        .kv
        .set("tutorial_progress_redis", r#"["02_lists"]"#)
        .await
        .expect("seed");
    let mut harness = setup_view_harness_with_storage(
        ViewKind::SwitchedLesson("redis".into(), "01_strings".into(), "02_lists".into()),
        &storage,
    );
    harness.settle().await;
    for _ in 0..4 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Lists"), "lesson not switched in {html}");
    assert!(html.contains("✅ Completed"), "stale console state in {html}");
    assert!(!html.contains("Not completed yet"), "stale console state in {html}");
}

struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn keys_with_prefix(&self, _prefix: &str) -> Result<Vec<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let storage = Storage {
        kv: Arc::new(FailingStore),
    };
    let mut harness = setup_view_harness_with_storage(ViewKind::Home, &storage);
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
}
