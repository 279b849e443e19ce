use dioxus::prelude::*;
use dioxus_router::Link;
use services::{LessonCatalog, ProgressService};
use tutorial_core::model::TopicId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{COMPLETION_BADGE, LessonCardVm, TopicIndexVm, map_topic_index};

async fn load_topic_index(
    catalog: &LessonCatalog,
    progress: &ProgressService,
    topic: &str,
) -> Result<TopicIndexVm, ViewError> {
    let id = TopicId::new(topic).map_err(|_| ViewError::NotFound)?;
    let entry = catalog.topic(&id).ok_or(ViewError::NotFound)?;
    let completed = progress
        .completed(&id)
        .await
        .map_err(|_| ViewError::Unknown)?;
    Ok(map_topic_index(entry, &completed))
}

/// Lesson list of one topic with the progress bar and completion badges.
#[component]
pub fn TopicIndexView(topic: String) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let progress = ctx.progress();

    let resource = use_resource(use_reactive((&topic,), move |(topic,)| {
        let catalog = catalog.clone();
        let progress = progress.clone();
        async move { load_topic_index(&catalog, &progress, &topic).await }
    }));

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page topic-index",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    TopicIndexBody { vm }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { to: Route::Home {}, "Back to tutorials" }
                },
            }
        }
    }
}

#[component]
fn TopicIndexBody(vm: TopicIndexVm) -> Element {
    let bar_width = vm.bar_width();
    let summary = vm.summary_text();
    let topic = vm.topic.to_string();

    rsx! {
        h2 { "{vm.title}" }
        if !vm.description.is_empty() {
            p { class: "topic-description", "{vm.description}" }
        }
        div { class: "progress-bar",
            div { class: "progress-fill", style: "width: {bar_width}" }
        }
        p { class: "progress-text", "{summary}" }
        div { class: "lesson-grid",
            for card in vm.cards.iter().cloned() {
                LessonCard { key: "{card.lesson}", topic: topic.clone(), card }
            }
        }
    }
}

#[component]
fn LessonCard(topic: String, card: LessonCardVm) -> Element {
    let style = card.button_style.unwrap_or_default();
    rsx! {
        div { class: "lesson-card",
            h3 {
                "{card.title}"
                if card.badge {
                    span { class: "completion-badge", "{COMPLETION_BADGE}" }
                }
            }
            if !card.concept.is_empty() {
                p { class: "lesson-concept", "{card.concept}" }
            }
            Link {
                class: "btn-primary",
                style: "{style}",
                to: Route::Lesson { topic, lesson: card.lesson.to_string() },
                "{card.button_label}"
            }
        }
    }
}
