use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::TopicCardVm;

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    topics: Vec<TopicCardVm>,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let progress = progress.clone();
        async move {
            let mut topics = Vec::with_capacity(catalog.topics().len());
            for topic in catalog.topics() {
                let completed = progress
                    .completed(&topic.id)
                    .await
                    .map_err(|_| ViewError::Unknown)?;
                topics.push(TopicCardVm::new(topic, &completed));
            }
            Ok(HomeData { topics })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Tutorials" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.topics.is_empty() {
                        p { "No tutorials configured." }
                    } else {
                        ul { class: "topic-list",
                            for card in data.topics {
                                TopicCard { key: "{card.topic}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn TopicCard(card: TopicCardVm) -> Element {
    rsx! {
        li { class: "topic-card",
            Link {
                to: Route::TopicIndex { topic: card.topic.to_string() },
                h3 { "{card.title}" }
            }
            if !card.description.is_empty() {
                p { "{card.description}" }
            }
            p { class: "topic-progress", "{card.summary_text}" }
        }
    }
}
