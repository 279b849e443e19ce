use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};
use tutorial_core::model::TutorialPath;

use crate::context::AppContext;
use crate::views::{HomeView, LessonView, TopicIndexView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/tutorial/:topic", TopicIndexView)] TopicIndex { topic: String },
        #[route("/tutorial/:topic/:lesson", LessonView)] Lesson { topic: String, lesson: String },
}

impl From<&TutorialPath> for Route {
    fn from(path: &TutorialPath) -> Self {
        match path {
            TutorialPath::Index { topic } => Route::TopicIndex {
                topic: topic.to_string(),
            },
            TutorialPath::Lesson { topic, lesson } => Route::Lesson {
                topic: topic.to_string(),
                lesson: lesson.to_string(),
            },
        }
    }
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    use_effect(move || {
        if let Some(path) = ctx.take_initial_path() {
            navigator.replace(Route::from(&path));
        }
    });

    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    rsx! {
        nav { class: "sidebar",
            h1 { "Tutorials" }
            ul {
                li { Link { to: Route::Home {}, "All topics" } }
                for topic in catalog.topics() {
                    li { key: "{topic.id}",
                        Link { to: Route::TopicIndex { topic: topic.id.to_string() }, "{topic.title}" }
                    }
                }
            }
        }
    }
}
