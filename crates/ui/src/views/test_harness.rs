use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AnswerChecker, CheckAnswerError, Clock, ConsoleService, LessonCatalog, ProgressService,
};
use storage::repository::Storage;
use tutorial_core::model::{
    CheckAnswerRequest, CheckAnswerResponse, ConsoleMode, LessonId, TopicId, TutorialPath,
};
use tutorial_core::time::fixed_now;

use crate::context::{UiApp, build_app_context};
use crate::views::lesson::{console_panel, use_console};
use crate::views::{HomeView, LessonView, TopicIndexView};
use crate::vm::ConsoleVm;

/// Answers every submission as correct without a server.
struct EchoChecker;

#[async_trait::async_trait]
impl AnswerChecker for EchoChecker {
    async fn check(
        &self,
        request: &CheckAnswerRequest,
    ) -> Result<CheckAnswerResponse, CheckAnswerError> {
        Ok(CheckAnswerResponse {
            output: request.command.clone(),
            feedback_message: Some("Correct!".into()),
            is_correct: Some(true),
            detail: None,
        })
    }
}

#[derive(Clone)]
struct TestApp {
    catalog: Arc<LessonCatalog>,
    progress: Arc<ProgressService>,
    console: Arc<ConsoleService>,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.catalog)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn console(&self) -> Arc<ConsoleService> {
        Arc::clone(&self.console)
    }

    fn clock(&self) -> Clock {
        Clock::fixed(fixed_now())
    }

    fn initial_path(&self) -> Option<TutorialPath> {
        None
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    TopicIndex(String),
    Lesson(String, String),
    /// Check-mode console for `topic`/`lesson` that submits `command` once on mount.
    SubmittedConsole(String, String, String),
    /// Lesson page that moves from the first lesson to the second after mount.
    SwitchedLesson(String, String, String),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::TopicIndex(topic) => rsx! { TopicIndexView { topic } },
        ViewKind::Lesson(topic, lesson) => rsx! { LessonView { topic, lesson } },
        ViewKind::SubmittedConsole(topic, lesson, command) => {
            rsx! { SubmittedConsole { topic, lesson, command } }
        }
        ViewKind::SwitchedLesson(topic, from, to) => rsx! { SwitchedLesson { topic, from, to } },
    }
}

#[component]
fn SwitchedLesson(topic: String, from: String, to: String) -> Element {
    let mut lesson = use_signal(|| from.clone());
    use_hook(move || {
        spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            lesson.set(to);
        });
    });
    rsx! { LessonView { topic, lesson: lesson() } }
}

#[component]
fn SubmittedConsole(topic: String, lesson: String, command: String) -> Element {
    let initial = ConsoleVm::new(
        TopicId::new(&topic).expect("topic id"),
        LessonId::new(&lesson).expect("lesson id"),
        ConsoleMode::Check,
        false,
    );
    let handle = use_console(&initial);
    use_hook(move || {
        let mut input = handle.command;
        spawn(async move {
            input.set(command);
            handle.submit.call(());
        });
    });
    console_panel(handle)
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub progress: Arc<ProgressService>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild and let resources settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, &Storage::in_memory())
}

pub fn setup_view_harness_with_storage(view: ViewKind, storage: &Storage) -> ViewHarness {
    let catalog = Arc::new(LessonCatalog::builtin().expect("builtin catalog"));
    let progress = Arc::new(ProgressService::new(Arc::clone(&storage.kv)));
    let console = Arc::new(ConsoleService::new(
        Arc::new(EchoChecker),
        Arc::clone(&progress),
    ));

    let app = Arc::new(TestApp {
        catalog,
        progress: Arc::clone(&progress),
        console,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, progress }
}
