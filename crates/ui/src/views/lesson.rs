use dioxus::prelude::*;
use dioxus_router::Link;
use services::{Clock, LessonCatalog, ProgressService};
use tutorial_core::model::{ConsoleMode, LessonId, TopicId};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{COMPLETED_STATUS_TEXT, COMPLETION_NOTICE_TEXT, ConsoleVm, enter_submits};

#[derive(Clone, Debug, PartialEq)]
struct LessonData {
    topic_title: String,
    title: String,
    concept: String,
    console: ConsoleVm,
}

async fn load_lesson(
    catalog: &LessonCatalog,
    progress: &ProgressService,
    topic: &str,
    lesson: &str,
) -> Result<LessonData, ViewError> {
    let topic = TopicId::new(topic).map_err(|_| ViewError::NotFound)?;
    let lesson = LessonId::new(lesson).map_err(|_| ViewError::NotFound)?;

    // Lessons missing from the catalog still get a check-mode console.
    let topic_entry = catalog.topic(&topic);
    let entry = topic_entry.and_then(|entry| entry.lesson(&lesson));
    let mode = entry.map_or(ConsoleMode::Check, |entry| entry.mode);
    let multiline = entry.is_some_and(|entry| entry.multiline);

    let completed = progress
        .is_completed(&topic, &lesson)
        .await
        .map_err(|_| ViewError::Unknown)?;

    let mut console = ConsoleVm::new(topic.clone(), lesson.clone(), mode, multiline);
    console.set_completed(completed);

    Ok(LessonData {
        topic_title: topic_entry.map_or_else(|| topic.to_string(), |entry| entry.title.clone()),
        title: entry.map_or_else(|| lesson.to_string(), |entry| entry.title.clone()),
        concept: entry.map(|entry| entry.concept.clone()).unwrap_or_default(),
        console,
    })
}

#[component]
pub fn LessonView(topic: String, lesson: String) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let progress = ctx.progress();

    let resource = use_resource(use_reactive((&topic, &lesson), move |(topic, lesson)| {
        let catalog = catalog.clone();
        let progress = progress.clone();
        async move { load_lesson(&catalog, &progress, &topic, &lesson).await }
    }));

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page lesson-page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    Link {
                        class: "back-link",
                        to: Route::TopicIndex { topic: data.console.topic().to_string() },
                        "← {data.topic_title}"
                    }
                    h2 { "{data.title}" }
                    if !data.concept.is_empty() {
                        p { class: "lesson-concept", "{data.concept}" }
                    }
                    {
                        rsx! {
                            InteractiveConsole {
                                key: "{data.console.topic()}/{data.console.lesson()}",
                                initial: data.console.clone(),
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                    Link { to: Route::Home {}, "Back to tutorials" }
                },
            }
        }
    }
}

/// Re-render when the next timed effect changes state, until none are left.
fn schedule_expiry(mut vm: Signal<ConsoleVm>, clock: Clock) {
    spawn(async move {
        loop {
            let next = vm.peek().next_deadline(clock.now());
            let Some(wait) = next else { break };
            tokio::time::sleep(wait).await;
            vm.write().expire(clock.now());
        }
    });
}

/// Console state plus the submit action shared by the key and click handlers.
#[derive(Clone, Copy)]
pub(crate) struct ConsoleHandle {
    pub vm: Signal<ConsoleVm>,
    pub command: Signal<String>,
    pub submit: Callback<()>,
}

pub(crate) fn use_console(initial: &ConsoleVm) -> ConsoleHandle {
    let ctx = use_context::<AppContext>();
    let console = ctx.console();
    let clock = ctx.clock();

    let mut vm = use_signal(|| initial.clone());
    let command = use_signal(String::new);

    let submit = use_callback(move |()| {
        let raw = command.peek().clone();
        let started = vm.write().begin_submit(&raw, clock.now());
        if !started {
            schedule_expiry(vm, clock);
            return;
        }

        let console = console.clone();
        let (mode, topic, lesson) = {
            let current = vm.peek();
            (current.mode(), current.topic().clone(), current.lesson().clone())
        };
        spawn(async move {
            let outcome = console.submit(mode, &topic, &lesson, &raw).await;
            vm.write().finish_submit(outcome, clock.now());
            schedule_expiry(vm, clock);
        });
    });

    ConsoleHandle {
        vm,
        command,
        submit,
    }
}

#[component]
fn InteractiveConsole(initial: ConsoleVm) -> Element {
    let handle = use_console(&initial);
    console_panel(handle)
}

pub(crate) fn console_panel(handle: ConsoleHandle) -> Element {
    let clock = use_context::<AppContext>().clock();
    let ConsoleHandle {
        vm,
        mut command,
        submit,
    } = handle;

    let now = clock.now();
    let current = vm.read();
    let mode = current.mode();
    let multiline = current.multiline();
    let busy = current.is_busy();
    let label = current.button_label();
    let input_class = if current.is_highlighted(now) {
        "command-input input-success"
    } else {
        "command-input"
    };
    let output = current.output().map(str::to_string);
    let (feedback_class, feedback_text) = current.feedback(now).map_or_else(
        || ("feedback".to_string(), String::new()),
        |feedback| (feedback.class(now), feedback.message.clone()),
    );
    let completed = current.is_completed();
    let show_notice = current.shows_completion_notice(now);
    drop(current);

    let on_key = move |evt: KeyboardEvent| {
        if evt.data.key() != Key::Enter {
            return;
        }
        let modifiers = evt.data.modifiers();
        let ctrl_or_meta =
            modifiers.contains(Modifiers::CONTROL) || modifiers.contains(Modifiers::META);
        if enter_submits(multiline, ctrl_or_meta) {
            evt.prevent_default();
            submit.call(());
        }
    };

    rsx! {
        div {
            id: "lesson-status",
            class: if completed { "lesson-status completed" } else { "lesson-status" },
            if completed { "{COMPLETED_STATUS_TEXT}" } else { "Not completed yet" }
        }
        if show_notice {
            div { class: "completion-notification", "{COMPLETION_NOTICE_TEXT}" }
        }
        div { class: "interactive-console", "data-mode": mode.as_attr(),
            if multiline {
                textarea {
                    id: "command-input",
                    class: input_class,
                    rows: "6",
                    autofocus: true,
                    value: "{command}",
                    oninput: move |evt| command.set(evt.value()),
                    onkeydown: on_key,
                }
            } else {
                input {
                    id: "command-input",
                    class: input_class,
                    r#type: "text",
                    autofocus: true,
                    value: "{command}",
                    oninput: move |evt| command.set(evt.value()),
                    onkeydown: on_key,
                }
            }
            button {
                id: "check-answer",
                class: "btn-primary",
                disabled: busy,
                onclick: move |_| submit.call(()),
                "{label}"
            }
            if let Some(output) = output {
                pre { id: "console-output", class: "console-output visible", "{output}" }
            } else {
                pre { id: "console-output", class: "console-output" }
            }
            div { id: "feedback", class: "{feedback_class}", "{feedback_text}" }
        }
    }
}
