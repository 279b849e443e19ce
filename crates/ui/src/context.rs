use std::sync::{Arc, Mutex};

use services::{Clock, ConsoleService, LessonCatalog, ProgressService};
use tutorial_core::model::TutorialPath;

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<LessonCatalog>;
    fn progress(&self) -> Arc<ProgressService>;
    fn console(&self) -> Arc<ConsoleService>;
    fn clock(&self) -> Clock;

    /// Page to show instead of the home page on launch.
    fn initial_path(&self) -> Option<TutorialPath>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<LessonCatalog>,
    progress: Arc<ProgressService>,
    console: Arc<ConsoleService>,
    clock: Clock,
    initial_path_once: Arc<Mutex<Option<TutorialPath>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            progress: app.progress(),
            console: app.console(),
            clock: app.clock(),
            initial_path_once: Arc::new(Mutex::new(app.initial_path())),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<LessonCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn console(&self) -> Arc<ConsoleService> {
        Arc::clone(&self.console)
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// The launch path, handed out once.
    #[must_use]
    pub fn take_initial_path(&self) -> Option<TutorialPath> {
        self.initial_path_once
            .lock()
            .ok()
            .and_then(|mut pending| pending.take())
    }
}

// Provided by the composition root (`crates/app`) and by the view test harness.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
