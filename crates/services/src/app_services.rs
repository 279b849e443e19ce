use std::sync::Arc;

use storage::repository::Storage;

use crate::answer_client::{AnswerChecker, AnswerClientConfig, HttpAnswerClient};
use crate::catalog::LessonCatalog;
use crate::console_service::ConsoleService;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<LessonCatalog>,
    progress: Arc<ProgressService>,
    console: Arc<ConsoleService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, checker: Arc<dyn AnswerChecker>, catalog: LessonCatalog) -> Self {
        let progress = Arc::new(ProgressService::new(Arc::clone(&storage.kv)));
        let console = Arc::new(ConsoleService::new(checker, Arc::clone(&progress)));
        Self {
            catalog: Arc::new(catalog),
            progress,
            console,
        }
    }

    /// Build services backed by `SQLite` storage and the HTTP answer client.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        server: AnswerClientConfig,
        catalog: LessonCatalog,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let checker: Arc<dyn AnswerChecker> = Arc::new(HttpAnswerClient::new(server));
        Ok(Self::new(&storage, checker, catalog))
    }

    /// In-memory storage; progress is lost when the process exits.
    #[must_use]
    pub fn in_memory(checker: Arc<dyn AnswerChecker>, catalog: LessonCatalog) -> Self {
        Self::new(&Storage::in_memory(), checker, catalog)
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
}
