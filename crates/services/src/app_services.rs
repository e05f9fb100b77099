use std::path::Path;
use std::sync::Arc;

use storage::content::load_catalog;
use storage::repository::Storage;
use study_core::ContentCatalog;
use tracing::info;

use crate::Clock;
use crate::error::AppServicesError;
use crate::progress_service::ProgressService;
use crate::quiz::QuizLoopService;

/// Database URL selecting the ephemeral in-memory slot store.
pub const MEMORY_DB_URL: &str = "memory";

/// Assembles the catalog and the app-facing services.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<ContentCatalog>,
    progress: Arc<ProgressService>,
    quiz_loop: Arc<QuizLoopService>,
}

impl AppServices {
    /// Load content from `content_dir` and open the progress store at
    /// `db_url` (`memory` for a store that lives only as long as the process).
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the content cannot be loaded or the
    /// database cannot be opened.
    pub async fn new(
        db_url: &str,
        content_dir: &Path,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let catalog = load_catalog(content_dir)?;
        info!(
            dir = %content_dir.display(),
            modules = catalog.modules().len(),
            events = catalog.timeline().len(),
            "content loaded"
        );

        let storage = if db_url == MEMORY_DB_URL {
            Storage::in_memory()
        } else {
            Storage::sqlite(db_url).await?
        };
        Ok(Self::from_parts(catalog, storage, clock).await)
    }

    /// Wire services over an already loaded catalog and storage.
    pub async fn from_parts(catalog: ContentCatalog, storage: Storage, clock: Clock) -> Self {
        let catalog = Arc::new(catalog);
        let progress = Arc::new(ProgressService::load(clock, Arc::clone(&storage.slots)).await);
        let quiz_loop = Arc::new(QuizLoopService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&progress),
        ));
        Self {
            catalog,
            progress,
            quiz_loop,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<ContentCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}
