//! Shared error types for the services crate.

use thiserror::Error;

use storage::content::ContentLoadError;
use storage::sqlite::SqliteInitError;
use study_core::model::ModuleId;

/// Errors emitted by quiz runs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("module {0} has no quiz questions")]
    Empty(ModuleId),
    #[error("quiz already completed")]
    Completed,
    #[error("not every question has been answered")]
    Incomplete,
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Content(#[from] ContentLoadError),
}
