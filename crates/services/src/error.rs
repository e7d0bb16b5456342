//! Shared error types for the services crate.

use thiserror::Error;

use fit_core::EngineError;
use fit_core::model::{AppSettingsError, ExerciseId, WorkoutSummaryError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the exercise catalog and its sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("exercise source is not configured")]
    Disabled,
    #[error("exercise not found: {0}")]
    NotFound(ExerciseId),
    #[error("exercise source returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `FavoritesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FavoritesError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AppSettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppSettingsServiceError {
    #[error(transparent)]
    Settings(#[from] AppSettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the workout loop.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WorkoutError {
    #[error("config targets {got} but the run is for {expected}")]
    ExerciseMismatch { expected: ExerciseId, got: ExerciseId },
    #[error("no workout summary is waiting to be saved")]
    NothingToFinalize,
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Summary(#[from] WorkoutSummaryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
