#![forbid(unsafe_code)]

pub mod app_services;
pub mod app_settings_service;
pub mod catalog;
pub mod error;
pub mod favorites_service;
pub mod workout;

pub use fit_core::Clock;

pub use app_services::AppServices;
pub use app_settings_service::AppSettingsService;
pub use catalog::{CatalogConfig, CatalogService, ExerciseSource, RemoteExerciseSource};
pub use error::{
    AppServicesError, AppSettingsServiceError, CatalogError, FavoritesError, WorkoutError,
};
pub use favorites_service::FavoritesService;
pub use workout::{RestTimer, WorkoutHistoryItem, WorkoutLoopService, WorkoutRun};
