use std::sync::Arc;

use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::app_settings_service::AppSettingsService;
use crate::catalog::{CatalogConfig, CatalogService, RemoteExerciseSource};
use crate::error::AppServicesError;
use crate::favorites_service::FavoritesService;
use crate::workout::WorkoutLoopService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogService>,
    favorites: Arc<FavoritesService>,
    app_settings: Arc<AppSettingsService>,
    workouts: Arc<WorkoutLoopService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, catalog_config: CatalogConfig) -> Self {
        let catalog = Arc::new(CatalogService::new(Arc::new(RemoteExerciseSource::new(
            catalog_config,
        ))));
        let favorites = Arc::new(FavoritesService::new(Arc::clone(&storage.favorites)));
        let app_settings = Arc::new(AppSettingsService::new(Arc::clone(&storage.settings)));
        let workouts = Arc::new(WorkoutLoopService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&storage.snapshots),
            Arc::clone(&storage.summaries),
        ));

        Self {
            catalog,
            favorites,
            app_settings,
            workouts,
        }
    }

    /// Build services backed by `SQLite` storage.
    ///
    /// The exercise source reads the environment, then persisted settings on top.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the settings read fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let settings = storage.settings.get_settings().await?.unwrap_or_default();
        let catalog_config = CatalogConfig::from_env().with_settings(&settings);
        info!(
            remote = catalog_config.is_configured(),
            "exercise catalog configured"
        );
        Ok(Self::new(&storage, clock, catalog_config))
    }

    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::new(&Storage::in_memory(), clock, CatalogConfig::default())
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn favorites(&self) -> Arc<FavoritesService> {
        Arc::clone(&self.favorites)
    }

    #[must_use]
    pub fn app_settings(&self) -> Arc<AppSettingsService> {
        Arc::clone(&self.app_settings)
    }

    #[must_use]
    pub fn workouts(&self) -> Arc<WorkoutLoopService> {
        Arc::clone(&self.workouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fit_core::time::fixed_clock;

    #[tokio::test]
    async fn in_memory_services_share_storage() {
        let services = AppServices::in_memory(fixed_clock());
        assert!(!services.catalog().is_remote());

        let exercise = services.catalog().demo()[0].clone();
        services.favorites().add(exercise.clone()).await.unwrap();
        assert!(services.favorites().is_favorite(exercise.id()).await.unwrap());
        assert!(services.workouts().history(5).await.unwrap().is_empty());
    }
}
