use async_trait::async_trait;
use fit_core::model::AppSettings;

use super::SqliteRepository;
use super::kv::APP_SETTINGS_KEY;
use crate::repository::{AppSettingsRepository, StorageError};

#[async_trait]
impl AppSettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        self.get_json(APP_SETTINGS_KEY).await
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        self.put_json(APP_SETTINGS_KEY, settings).await
    }
}
