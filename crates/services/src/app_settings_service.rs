use std::sync::Arc;

use fit_core::model::{AppSettings, AppSettingsDraft, Theme};
use storage::repository::AppSettingsRepository;

use crate::error::AppSettingsServiceError;

#[derive(Clone)]
pub struct AppSettingsService {
    repo: Arc<dyn AppSettingsRepository>,
}

impl AppSettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn AppSettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_default())
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` if validation fails or persistence fails.
    pub async fn save(
        &self,
        draft: AppSettingsDraft,
    ) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = draft.validate()?;
        self.repo.save_settings(&settings).await?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` on storage failures.
    pub async fn theme(&self) -> Result<Theme, AppSettingsServiceError> {
        Ok(self.load().await?.theme())
    }

    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` on storage failures.
    pub async fn set_dark_mode(
        &self,
        dark_mode: bool,
    ) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = self.load().await?.with_dark_mode(dark_mode);
        self.repo.save_settings(&settings).await?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` on storage failures.
    pub async fn toggle_dark_mode(&self) -> Result<AppSettings, AppSettingsServiceError> {
        let current = self.load().await?;
        self.set_dark_mode(!current.dark_mode()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    #[tokio::test]
    async fn defaults_to_light_theme() {
        let service = AppSettingsService::new(Arc::new(InMemoryRepository::new()));
        assert_eq!(service.theme().await.unwrap(), Theme::Light);
    }

    #[tokio::test]
    async fn toggle_persists_and_keeps_other_fields() {
        let service = AppSettingsService::new(Arc::new(InMemoryRepository::new()));
        service
            .save(AppSettingsDraft {
                dark_mode: false,
                exercise_api_key: Some("key".into()),
                exercise_api_base_url: None,
            })
            .await
            .unwrap();

        let toggled = service.toggle_dark_mode().await.unwrap();
        assert!(toggled.dark_mode());
        assert_eq!(toggled.exercise_api_key(), Some("key"));
        assert_eq!(service.theme().await.unwrap(), Theme::Dark);
    }

    #[tokio::test]
    async fn save_rejects_bad_url() {
        let service = AppSettingsService::new(Arc::new(InMemoryRepository::new()));
        let err = service
            .save(AppSettingsDraft {
                exercise_api_base_url: Some("::nope".into()),
                ..AppSettingsDraft::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppSettingsServiceError::Settings(_)));
    }
}
