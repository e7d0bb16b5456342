use async_trait::async_trait;
use fit_core::model::Exercise;

use super::SqliteRepository;
use super::kv::FAVORITES_KEY;
use crate::repository::{FavoritesRepository, StorageError};

#[async_trait]
impl FavoritesRepository for SqliteRepository {
    async fn load_favorites(&self) -> Result<Vec<Exercise>, StorageError> {
        Ok(self
            .get_json::<Vec<Exercise>>(FAVORITES_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save_favorites(&self, favorites: &[Exercise]) -> Result<(), StorageError> {
        self.put_json(FAVORITES_KEY, favorites).await
    }
}
