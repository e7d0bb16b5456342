use std::sync::Arc;

use fit_core::model::{Exercise, ExerciseId};
use storage::repository::FavoritesRepository;
use tracing::debug;

use crate::error::FavoritesError;

/// Favorite exercises, kept in insertion order and unique by id.
///
/// Every mutation rewrites the whole stored list.
#[derive(Clone)]
pub struct FavoritesService {
    repo: Arc<dyn FavoritesRepository>,
}

impl FavoritesService {
    #[must_use]
    pub fn new(repo: Arc<dyn FavoritesRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// Returns `FavoritesError` on storage failures.
    pub async fn list(&self) -> Result<Vec<Exercise>, FavoritesError> {
        Ok(self.repo.load_favorites().await?)
    }

    /// # Errors
    ///
    /// Returns `FavoritesError` on storage failures.
    pub async fn is_favorite(&self, id: &ExerciseId) -> Result<bool, FavoritesError> {
        let items = self.repo.load_favorites().await?;
        Ok(items.iter().any(|item| item.id() == id))
    }

    /// Add an exercise. Returns `false` when it was already a favorite.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError` on storage failures.
    pub async fn add(&self, exercise: Exercise) -> Result<bool, FavoritesError> {
        let mut items = self.repo.load_favorites().await?;
        if items.iter().any(|item| item.id() == exercise.id()) {
            return Ok(false);
        }
        debug!(id = %exercise.id(), "adding favorite");
        items.push(exercise);
        self.repo.save_favorites(&items).await?;
        Ok(true)
    }

    /// Remove an exercise by id. Returns `false` when it was not a favorite.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError` on storage failures.
    pub async fn remove(&self, id: &ExerciseId) -> Result<bool, FavoritesError> {
        let mut items = self.repo.load_favorites().await?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            return Ok(false);
        }
        debug!(%id, "removing favorite");
        self.repo.save_favorites(&items).await?;
        Ok(true)
    }

    /// Flip favorite status. Returns whether the exercise is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError` on storage failures.
    pub async fn toggle(&self, exercise: Exercise) -> Result<bool, FavoritesError> {
        if self.remove(exercise.id()).await? {
            return Ok(false);
        }
        self.add(exercise).await
    }

    /// Replace the list wholesale, dropping later duplicates.
    ///
    /// # Errors
    ///
    /// Returns `FavoritesError` on storage failures.
    pub async fn set_all(&self, exercises: Vec<Exercise>) -> Result<(), FavoritesError> {
        let mut unique: Vec<Exercise> = Vec::with_capacity(exercises.len());
        for exercise in exercises {
            if !unique.iter().any(|item| item.id() == exercise.id()) {
                unique.push(exercise);
            }
        }
        self.repo.save_favorites(&unique).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::demo_exercises;
    use storage::repository::InMemoryRepository;

    fn service() -> FavoritesService {
        FavoritesService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn add_ignores_duplicates() {
        let favorites = service();
        let demo = demo_exercises();

        assert!(favorites.add(demo[0].clone()).await.unwrap());
        assert!(!favorites.add(demo[0].clone()).await.unwrap());
        assert!(favorites.add(demo[1].clone()).await.unwrap());

        let list = favorites.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id(), demo[0].id());
    }

    #[tokio::test]
    async fn remove_and_toggle() {
        let favorites = service();
        let demo = demo_exercises();

        assert!(!favorites.remove(demo[2].id()).await.unwrap());
        assert!(favorites.toggle(demo[2].clone()).await.unwrap());
        assert!(favorites.is_favorite(demo[2].id()).await.unwrap());
        assert!(!favorites.toggle(demo[2].clone()).await.unwrap());
        assert!(!favorites.is_favorite(demo[2].id()).await.unwrap());
    }

    #[tokio::test]
    async fn set_all_dedupes() {
        let favorites = service();
        let demo = demo_exercises();
        favorites
            .set_all(vec![demo[3].clone(), demo[4].clone(), demo[3].clone()])
            .await
            .unwrap();
        assert_eq!(favorites.list().await.unwrap().len(), 2);
    }
}
