use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fit_core::model::{AppSettings, Exercise, WorkoutConfig, WorkoutSummary};
use fit_core::SessionState;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Row id of a persisted workout summary.
pub type WorkoutSummaryId = i64;

/// Persisted shape of an in-progress workout, enough to rebuild the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSnapshot {
    pub config: WorkoutConfig,
    pub state: SessionState,
    pub started_at: DateTime<Utc>,
}

/// A stored summary together with its row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSummaryRow {
    pub id: WorkoutSummaryId,
    pub summary: WorkoutSummary,
}

impl WorkoutSummaryRow {
    #[must_use]
    pub fn new(id: WorkoutSummaryId, summary: WorkoutSummary) -> Self {
        Self { id, summary }
    }
}

/// Ordered list of favorite exercises, persisted as a whole.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Load favorites in insertion order. Empty when nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored list cannot be read or decoded.
    async fn load_favorites(&self) -> Result<Vec<Exercise>, StorageError>;

    /// Replace the stored favorites list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be stored.
    async fn save_favorites(&self, favorites: &[Exercise]) -> Result<(), StorageError>;
}

#[async_trait]
pub trait AppSettingsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if settings cannot be read or decoded.
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if settings cannot be stored.
    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError>;
}

/// Single slot holding the workout in progress, if any.
#[async_trait]
pub trait WorkoutSnapshotRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    async fn save_snapshot(&self, snapshot: &WorkoutSnapshot) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be read or decoded.
    async fn load_snapshot(&self) -> Result<Option<WorkoutSnapshot>, StorageError>;

    /// Remove the stored snapshot. Clearing an empty slot is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn clear_snapshot(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait WorkoutSummaryRepository: Send + Sync {
    /// Append a summary and return its row id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the summary cannot be stored.
    async fn append_summary(&self, summary: &WorkoutSummary)
    -> Result<WorkoutSummaryId, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_summary(&self, id: WorkoutSummaryId) -> Result<WorkoutSummary, StorageError>;

    /// Most recently ended summaries first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_recent(&self, limit: u32) -> Result<Vec<WorkoutSummaryRow>, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    favorites: Arc<Mutex<Vec<Exercise>>>,
    settings: Arc<Mutex<Option<AppSettings>>>,
    snapshot: Arc<Mutex<Option<WorkoutSnapshot>>>,
    summaries: Arc<Mutex<Vec<WorkoutSummaryRow>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl FavoritesRepository for InMemoryRepository {
    async fn load_favorites(&self) -> Result<Vec<Exercise>, StorageError> {
        let guard = self.favorites.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn save_favorites(&self, favorites: &[Exercise]) -> Result<(), StorageError> {
        let mut guard = self.favorites.lock().map_err(poisoned)?;
        *guard = favorites.to_vec();
        Ok(())
    }
}

#[async_trait]
impl AppSettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        let guard = self.settings.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let mut guard = self.settings.lock().map_err(poisoned)?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

#[async_trait]
impl WorkoutSnapshotRepository for InMemoryRepository {
    async fn save_snapshot(&self, snapshot: &WorkoutSnapshot) -> Result<(), StorageError> {
        let mut guard = self.snapshot.lock().map_err(poisoned)?;
        *guard = Some(snapshot.clone());
        Ok(())
    }

    async fn load_snapshot(&self) -> Result<Option<WorkoutSnapshot>, StorageError> {
        let guard = self.snapshot.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    async fn clear_snapshot(&self) -> Result<(), StorageError> {
        let mut guard = self.snapshot.lock().map_err(poisoned)?;
        *guard = None;
        Ok(())
    }
}

#[async_trait]
impl WorkoutSummaryRepository for InMemoryRepository {
    async fn append_summary(
        &self,
        summary: &WorkoutSummary,
    ) -> Result<WorkoutSummaryId, StorageError> {
        let mut guard = self.summaries.lock().map_err(poisoned)?;
        let id = guard.last().map_or(1, |row| row.id + 1);
        guard.push(WorkoutSummaryRow::new(id, summary.clone()));
        Ok(id)
    }

    async fn get_summary(&self, id: WorkoutSummaryId) -> Result<WorkoutSummary, StorageError> {
        let guard = self.summaries.lock().map_err(poisoned)?;
        guard
            .iter()
            .find(|row| row.id == id)
            .map(|row| row.summary.clone())
            .ok_or(StorageError::NotFound)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<WorkoutSummaryRow>, StorageError> {
        let guard = self.summaries.lock().map_err(poisoned)?;
        let mut rows = guard.clone();
        rows.sort_by(|a, b| {
            b.summary
                .ended_at()
                .cmp(&a.summary.ended_at())
                .then(b.id.cmp(&a.id))
        });
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(rows)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub favorites: Arc<dyn FavoritesRepository>,
    pub settings: Arc<dyn AppSettingsRepository>,
    pub snapshots: Arc<dyn WorkoutSnapshotRepository>,
    pub summaries: Arc<dyn WorkoutSummaryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            favorites: Arc::new(repo.clone()),
            settings: Arc::new(repo.clone()),
            snapshots: Arc::new(repo.clone()),
            summaries: Arc::new(repo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use fit_core::model::{ExerciseDraft, ExerciseId, WorkoutOutcome};
    use fit_core::time::fixed_now;
    use fit_core::WorkoutSession;

    fn exercise(id: &str, name: &str) -> Exercise {
        ExerciseDraft {
            id: id.into(),
            name: name.into(),
            target: "chest".into(),
            ..ExerciseDraft::default()
        }
        .validate()
        .unwrap()
    }

    fn config() -> WorkoutConfig {
        WorkoutConfig::new(ExerciseId::new("ex_1_squat").unwrap(), 2, 8, 30)
    }

    #[tokio::test]
    async fn favorites_replace_whole_list() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_favorites().await.unwrap().is_empty());

        repo.save_favorites(&[exercise("a", "A"), exercise("b", "B")])
            .await
            .unwrap();
        repo.save_favorites(&[exercise("b", "B")]).await.unwrap();

        let loaded = repo.load_favorites().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id().as_str(), "b");
    }

    #[tokio::test]
    async fn snapshot_slot_can_be_cleared() {
        let repo = InMemoryRepository::new();
        let mut session = WorkoutSession::new();
        let state = session.start(config()).unwrap();
        let snapshot = WorkoutSnapshot {
            config: config(),
            state,
            started_at: fixed_now(),
        };

        repo.save_snapshot(&snapshot).await.unwrap();
        assert_eq!(repo.load_snapshot().await.unwrap(), Some(snapshot));

        repo.clear_snapshot().await.unwrap();
        repo.clear_snapshot().await.unwrap();
        assert_eq!(repo.load_snapshot().await.unwrap(), None);
    }

    #[tokio::test]
    async fn summaries_list_newest_first() {
        let repo = InMemoryRepository::new();
        let start = fixed_now();
        for (offset, sets, outcome) in [
            (10, 1, WorkoutOutcome::Abandoned),
            (30, 2, WorkoutOutcome::Finished),
            (20, 0, WorkoutOutcome::Abandoned),
        ] {
            let summary = WorkoutSummary::new(
                config(),
                sets,
                outcome,
                start,
                start + Duration::minutes(offset),
            )
            .unwrap();
            repo.append_summary(&summary).await.unwrap();
        }

        let rows = repo.list_recent(2).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 2);
        assert_eq!(rows[1].id, 3);

        assert_eq!(repo.get_summary(1).await.unwrap().completed_sets(), 1);
        assert!(matches!(
            repo.get_summary(42).await,
            Err(StorageError::NotFound)
        ));
    }
}
