use async_trait::async_trait;

use super::SqliteRepository;
use super::kv::ACTIVE_WORKOUT_KEY;
use crate::repository::{StorageError, WorkoutSnapshot, WorkoutSnapshotRepository};

#[async_trait]
impl WorkoutSnapshotRepository for SqliteRepository {
    async fn save_snapshot(&self, snapshot: &WorkoutSnapshot) -> Result<(), StorageError> {
        self.put_json(ACTIVE_WORKOUT_KEY, snapshot).await
    }

    async fn load_snapshot(&self) -> Result<Option<WorkoutSnapshot>, StorageError> {
        self.get_json(ACTIVE_WORKOUT_KEY).await
    }

    async fn clear_snapshot(&self) -> Result<(), StorageError> {
        self.delete_key(ACTIVE_WORKOUT_KEY).await
    }
}
