use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fit_core::model::{ExerciseId, WorkoutConfig, WorkoutOutcome, WorkoutSummary};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, ser, u32_from_i64};
use crate::repository::{
    StorageError, WorkoutSummaryId, WorkoutSummaryRepository, WorkoutSummaryRow,
};

fn map_summary_row(row: &sqlx::sqlite::SqliteRow) -> Result<WorkoutSummary, StorageError> {
    let exercise_id: String = row.try_get("exercise_id").map_err(ser)?;
    let exercise_id = ExerciseId::new(exercise_id).map_err(ser)?;
    let total_sets = u32_from_i64("total_sets", row.try_get("total_sets").map_err(ser)?)?;
    let reps_per_set = u32_from_i64("reps_per_set", row.try_get("reps_per_set").map_err(ser)?)?;
    let rest_seconds = u32_from_i64("rest_seconds", row.try_get("rest_seconds").map_err(ser)?)?;
    let completed_sets =
        u32_from_i64("completed_sets", row.try_get("completed_sets").map_err(ser)?)?;
    let outcome_raw: String = row.try_get("outcome").map_err(ser)?;
    let outcome = WorkoutOutcome::parse(&outcome_raw)
        .ok_or_else(|| StorageError::Serialization(format!("invalid outcome: {outcome_raw}")))?;
    let started_at: DateTime<Utc> = row.try_get("started_at").map_err(ser)?;
    let ended_at: DateTime<Utc> = row.try_get("ended_at").map_err(ser)?;

    let config = WorkoutConfig::new(exercise_id, total_sets, reps_per_set, rest_seconds);
    WorkoutSummary::new(config, completed_sets, outcome, started_at, ended_at).map_err(ser)
}

#[async_trait]
impl WorkoutSummaryRepository for SqliteRepository {
    async fn append_summary(
        &self,
        summary: &WorkoutSummary,
    ) -> Result<WorkoutSummaryId, StorageError> {
        let config = summary.config();
        let res = sqlx::query(
            r"
                INSERT INTO workout_summaries (
                    exercise_id, total_sets, reps_per_set, rest_seconds,
                    completed_sets, outcome, started_at, ended_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(config.exercise_id.as_str())
        .bind(i64::from(config.total_sets))
        .bind(i64::from(config.reps_per_set))
        .bind(i64::from(config.rest_seconds))
        .bind(i64::from(summary.completed_sets()))
        .bind(summary.outcome().as_str())
        .bind(summary.started_at())
        .bind(summary.ended_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(res.last_insert_rowid())
    }

    async fn get_summary(&self, id: WorkoutSummaryId) -> Result<WorkoutSummary, StorageError> {
        let row = sqlx::query(
            r"
                SELECT
                    exercise_id, total_sets, reps_per_set, rest_seconds,
                    completed_sets, outcome, started_at, ended_at
                FROM workout_summaries
                WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?
        .ok_or(StorageError::NotFound)?;

        map_summary_row(&row)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<WorkoutSummaryRow>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT
                    id, exercise_id, total_sets, reps_per_set, rest_seconds,
                    completed_sets, outcome, started_at, ended_at
                FROM workout_summaries
                ORDER BY ended_at DESC, id DESC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter()
            .map(|row| -> Result<WorkoutSummaryRow, StorageError> {
                let id: i64 = row.try_get("id").map_err(ser)?;
                Ok(WorkoutSummaryRow::new(id, map_summary_row(row)?))
            })
            .collect()
    }
}
