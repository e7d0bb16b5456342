use chrono::{DateTime, Utc};

use fit_core::model::{ExerciseId, WorkoutOutcome};
use storage::repository::{WorkoutSummaryId, WorkoutSummaryRow};

/// Presentation-agnostic history row for a stored workout.
///
/// Hosts format timestamps and durations themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutHistoryItem {
    pub id: WorkoutSummaryId,
    pub exercise_id: ExerciseId,
    pub outcome: WorkoutOutcome,
    pub ended_at: DateTime<Utc>,

    pub completed_sets: u32,
    pub total_sets: u32,
    pub total_reps: u64,
    pub duration_secs: i64,
}

impl WorkoutHistoryItem {
    #[must_use]
    pub fn from_row(row: &WorkoutSummaryRow) -> Self {
        let summary = &row.summary;
        Self {
            id: row.id,
            exercise_id: summary.config().exercise_id.clone(),
            outcome: summary.outcome(),
            ended_at: summary.ended_at(),
            completed_sets: summary.completed_sets(),
            total_sets: summary.config().total_sets,
            total_reps: summary.total_reps(),
            duration_secs: summary.duration_secs(),
        }
    }
}
