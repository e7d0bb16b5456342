use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::workout::WorkoutConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkoutSummaryError {
    #[error("ended_at is before started_at")]
    InvalidTimeRange,

    #[error("completed sets ({completed}) exceed total sets ({total})")]
    TooManySets { completed: u32, total: u32 },

    #[error("outcome {outcome:?} does not agree with {completed}/{total} sets")]
    OutcomeMismatch {
        outcome: WorkoutOutcome,
        completed: u32,
        total: u32,
    },
}

/// How a workout session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutOutcome {
    Finished,
    Abandoned,
}

impl WorkoutOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Finished => "finished",
            Self::Abandoned => "abandoned",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "finished" => Some(Self::Finished),
            "abandoned" => Some(Self::Abandoned),
            _ => None,
        }
    }
}

/// Report of one ended workout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutSummary {
    config: WorkoutConfig,
    completed_sets: u32,
    outcome: WorkoutOutcome,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
}

impl WorkoutSummary {
    /// Build a summary, checking it against the session invariants.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutSummaryError` when timestamps are reversed, the set count
    /// exceeds the configured total, or the outcome disagrees with the set count.
    pub fn new(
        config: WorkoutConfig,
        completed_sets: u32,
        outcome: WorkoutOutcome,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Result<Self, WorkoutSummaryError> {
        if ended_at < started_at {
            return Err(WorkoutSummaryError::InvalidTimeRange);
        }
        let total = config.total_sets;
        if completed_sets > total {
            return Err(WorkoutSummaryError::TooManySets {
                completed: completed_sets,
                total,
            });
        }
        let finished = completed_sets == total;
        if finished != (outcome == WorkoutOutcome::Finished) {
            return Err(WorkoutSummaryError::OutcomeMismatch {
                outcome,
                completed: completed_sets,
                total,
            });
        }

        Ok(Self {
            config,
            completed_sets,
            outcome,
            started_at,
            ended_at,
        })
    }

    #[must_use]
    pub fn config(&self) -> &WorkoutConfig {
        &self.config
    }

    #[must_use]
    pub fn completed_sets(&self) -> u32 {
        self.completed_sets
    }

    #[must_use]
    pub fn outcome(&self) -> WorkoutOutcome {
        self.outcome
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.ended_at
    }

    /// Total reps performed across completed sets.
    #[must_use]
    pub fn total_reps(&self) -> u64 {
        u64::from(self.completed_sets) * u64::from(self.config.reps_per_set)
    }

    #[must_use]
    pub fn duration_secs(&self) -> i64 {
        (self.ended_at - self.started_at).num_seconds()
    }
}
