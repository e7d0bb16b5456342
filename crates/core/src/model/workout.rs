use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ExerciseId;

/// Step applied by the rest-duration stepper during workout setup.
pub const REST_STEP_SECONDS: u32 = 15;
/// Lower bound the rest-duration stepper will not go below.
pub const MIN_STEPPED_REST_SECONDS: u32 = 15;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkoutConfigError {
    #[error("total sets must be >= 1")]
    InvalidTotalSets,

    #[error("reps per set must be >= 1")]
    InvalidRepsPerSet,
}

/// Parameters for one workout attempt. Immutable once a session starts.
///
/// `rest_seconds == 0` means no rest phase is entered between sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutConfig {
    pub exercise_id: ExerciseId,
    pub total_sets: u32,
    pub reps_per_set: u32,
    pub rest_seconds: u32,
}

impl WorkoutConfig {
    #[must_use]
    pub fn new(exercise_id: ExerciseId, total_sets: u32, reps_per_set: u32, rest_seconds: u32) -> Self {
        Self {
            exercise_id,
            total_sets,
            reps_per_set,
            rest_seconds,
        }
    }

    /// Setup defaults shown before the user adjusts anything: 3 x 10, 60 s rest.
    #[must_use]
    pub fn default_for(exercise_id: ExerciseId) -> Self {
        Self::new(exercise_id, 3, 10, 60)
    }

    /// # Errors
    ///
    /// Returns `WorkoutConfigError` if sets or reps are zero.
    pub fn validate(&self) -> Result<(), WorkoutConfigError> {
        if self.total_sets < 1 {
            return Err(WorkoutConfigError::InvalidTotalSets);
        }
        if self.reps_per_set < 1 {
            return Err(WorkoutConfigError::InvalidRepsPerSet);
        }
        Ok(())
    }

    pub fn increment_sets(&mut self) {
        self.total_sets = self.total_sets.saturating_add(1);
    }

    pub fn decrement_sets(&mut self) {
        self.total_sets = self.total_sets.saturating_sub(1).max(1);
    }

    pub fn increment_reps(&mut self) {
        self.reps_per_set = self.reps_per_set.saturating_add(1);
    }

    pub fn decrement_reps(&mut self) {
        self.reps_per_set = self.reps_per_set.saturating_sub(1).max(1);
    }

    pub fn increment_rest(&mut self) {
        self.rest_seconds = self.rest_seconds.saturating_add(REST_STEP_SECONDS);
    }

    pub fn decrement_rest(&mut self) {
        self.rest_seconds = self
            .rest_seconds
            .saturating_sub(REST_STEP_SECONDS)
            .max(MIN_STEPPED_REST_SECONDS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> ExerciseId {
        ExerciseId::new("ex_1_squat").unwrap()
    }

    #[test]
    fn defaults_are_three_by_ten() {
        let cfg = WorkoutConfig::default_for(id());
        assert_eq!((cfg.total_sets, cfg.reps_per_set, cfg.rest_seconds), (3, 10, 60));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_sets_and_reps() {
        assert_eq!(
            WorkoutConfig::new(id(), 0, 10, 60).validate(),
            Err(WorkoutConfigError::InvalidTotalSets)
        );
        assert_eq!(
            WorkoutConfig::new(id(), 3, 0, 60).validate(),
            Err(WorkoutConfigError::InvalidRepsPerSet)
        );
        assert!(WorkoutConfig::new(id(), 1, 1, 0).validate().is_ok());
    }

    #[test]
    fn steppers_respect_floors() {
        let mut cfg = WorkoutConfig::new(id(), 1, 1, 30);
        cfg.decrement_sets();
        cfg.decrement_reps();
        cfg.decrement_rest();
        cfg.decrement_rest();
        assert_eq!((cfg.total_sets, cfg.reps_per_set, cfg.rest_seconds), (1, 1, 15));

        cfg.increment_sets();
        cfg.increment_reps();
        cfg.increment_rest();
        assert_eq!((cfg.total_sets, cfg.reps_per_set, cfg.rest_seconds), (2, 2, 30));
    }
}
