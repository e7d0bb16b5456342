use thiserror::Error;

use crate::engine::EngineError;
use crate::model::{AppSettingsError, ExerciseError, WorkoutConfigError, WorkoutSummaryError};

/// Umbrella error for callers that want a single domain error type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error(transparent)]
    WorkoutConfig(#[from] WorkoutConfigError),
    #[error(transparent)]
    Summary(#[from] WorkoutSummaryError),
    #[error(transparent)]
    Settings(#[from] AppSettingsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExerciseId, WorkoutConfig};
    use crate::WorkoutSession;

    fn start_with(total_sets: u32) -> Result<(), Error> {
        let id = ExerciseId::new("ex_1_squat").map_err(|_| EngineError::InvalidSnapshot("id"))?;
        let mut session = WorkoutSession::new();
        session.start(WorkoutConfig::new(id, total_sets, 10, 60))?;
        Ok(())
    }

    #[test]
    fn engine_errors_lift_into_umbrella() {
        assert!(start_with(3).is_ok());
        let err = start_with(0).unwrap_err();
        assert!(matches!(
            err,
            Error::Engine(EngineError::InvalidConfig(WorkoutConfigError::InvalidTotalSets))
        ));
    }
}
