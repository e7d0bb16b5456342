mod app_settings;
mod exercise;
mod ids;
mod summary;
mod workout;

pub use app_settings::{AppSettings, AppSettingsDraft, AppSettingsError, Theme};
pub use exercise::{Difficulty, Exercise, ExerciseDraft, ExerciseError, ExerciseFilter};
pub use ids::{ExerciseId, ParseIdError};
pub use summary::{WorkoutOutcome, WorkoutSummary, WorkoutSummaryError};
pub use workout::{
    MIN_STEPPED_REST_SECONDS, REST_STEP_SECONDS, WorkoutConfig, WorkoutConfigError,
};
