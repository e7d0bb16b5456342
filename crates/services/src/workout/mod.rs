mod rest_timer;
mod run;
mod service;
mod view;

// Public API of the workout subsystem.
pub use crate::error::WorkoutError;
pub use rest_timer::{REST_TICK, RestTimer};
pub use run::WorkoutRun;
pub use service::WorkoutLoopService;
pub use view::WorkoutHistoryItem;
