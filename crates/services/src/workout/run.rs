use chrono::{DateTime, Utc};

use fit_core::model::{Exercise, WorkoutConfig, WorkoutSummary};
use fit_core::{SessionPhase, SessionState, WorkoutSession};
use storage::repository::{WorkoutSnapshot, WorkoutSummaryId};

/// One workout attempt on one exercise: the resolved exercise plus its engine.
///
/// Owned by a single host task; `WorkoutLoopService` drives every transition.
#[derive(Debug, Clone)]
pub struct WorkoutRun {
    exercise: Exercise,
    pub(super) session: WorkoutSession,
    pub(super) started_at: Option<DateTime<Utc>>,
    pub(super) summary_id: Option<WorkoutSummaryId>,
    pub(super) pending_summary: Option<WorkoutSummary>,
}

impl WorkoutRun {
    #[must_use]
    pub fn new(exercise: Exercise) -> Self {
        Self {
            exercise,
            session: WorkoutSession::new(),
            started_at: None,
            summary_id: None,
            pending_summary: None,
        }
    }

    pub(super) fn restored(
        exercise: Exercise,
        session: WorkoutSession,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            exercise,
            session,
            started_at: Some(started_at),
            summary_id: None,
            pending_summary: None,
        }
    }

    #[must_use]
    pub fn exercise(&self) -> &Exercise {
        &self.exercise
    }

    #[must_use]
    pub fn session(&self) -> &WorkoutSession {
        &self.session
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    #[must_use]
    pub fn config(&self) -> Option<&WorkoutConfig> {
        self.session.config()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Id of the summary stored for this attempt, once it has been appended.
    #[must_use]
    pub fn summary_id(&self) -> Option<WorkoutSummaryId> {
        self.summary_id
    }

    /// True when a summary was built but its append failed.
    #[must_use]
    pub fn has_pending_summary(&self) -> bool {
        self.pending_summary.is_some()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.phase() == SessionPhase::Finished
    }

    /// Label for the primary action while a set is active.
    #[must_use]
    pub fn action_label(&self) -> &'static str {
        if self.session.is_final_set() {
            "Finish Workout"
        } else {
            "Complete Set"
        }
    }

    pub(super) fn snapshot(&self, fallback_start: DateTime<Utc>) -> Option<WorkoutSnapshot> {
        let config = self.session.config()?.clone();
        Some(WorkoutSnapshot {
            config,
            state: self.session.state(),
            started_at: self.started_at.unwrap_or(fallback_start),
        })
    }
}
