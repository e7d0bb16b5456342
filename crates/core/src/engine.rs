//! Workout session engine.
//!
//! A deterministic state machine for one workout attempt on one exercise:
//! set counting, rest countdown, completion detection and progress.
//!
//! The engine performs no I/O and owns no timer. While the reported phase is
//! [`SessionPhase::Resting`] the host delivers [`WorkoutSession::tick`] roughly
//! once per second and stops as soon as any transition leaves `Resting`
//! (including [`WorkoutSession::abandon`]). Calls must be serialized by the host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{WorkoutConfig, WorkoutConfigError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Contract violations surfaced by the engine. None are retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("invalid workout config: {0}")]
    InvalidConfig(#[from] WorkoutConfigError),

    #[error("a workout session is already in progress")]
    AlreadyStarted,

    #[error("no set is active (phase: {phase:?})")]
    NotActive { phase: SessionPhase },

    #[error("not resting (phase: {phase:?})")]
    NotResting { phase: SessionPhase },

    #[error("invalid session snapshot: {0}")]
    InvalidSnapshot(&'static str),
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    NotStarted,
    ActiveSet,
    Resting,
    Finished,
}

/// Snapshot emitted after every transition.
///
/// `current_set_index` is 1-based and 0 while `NotStarted`;
/// `remaining_rest_seconds` is only meaningful while `Resting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub current_set_index: u32,
    pub remaining_rest_seconds: u32,
    pub completed_sets: u32,
}

impl SessionState {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, SessionPhase::ActiveSet | SessionPhase::Resting)
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// State machine for a single workout attempt.
///
/// Holds nothing across sessions: `abandon` drops the config along with all progress.
#[derive(Debug, Clone, Default)]
pub struct WorkoutSession {
    config: Option<WorkoutConfig>,
    state: SessionState,
}

impl WorkoutSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a session from a persisted config and state.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` for a malformed config and
    /// `EngineError::InvalidSnapshot` when the state breaks a session invariant.
    pub fn from_persisted(config: WorkoutConfig, state: SessionState) -> Result<Self, EngineError> {
        config.validate()?;
        validate_snapshot(&config, &state)?;

        if state.phase == SessionPhase::NotStarted {
            return Ok(Self::new());
        }

        Ok(Self {
            config: Some(config),
            state,
        })
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    #[must_use]
    pub fn config(&self) -> Option<&WorkoutConfig> {
        self.config.as_ref()
    }

    /// Begin a session.
    ///
    /// Allowed from `NotStarted` and from `Finished` (which starts a fresh attempt).
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidConfig` if the config fails validation and
    /// `EngineError::AlreadyStarted` while a set or rest is in progress.
    pub fn start(&mut self, config: WorkoutConfig) -> Result<SessionState, EngineError> {
        if self.state.is_active() {
            return Err(EngineError::AlreadyStarted);
        }
        config.validate()?;

        self.config = Some(config);
        self.state = SessionState {
            phase: SessionPhase::ActiveSet,
            current_set_index: 1,
            remaining_rest_seconds: 0,
            completed_sets: 0,
        };
        Ok(self.state)
    }

    /// Mark the active set as done.
    ///
    /// The final set goes straight to `Finished`; rest is only entered between sets.
    /// With `rest_seconds == 0` the next set becomes active immediately.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotActive` unless the phase is `ActiveSet`.
    pub fn complete_set(&mut self) -> Result<SessionState, EngineError> {
        let phase = self.state.phase;
        let Some(config) = self.config.as_ref().filter(|_| phase == SessionPhase::ActiveSet)
        else {
            return Err(EngineError::NotActive { phase });
        };

        self.state.completed_sets += 1;

        if self.state.current_set_index >= config.total_sets {
            self.state.phase = SessionPhase::Finished;
            self.state.remaining_rest_seconds = 0;
            return Ok(self.state);
        }

        self.state.current_set_index += 1;
        if config.rest_seconds == 0 {
            self.state.phase = SessionPhase::ActiveSet;
            self.state.remaining_rest_seconds = 0;
        } else {
            self.state.phase = SessionPhase::Resting;
            self.state.remaining_rest_seconds = config.rest_seconds;
        }
        Ok(self.state)
    }

    /// Advance the rest countdown by one second. A no-op outside `Resting`.
    pub fn tick(&mut self) -> SessionState {
        if self.state.phase != SessionPhase::Resting {
            return self.state;
        }

        if self.state.remaining_rest_seconds > 1 {
            self.state.remaining_rest_seconds -= 1;
        } else {
            self.state.remaining_rest_seconds = 0;
            self.state.phase = SessionPhase::ActiveSet;
        }
        self.state
    }

    /// End the rest phase early.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotResting` unless the phase is `Resting`.
    pub fn skip_rest(&mut self) -> Result<SessionState, EngineError> {
        if self.state.phase != SessionPhase::Resting {
            return Err(EngineError::NotResting {
                phase: self.state.phase,
            });
        }
        self.state.remaining_rest_seconds = 0;
        self.state.phase = SessionPhase::ActiveSet;
        Ok(self.state)
    }

    /// Discard the session and return to `NotStarted`, from any phase.
    pub fn abandon(&mut self) -> SessionState {
        self.config = None;
        self.state = SessionState::default();
        self.state
    }

    /// `completed_sets / total_sets`, or 0 when no session is configured.
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        match self.config.as_ref() {
            Some(config) if config.total_sets > 0 => {
                f64::from(self.state.completed_sets) / f64::from(config.total_sets)
            }
            _ => 0.0,
        }
    }

    /// True while the last set is in progress; hosts label the action "Finish Workout".
    #[must_use]
    pub fn is_final_set(&self) -> bool {
        self.state.phase == SessionPhase::ActiveSet
            && self
                .config
                .as_ref()
                .is_some_and(|c| self.state.current_set_index == c.total_sets)
    }

    #[must_use]
    pub fn can_skip_rest(&self) -> bool {
        self.state.phase == SessionPhase::Resting
    }
}

fn validate_snapshot(config: &WorkoutConfig, state: &SessionState) -> Result<(), EngineError> {
    let total = config.total_sets;
    if state.completed_sets > total {
        return Err(EngineError::InvalidSnapshot("completed sets exceed total sets"));
    }
    if state.current_set_index > total {
        return Err(EngineError::InvalidSnapshot("set index exceeds total sets"));
    }
    if (state.phase == SessionPhase::Finished) != (state.completed_sets == total) {
        return Err(EngineError::InvalidSnapshot(
            "finished phase must match completed sets",
        ));
    }

    match state.phase {
        SessionPhase::NotStarted => {
            if state.current_set_index != 0
                || state.completed_sets != 0
                || state.remaining_rest_seconds != 0
            {
                return Err(EngineError::InvalidSnapshot("not-started state carries progress"));
            }
        }
        SessionPhase::ActiveSet => {
            if state.current_set_index == 0 || state.completed_sets + 1 != state.current_set_index
            {
                return Err(EngineError::InvalidSnapshot("active set index out of step"));
            }
            if state.remaining_rest_seconds != 0 {
                return Err(EngineError::InvalidSnapshot("active set has pending rest"));
            }
        }
        SessionPhase::Resting => {
            if state.current_set_index < 2 || state.completed_sets + 1 != state.current_set_index
            {
                return Err(EngineError::InvalidSnapshot("resting set index out of step"));
            }
            if state.remaining_rest_seconds == 0
                || state.remaining_rest_seconds > config.rest_seconds
            {
                return Err(EngineError::InvalidSnapshot("rest countdown out of range"));
            }
        }
        SessionPhase::Finished => {
            if state.current_set_index != total || state.remaining_rest_seconds != 0 {
                return Err(EngineError::InvalidSnapshot("finished state out of step"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ExerciseId;

    fn config(total_sets: u32, reps_per_set: u32, rest_seconds: u32) -> WorkoutConfig {
        WorkoutConfig::new(
            ExerciseId::new("ex_0_bench_press").unwrap(),
            total_sets,
            reps_per_set,
            rest_seconds,
        )
    }

    fn started(total_sets: u32, rest_seconds: u32) -> WorkoutSession {
        let mut session = WorkoutSession::new();
        session.start(config(total_sets, 10, rest_seconds)).unwrap();
        session
    }

    #[test]
    fn start_enters_first_active_set() {
        let mut session = WorkoutSession::new();
        let state = session.start(config(3, 10, 60)).unwrap();
        assert_eq!(
            state,
            SessionState {
                phase: SessionPhase::ActiveSet,
                current_set_index: 1,
                remaining_rest_seconds: 0,
                completed_sets: 0,
            }
        );
    }

    #[test]
    fn completing_a_set_enters_rest() {
        let mut session = started(3, 60);
        let state = session.complete_set().unwrap();
        assert_eq!(
            state,
            SessionState {
                phase: SessionPhase::Resting,
                current_set_index: 2,
                remaining_rest_seconds: 60,
                completed_sets: 1,
            }
        );
    }

    #[test]
    fn rest_counts_down_to_next_set() {
        let mut session = started(3, 60);
        session.complete_set().unwrap();

        for expected in (1..60).rev() {
            let state = session.tick();
            assert_eq!(state.phase, SessionPhase::Resting);
            assert_eq!(state.remaining_rest_seconds, expected);
        }

        let state = session.tick();
        assert_eq!(state.phase, SessionPhase::ActiveSet);
        assert_eq!(state.current_set_index, 2);
        assert_eq!(state.remaining_rest_seconds, 0);
    }

    #[test]
    fn final_set_finishes_without_rest() {
        let mut session = started(3, 60);
        for _ in 0..2 {
            session.complete_set().unwrap();
            while session.phase() == SessionPhase::Resting {
                session.tick();
            }
        }
        assert_eq!(session.state().current_set_index, 3);
        assert!(session.is_final_set());

        let state = session.complete_set().unwrap();
        assert_eq!(state.phase, SessionPhase::Finished);
        assert_eq!(state.completed_sets, 3);
        assert_eq!(state.remaining_rest_seconds, 0);
        assert!((session.progress_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn single_set_session_finishes_immediately() {
        let mut session = started(1, 30);
        assert!(session.is_final_set());
        let state = session.complete_set().unwrap();
        assert_eq!(state.phase, SessionPhase::Finished);
    }

    #[test]
    fn zero_rest_skips_resting_phase() {
        let mut session = started(2, 0);
        let state = session.complete_set().unwrap();
        assert_eq!(state.phase, SessionPhase::ActiveSet);
        assert_eq!(state.current_set_index, 2);
        assert_eq!(state.completed_sets, 1);
    }

    #[test]
    fn skip_rest_short_circuits_countdown() {
        let mut session = started(3, 60);
        session.complete_set().unwrap();
        session.tick();
        session.tick();
        assert!(session.can_skip_rest());

        let state = session.skip_rest().unwrap();
        assert_eq!(state.phase, SessionPhase::ActiveSet);
        assert_eq!(state.remaining_rest_seconds, 0);
        assert_eq!(state.current_set_index, 2);
    }

    #[test]
    fn tick_is_noop_outside_rest() {
        let mut session = WorkoutSession::new();
        assert_eq!(session.tick(), SessionState::default());

        session.start(config(1, 5, 10)).unwrap();
        let before = session.state();
        assert_eq!(session.tick(), before);

        session.complete_set().unwrap();
        let finished = session.state();
        assert_eq!(session.tick(), finished);
    }

    #[test]
    fn abandon_resets_from_every_phase() {
        let reset = SessionState::default();

        let mut active = started(3, 60);
        assert_eq!(active.abandon(), reset);
        assert!(active.config().is_none());

        let mut resting = started(3, 60);
        resting.complete_set().unwrap();
        assert_eq!(resting.abandon(), reset);

        let mut finished = started(1, 60);
        finished.complete_set().unwrap();
        assert_eq!(finished.abandon(), reset);

        let mut fresh = WorkoutSession::new();
        assert_eq!(fresh.abandon(), reset);
        assert_eq!(fresh.progress_fraction(), 0.0);
    }

    #[test]
    fn start_rejects_invalid_config() {
        let mut session = WorkoutSession::new();
        assert_eq!(
            session.start(config(0, 10, 60)),
            Err(EngineError::InvalidConfig(WorkoutConfigError::InvalidTotalSets))
        );
        assert_eq!(
            session.start(config(3, 0, 60)),
            Err(EngineError::InvalidConfig(WorkoutConfigError::InvalidRepsPerSet))
        );
        assert_eq!(session.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn start_twice_is_rejected_while_active() {
        let mut session = started(3, 60);
        assert_eq!(session.start(config(2, 5, 5)), Err(EngineError::AlreadyStarted));

        session.complete_set().unwrap();
        assert_eq!(session.start(config(2, 5, 5)), Err(EngineError::AlreadyStarted));
        assert_eq!(session.config().unwrap().total_sets, 3);
    }

    #[test]
    fn start_after_finish_begins_fresh_attempt() {
        let mut session = started(1, 60);
        session.complete_set().unwrap();
        let state = session.start(config(2, 8, 30)).unwrap();
        assert_eq!(state.current_set_index, 1);
        assert_eq!(state.completed_sets, 0);
    }

    #[test]
    fn misuse_errors_report_phase() {
        let mut session = WorkoutSession::new();
        assert_eq!(
            session.complete_set(),
            Err(EngineError::NotActive {
                phase: SessionPhase::NotStarted
            })
        );
        assert_eq!(
            session.skip_rest(),
            Err(EngineError::NotResting {
                phase: SessionPhase::NotStarted
            })
        );

        session.start(config(2, 10, 60)).unwrap();
        assert!(matches!(session.skip_rest(), Err(EngineError::NotResting { .. })));

        session.complete_set().unwrap();
        assert_eq!(
            session.complete_set(),
            Err(EngineError::NotActive {
                phase: SessionPhase::Resting
            })
        );
    }

    #[test]
    fn progress_follows_completed_sets() {
        let mut session = started(4, 10);
        assert_eq!(session.progress_fraction(), 0.0);
        session.complete_set().unwrap();
        assert!((session.progress_fraction() - 0.25).abs() < f64::EPSILON);
        session.skip_rest().unwrap();
        assert!((session.progress_fraction() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn from_persisted_restores_resting_state() {
        let state = SessionState {
            phase: SessionPhase::Resting,
            current_set_index: 2,
            remaining_rest_seconds: 12,
            completed_sets: 1,
        };
        let mut session = WorkoutSession::from_persisted(config(3, 10, 60), state).unwrap();
        assert_eq!(session.state(), state);
        assert_eq!(session.tick().remaining_rest_seconds, 11);
    }

    #[test]
    fn from_persisted_rejects_broken_snapshots() {
        let bad = [
            SessionState {
                phase: SessionPhase::Resting,
                current_set_index: 3,
                remaining_rest_seconds: 0,
                completed_sets: 2,
            },
            SessionState {
                phase: SessionPhase::Resting,
                current_set_index: 2,
                remaining_rest_seconds: 61,
                completed_sets: 1,
            },
            SessionState {
                phase: SessionPhase::ActiveSet,
                current_set_index: 2,
                remaining_rest_seconds: 0,
                completed_sets: 0,
            },
            SessionState {
                phase: SessionPhase::Finished,
                current_set_index: 3,
                remaining_rest_seconds: 0,
                completed_sets: 2,
            },
            SessionState {
                phase: SessionPhase::ActiveSet,
                current_set_index: 4,
                remaining_rest_seconds: 0,
                completed_sets: 3,
            },
            SessionState {
                phase: SessionPhase::NotStarted,
                current_set_index: 1,
                remaining_rest_seconds: 0,
                completed_sets: 0,
            },
        ];
        for state in bad {
            assert!(
                matches!(
                    WorkoutSession::from_persisted(config(3, 10, 60), state),
                    Err(EngineError::InvalidSnapshot(_))
                ),
                "accepted {state:?}"
            );
        }
    }

    #[test]
    fn state_serializes_with_snake_case_phase() {
        let session = started(2, 30);
        let json = serde_json::to_string(&session.state()).unwrap();
        assert!(json.contains("\"active_set\""));
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session.state());
    }

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Complete,
        Tick,
        Skip,
        Abandon,
    }

    fn apply(session: &mut WorkoutSession, op: Op) {
        match op {
            Op::Complete => {
                let _ = session.complete_set();
            }
            Op::Tick => {
                session.tick();
            }
            Op::Skip => {
                let _ = session.skip_rest();
            }
            Op::Abandon => {
                session.abandon();
            }
        }
    }

    fn assert_invariants(session: &WorkoutSession, prev: &SessionState) {
        let state = session.state();
        let Some(cfg) = session.config() else {
            assert_eq!(state, SessionState::default());
            return;
        };
        let total = cfg.total_sets;
        assert!(state.completed_sets <= total);
        assert!(state.current_set_index <= total);
        assert_eq!(state.phase == SessionPhase::Finished, state.completed_sets == total);
        if state.phase == SessionPhase::Resting {
            assert!(state.completed_sets < total);
            assert!(state.remaining_rest_seconds >= 1);
        }
        if prev.phase != SessionPhase::NotStarted && state.phase != SessionPhase::NotStarted {
            assert!(state.current_set_index >= prev.current_set_index);
        }
        if prev.phase == SessionPhase::Resting && state.phase == SessionPhase::Resting {
            assert!(state.remaining_rest_seconds <= prev.remaining_rest_seconds);
        }
        validate_snapshot(cfg, &state).unwrap();
    }

    #[test]
    fn invariants_hold_for_all_short_op_sequences() {
        const OPS: [Op; 4] = [Op::Complete, Op::Tick, Op::Skip, Op::Abandon];
        const DEPTH: u32 = 7;

        for sets in 1..=3 {
            for rest in 0..=2 {
                for seq in 0..4_u32.pow(DEPTH) {
                    let mut session = started(sets, rest);
                    let mut code = seq;
                    for _ in 0..DEPTH {
                        let prev = session.state();
                        apply(&mut session, OPS[(code % 4) as usize]);
                        code /= 4;
                        assert_invariants(&session, &prev);
                    }
                }
            }
        }
    }
}
