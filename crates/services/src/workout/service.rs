use std::sync::Arc;

use fit_core::model::{ExerciseId, WorkoutConfig, WorkoutOutcome, WorkoutSummary};
use fit_core::{EngineError, SessionState, WorkoutSession};
use storage::repository::{WorkoutSnapshotRepository, WorkoutSummaryId, WorkoutSummaryRepository};
use tracing::{debug, info, warn};

use super::run::WorkoutRun;
use super::view::WorkoutHistoryItem;
use crate::Clock;
use crate::catalog::CatalogService;
use crate::error::WorkoutError;

/// Orchestrates workout runs: engine transitions plus snapshot and summary persistence.
///
/// Snapshot writes are best-effort. A failed summary append is reported but the
/// engine transition stands; `finalize_summary` retries it.
#[derive(Clone)]
pub struct WorkoutLoopService {
    clock: Clock,
    catalog: Arc<CatalogService>,
    snapshots: Arc<dyn WorkoutSnapshotRepository>,
    summaries: Arc<dyn WorkoutSummaryRepository>,
}

impl WorkoutLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<CatalogService>,
        snapshots: Arc<dyn WorkoutSnapshotRepository>,
        summaries: Arc<dyn WorkoutSummaryRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            snapshots,
            summaries,
        }
    }

    /// Resolve an exercise and wrap it in a fresh run.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::Catalog` when the exercise cannot be found.
    pub async fn prepare(&self, exercise_id: &ExerciseId) -> Result<WorkoutRun, WorkoutError> {
        let exercise = self.catalog.get(exercise_id).await?;
        Ok(WorkoutRun::new(exercise))
    }

    /// Begin the workout with `config`.
    ///
    /// A persisted in-progress run that this start replaces is recorded as abandoned.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::ExerciseMismatch` when the config names another exercise,
    /// `WorkoutError::Engine` when the engine rejects the start, or `WorkoutError::Storage`
    /// when the replaced run cannot be read or recorded.
    pub async fn start(
        &self,
        run: &mut WorkoutRun,
        config: WorkoutConfig,
    ) -> Result<SessionState, WorkoutError> {
        let expected = run.exercise().id();
        if &config.exercise_id != expected {
            return Err(WorkoutError::ExerciseMismatch {
                expected: expected.clone(),
                got: config.exercise_id,
            });
        }

        if run.session.state().is_active() {
            return Err(EngineError::AlreadyStarted.into());
        }
        config.validate().map_err(EngineError::from)?;
        self.record_replaced_snapshot().await?;

        let total_sets = config.total_sets;
        let state = run.session.start(config)?;
        if run.pending_summary.take().is_some() {
            warn!("discarding unsaved summary of the previous attempt");
        }
        run.started_at = Some(self.clock.now());
        run.summary_id = None;

        info!(exercise = %run.exercise().id(), total_sets, "workout started");
        self.save_snapshot(run).await;
        Ok(state)
    }

    /// Complete the active set. Finishing the last set stores the summary.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::Engine` when no set is active, or `WorkoutError::Storage`
    /// when the final summary cannot be appended (the run stays finished).
    pub async fn complete_set(&self, run: &mut WorkoutRun) -> Result<SessionState, WorkoutError> {
        let state = run.session.complete_set()?;
        debug!(?state, "set completed");

        if run.is_finished() {
            info!(exercise = %run.exercise().id(), sets = state.completed_sets, "workout finished");
            let summary = self.build_summary(run, WorkoutOutcome::Finished)?;
            self.clear_snapshot().await;
            self.store_summary(run, summary).await?;
        } else {
            self.save_snapshot(run).await;
        }
        Ok(state)
    }

    /// Deliver one rest-countdown second.
    pub async fn tick(&self, run: &mut WorkoutRun) -> SessionState {
        let before = run.session.state();
        let state = run.session.tick();
        if state != before {
            debug!(remaining = state.remaining_rest_seconds, phase = ?state.phase, "rest tick");
            self.save_snapshot(run).await;
        }
        state
    }

    /// # Errors
    ///
    /// Returns `WorkoutError::Engine` unless the run is resting.
    pub async fn skip_rest(&self, run: &mut WorkoutRun) -> Result<SessionState, WorkoutError> {
        let state = run.session.skip_rest()?;
        debug!(set = state.current_set_index, "rest skipped");
        self.save_snapshot(run).await;
        Ok(state)
    }

    /// Drop the current attempt. An attempt abandoned mid-way is recorded.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::Storage` when the abandoned summary cannot be appended.
    pub async fn abandon(&self, run: &mut WorkoutRun) -> Result<SessionState, WorkoutError> {
        let summary = if run.session.state().is_active() {
            Some(self.build_summary(run, WorkoutOutcome::Abandoned)?)
        } else {
            None
        };

        let state = run.session.abandon();
        self.clear_snapshot().await;

        if let Some(summary) = summary {
            info!(
                exercise = %run.exercise().id(),
                sets = summary.completed_sets(),
                "workout abandoned"
            );
            self.store_summary(run, summary).await?;
        }
        Ok(state)
    }

    /// Retry a summary append that failed when the run ended.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::NothingToFinalize` if no summary is waiting, or
    /// `WorkoutError::Storage` if persistence fails again.
    pub async fn finalize_summary(
        &self,
        run: &mut WorkoutRun,
    ) -> Result<WorkoutSummaryId, WorkoutError> {
        if let Some(id) = run.summary_id {
            return Ok(id);
        }
        let summary = run
            .pending_summary
            .clone()
            .ok_or(WorkoutError::NothingToFinalize)?;
        self.store_summary(run, summary).await
    }

    /// Restore the persisted in-progress run, if any.
    ///
    /// Snapshots that fail validation are discarded.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::Storage` on read failures, or `WorkoutError::Catalog`
    /// when the snapshot's exercise cannot be resolved.
    pub async fn resume(&self) -> Result<Option<WorkoutRun>, WorkoutError> {
        let Some(snapshot) = self.snapshots.load_snapshot().await? else {
            return Ok(None);
        };

        let exercise_id = snapshot.config.exercise_id.clone();
        let session = match WorkoutSession::from_persisted(snapshot.config, snapshot.state) {
            Ok(session) if session.state().is_active() => session,
            Ok(_) => {
                debug!("persisted workout is not in progress; discarding");
                self.clear_snapshot().await;
                return Ok(None);
            }
            Err(err) => {
                warn!(%err, "discarding invalid workout snapshot");
                self.clear_snapshot().await;
                return Ok(None);
            }
        };

        let exercise = self.catalog.get(&exercise_id).await?;
        info!(exercise = %exercise_id, "workout resumed");
        Ok(Some(WorkoutRun::restored(
            exercise,
            session,
            snapshot.started_at,
        )))
    }

    /// Most recent workouts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `WorkoutError::Storage` on repository failures.
    pub async fn history(&self, limit: u32) -> Result<Vec<WorkoutHistoryItem>, WorkoutError> {
        let rows = self.summaries.list_recent(limit).await?;
        Ok(rows.iter().map(WorkoutHistoryItem::from_row).collect())
    }

    /// Whole seconds since the run started, 0 before start.
    #[must_use]
    pub fn elapsed_secs(&self, run: &WorkoutRun) -> u64 {
        run.started_at
            .map_or(0, |started_at| self.clock.seconds_since(started_at))
    }

    async fn record_replaced_snapshot(&self) -> Result<(), WorkoutError> {
        let Some(snapshot) = self.snapshots.load_snapshot().await? else {
            return Ok(());
        };
        let config = snapshot.config.clone();
        let session = match WorkoutSession::from_persisted(snapshot.config, snapshot.state) {
            Ok(session) if session.state().is_active() => session,
            Ok(_) => return Ok(()),
            Err(err) => {
                warn!(%err, "replacing invalid workout snapshot");
                return Ok(());
            }
        };

        let ended_at = self.clock.now().max(snapshot.started_at);
        let summary = WorkoutSummary::new(
            config,
            session.state().completed_sets,
            WorkoutOutcome::Abandoned,
            snapshot.started_at,
            ended_at,
        )?;
        self.summaries.append_summary(&summary).await?;
        self.clear_snapshot().await;
        info!(
            exercise = %summary.config().exercise_id,
            sets = summary.completed_sets(),
            "saved workout replaced; recorded as abandoned"
        );
        Ok(())
    }

    fn build_summary(
        &self,
        run: &WorkoutRun,
        outcome: WorkoutOutcome,
    ) -> Result<WorkoutSummary, WorkoutError> {
        let config = run
            .session
            .config()
            .cloned()
            .ok_or(WorkoutError::NothingToFinalize)?;
        let ended_at = self.clock.now();
        let started_at = run.started_at.unwrap_or(ended_at);
        let completed = run.session.state().completed_sets;
        Ok(WorkoutSummary::new(
            config, completed, outcome, started_at, ended_at,
        )?)
    }

    async fn store_summary(
        &self,
        run: &mut WorkoutRun,
        summary: WorkoutSummary,
    ) -> Result<WorkoutSummaryId, WorkoutError> {
        match self.summaries.append_summary(&summary).await {
            Ok(id) => {
                run.summary_id = Some(id);
                run.pending_summary = None;
                Ok(id)
            }
            Err(err) => {
                warn!(%err, "failed to store workout summary");
                run.pending_summary = Some(summary);
                Err(err.into())
            }
        }
    }

    async fn save_snapshot(&self, run: &WorkoutRun) {
        let Some(snapshot) = run.snapshot(self.clock.now()) else {
            return;
        };
        if let Err(err) = self.snapshots.save_snapshot(&snapshot).await {
            warn!(%err, "failed to persist workout snapshot");
        }
    }

    async fn clear_snapshot(&self) {
        if let Err(err) = self.snapshots.clear_snapshot().await {
            warn!(%err, "failed to clear workout snapshot");
        }
    }
}
