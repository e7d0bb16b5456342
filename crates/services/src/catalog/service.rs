use std::sync::Arc;

use fit_core::model::{Exercise, ExerciseFilter, ExerciseId};
use tracing::{debug, warn};

use super::demo::demo_exercises;
use super::source::{ExerciseSource, SourceQuery};
use crate::error::CatalogError;

/// Number of exercises returned by `list` when the caller has no preference.
pub const DEFAULT_LIST_LIMIT: usize = 20;

/// Read-only exercise catalog with a bundled fallback.
///
/// Remote failures never surface from `list`; the demo set is served instead.
#[derive(Clone)]
pub struct CatalogService {
    source: Arc<dyn ExerciseSource>,
    demo: Arc<Vec<Exercise>>,
}

impl CatalogService {
    #[must_use]
    pub fn new(source: Arc<dyn ExerciseSource>) -> Self {
        Self {
            source,
            demo: Arc::new(demo_exercises()),
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.source.is_configured()
    }

    #[must_use]
    pub fn demo(&self) -> &[Exercise] {
        &self.demo
    }

    /// List exercises, optionally restricted to a target muscle.
    pub async fn list(&self, muscle: Option<&str>, limit: usize) -> Vec<Exercise> {
        let muscle = muscle.map(str::trim).filter(|m| !m.is_empty());

        if self.source.is_configured() {
            let query = SourceQuery {
                muscle: muscle.map(str::to_string),
                name: None,
            };
            match self.source.fetch(&query).await {
                Ok(mut exercises) => {
                    exercises.truncate(limit);
                    return exercises;
                }
                Err(err) => warn!(%err, "exercise source failed; serving demo data"),
            }
        } else {
            debug!("exercise source not configured; serving demo data");
        }

        let filter = muscle.map_or_else(ExerciseFilter::new, |m| {
            ExerciseFilter::new().with_target(m)
        });
        filter
            .apply(&self.demo)
            .into_iter()
            .take(limit)
            .cloned()
            .collect()
    }

    /// Exercises whose target muscle is `part`.
    pub async fn by_body_part(&self, part: &str) -> Vec<Exercise> {
        self.list(Some(part), DEFAULT_LIST_LIMIT).await
    }

    /// Resolve one exercise from the default listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` when no listed exercise carries `id`.
    pub async fn get(&self, id: &ExerciseId) -> Result<Exercise, CatalogError> {
        self.list(None, DEFAULT_LIST_LIMIT)
            .await
            .into_iter()
            .find(|ex| ex.id() == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Name search. Matches name or target against the demo set when unconfigured;
    /// a failing remote search yields an empty list.
    pub async fn search(&self, query: &str) -> Vec<Exercise> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        if !self.source.is_configured() {
            let filter = ExerciseFilter::new().with_query(query);
            return filter.apply(&self.demo).into_iter().cloned().collect();
        }

        let source_query = SourceQuery {
            muscle: None,
            name: Some(query.to_string()),
        };
        match self.source.fetch(&source_query).await {
            Ok(exercises) => exercises,
            Err(err) => {
                warn!(%err, query, "exercise search failed");
                Vec::new()
            }
        }
    }

    /// List then narrow with a search/category filter, as the browse screen does.
    pub async fn browse(&self, filter: &ExerciseFilter, limit: usize) -> Vec<Exercise> {
        let all = self.list(None, limit).await;
        filter.apply(&all).into_iter().cloned().collect()
    }
}
