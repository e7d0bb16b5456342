use std::env;

use async_trait::async_trait;
use fit_core::model::{AppSettings, Difficulty, Exercise, ExerciseDraft, ExerciseError};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CatalogError;

pub const DEFAULT_EXERCISES_URL: &str = "https://api.api-ninjas.com/v1/exercises";
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

/// Where and how to reach the remote exercise API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EXERCISES_URL.to_string(),
            api_key: None,
        }
    }
}

impl CatalogConfig {
    /// Read `FIT_EXERCISES_API_KEY` and `FIT_EXERCISES_BASE_URL`.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = env::var("FIT_EXERCISES_API_KEY").ok();
        let base_url =
            env::var("FIT_EXERCISES_BASE_URL").unwrap_or_else(|_| DEFAULT_EXERCISES_URL.into());
        Self { base_url, api_key }
    }

    /// Persisted settings take precedence over environment values.
    #[must_use]
    pub fn with_settings(mut self, settings: &AppSettings) -> Self {
        if let Some(key) = settings.exercise_api_key() {
            self.api_key = Some(key.to_string());
        }
        if let Some(url) = settings.exercise_api_base_url() {
            self.base_url = url.to_string();
        }
        self
    }

    /// A usable key is present and is not the placeholder shipped in sample configs.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .map(str::trim)
            .is_some_and(|key| !key.is_empty() && key != PLACEHOLDER_API_KEY)
    }
}

/// Query forwarded to an exercise source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceQuery {
    pub muscle: Option<String>,
    pub name: Option<String>,
}

/// A backend that can list exercises.
#[async_trait]
pub trait ExerciseSource: Send + Sync {
    /// Whether the source can be queried at all. Unconfigured sources are skipped.
    fn is_configured(&self) -> bool;

    /// # Errors
    ///
    /// Returns `CatalogError` on transport or status failures.
    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<Exercise>, CatalogError>;
}

/// `reqwest`-backed source speaking the API-Ninjas exercises format.
#[derive(Clone)]
pub struct RemoteExerciseSource {
    client: Client,
    config: CatalogConfig,
}

impl RemoteExerciseSource {
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(CatalogConfig::from_env())
    }
}

#[async_trait]
impl ExerciseSource for RemoteExerciseSource {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    async fn fetch(&self, query: &SourceQuery) -> Result<Vec<Exercise>, CatalogError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|_| self.config.is_configured())
            .ok_or(CatalogError::Disabled)?;

        let mut params: Vec<(&str, String)> = vec![("offset", "0".to_string())];
        if let Some(muscle) = query.muscle.as_deref() {
            params.push(("muscle", muscle.to_string()));
        }
        if let Some(name) = query.name.as_deref() {
            params.push(("name", name.to_string()));
        }

        debug!(url = %self.config.base_url, ?query, "fetching exercises");
        let response = self
            .client
            .get(&self.config.base_url)
            .header("X-Api-Key", api_key)
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus(response.status()));
        }

        let rows: Vec<RemoteExercise> = response.json().await?;
        Ok(map_remote_rows(rows))
    }
}

/// Row shape returned by the remote API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteExercise {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub muscle: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub instructions: String,
}

/// Map remote rows to catalog exercises, dropping rows that fail validation.
#[must_use]
pub fn map_remote_rows(rows: Vec<RemoteExercise>) -> Vec<Exercise> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match map_remote(index, row) {
            Ok(exercise) => Some(exercise),
            Err(err) => {
                warn!(index, %err, "skipping malformed exercise row");
                None
            }
        })
        .collect()
}

/// Map one remote row at position `index` in the response.
///
/// # Errors
///
/// Returns `ExerciseError` if the mapped record fails validation.
pub fn map_remote(index: usize, row: RemoteExercise) -> Result<Exercise, ExerciseError> {
    let id = format!("ex_{index}_{}", slug(&row.name, '_'));
    catalog_draft(
        id,
        &row.name,
        &row.kind,
        &row.muscle,
        &row.equipment,
        &row.difficulty,
        &row.instructions,
    )
    .validate()
}

/// Build a catalog record with the derived image, description and rating.
pub(crate) fn catalog_draft(
    id: String,
    name: &str,
    kind: &str,
    muscle: &str,
    equipment: &str,
    difficulty: &str,
    instructions: &str,
) -> ExerciseDraft {
    let level = Difficulty::parse(difficulty);
    let description = format!(
        "{name} is a {difficulty} level exercise that targets your {muscle}. \
         This exercise is great for building strength and improving your fitness."
    );

    ExerciseDraft {
        id,
        name: name.to_string(),
        image_url: image_url(name),
        target: muscle.to_string(),
        body_part: kind.to_string(),
        equipment: equipment.to_string(),
        difficulty: level.map(|d| d.as_str().to_string()),
        description: Some(description),
        instructions: Some(instructions.to_string()),
        rating: Some(level.unwrap_or(Difficulty::Expert).default_rating()),
    }
}

/// Stable placeholder image keyed by exercise name.
#[must_use]
pub fn image_url(name: &str) -> String {
    format!("https://picsum.photos/seed/{}/400/400", slug(name, '-'))
}

fn slug(name: &str, sep: char) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(&sep.to_string())
}
