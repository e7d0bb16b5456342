use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::ExerciseId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise id cannot be empty")]
    EmptyId,

    #[error("exercise name cannot be empty")]
    EmptyName,

    #[error("rating must be within 0..=5, got {0}")]
    InvalidRating(f32),
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    /// Parses a difficulty label case-insensitively. Unknown labels yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }

    /// Catalog rating assigned to exercises of this difficulty.
    #[must_use]
    pub fn default_rating(self) -> f32 {
        match self {
            Self::Beginner => 4.2,
            Self::Intermediate => 4.5,
            Self::Expert => 4.8,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── EXERCISE ──────────────────────────────────────────────────────────────────
//

/// Unvalidated exercise payload, as received from a catalog source or storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDraft {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub body_part: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl ExerciseDraft {
    /// Validate and normalize the draft.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError` if the id or name is blank or the rating is out of range.
    pub fn validate(self) -> Result<Exercise, ExerciseError> {
        let id = ExerciseId::new(self.id).map_err(|_| ExerciseError::EmptyId)?;
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ExerciseError::EmptyName);
        }
        if let Some(rating) = self.rating {
            if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
                return Err(ExerciseError::InvalidRating(rating));
            }
        }

        Ok(Exercise {
            id,
            name,
            image_url: self.image_url.trim().to_string(),
            target: self.target.trim().to_string(),
            body_part: self.body_part.trim().to_string(),
            equipment: self.equipment.trim().to_string(),
            difficulty: self.difficulty.as_deref().and_then(Difficulty::parse),
            description: normalize_optional(self.description),
            instructions: normalize_optional(self.instructions),
            rating: self.rating,
        })
    }
}

/// A validated exercise record from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExerciseDraft", into = "ExerciseDraft")]
pub struct Exercise {
    id: ExerciseId,
    name: String,
    image_url: String,
    target: String,
    body_part: String,
    equipment: String,
    difficulty: Option<Difficulty>,
    description: Option<String>,
    instructions: Option<String>,
    rating: Option<f32>,
}

impl Exercise {
    #[must_use]
    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Target muscle.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn body_part(&self) -> &str {
        &self.body_part
    }

    #[must_use]
    pub fn equipment(&self) -> &str {
        &self.equipment
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    #[must_use]
    pub fn rating(&self) -> Option<f32> {
        self.rating
    }
}

impl TryFrom<ExerciseDraft> for Exercise {
    type Error = ExerciseError;

    fn try_from(draft: ExerciseDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<Exercise> for ExerciseDraft {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: exercise.id.into(),
            name: exercise.name,
            image_url: exercise.image_url,
            target: exercise.target,
            body_part: exercise.body_part,
            equipment: exercise.equipment,
            difficulty: exercise.difficulty.map(|d| d.as_str().to_string()),
            description: exercise.description,
            instructions: exercise.instructions,
            rating: exercise.rating,
        }
    }
}

//
// ─── FILTER ────────────────────────────────────────────────────────────────────
//

/// Search/category filter applied to an exercise list.
///
/// `query` matches a case-insensitive substring of the name or target muscle;
/// `target` must equal the target muscle ignoring case. Both must hold when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub query: Option<String>,
    pub target: Option<String>,
}

impl ExerciseFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = normalize_optional(Some(query.into()));
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = normalize_optional(Some(target.into()));
        self
    }

    #[must_use]
    pub fn matches(&self, exercise: &Exercise) -> bool {
        if let Some(query) = self.query.as_deref() {
            let query = query.to_lowercase();
            let hit = exercise.name.to_lowercase().contains(&query)
                || exercise.target.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        if let Some(target) = self.target.as_deref() {
            if !exercise.target.eq_ignore_ascii_case(target) {
                return false;
            }
        }
        true
    }

    #[must_use]
    pub fn apply<'a>(&self, exercises: &'a [Exercise]) -> Vec<&'a Exercise> {
        exercises.iter().filter(|ex| self.matches(ex)).collect()
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
