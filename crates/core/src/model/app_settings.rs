use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn from_dark_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// User preferences persisted between launches.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "AppSettingsDraft", into = "AppSettingsDraft")]
pub struct AppSettings {
    dark_mode: bool,
    exercise_api_key: Option<String>,
    exercise_api_base_url: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppSettingsDraft {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub exercise_api_key: Option<String>,
    #[serde(default)]
    pub exercise_api_base_url: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppSettingsError {
    #[error("invalid exercise API base URL")]
    InvalidBaseUrl,
}

impl AppSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft into persisted settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the base URL is present but invalid.
    pub fn validate(self) -> Result<AppSettings, AppSettingsError> {
        let exercise_api_key = normalize_optional(self.exercise_api_key);
        let exercise_api_base_url = normalize_optional(self.exercise_api_base_url);

        if let Some(url) = exercise_api_base_url.as_ref() {
            let parsed = Url::parse(url).map_err(|_| AppSettingsError::InvalidBaseUrl)?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppSettingsError::InvalidBaseUrl);
            }
        }

        Ok(AppSettings {
            dark_mode: self.dark_mode,
            exercise_api_key,
            exercise_api_base_url,
        })
    }
}

impl AppSettings {
    #[must_use]
    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::from_dark_mode(self.dark_mode)
    }

    #[must_use]
    pub fn exercise_api_key(&self) -> Option<&str> {
        self.exercise_api_key.as_deref()
    }

    #[must_use]
    pub fn exercise_api_base_url(&self) -> Option<&str> {
        self.exercise_api_base_url.as_deref()
    }

    #[must_use]
    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    #[must_use]
    pub fn to_draft(&self) -> AppSettingsDraft {
        AppSettingsDraft::from(self.clone())
    }
}

impl TryFrom<AppSettingsDraft> for AppSettings {
    type Error = AppSettingsError;

    fn try_from(draft: AppSettingsDraft) -> Result<Self, Self::Error> {
        draft.validate()
    }
}

impl From<AppSettings> for AppSettingsDraft {
    fn from(settings: AppSettings) -> Self {
        Self {
            dark_mode: settings.dark_mode,
            exercise_api_key: settings.exercise_api_key,
            exercise_api_base_url: settings.exercise_api_base_url,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
