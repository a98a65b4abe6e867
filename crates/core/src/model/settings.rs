use std::time::Duration;

use thiserror::Error;

use crate::model::filter::Limit;

/// Upper bound for a single transition half, in milliseconds.
pub const MAX_TRANSITION_MS: u64 = 5_000;

/// Engine-facing configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    transition_ms: u64,
    default_limit: Limit,
    limit_options: Vec<Limit>,
}

#[derive(Clone, Debug, Default)]
pub struct QuizSettingsDraft {
    pub transition_ms: Option<u64>,
    pub default_limit: Option<Limit>,
    pub limit_options: Option<Vec<Limit>>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("transition duration must be between 1 and {MAX_TRANSITION_MS} ms, got {0}")]
    InvalidTransition(u64),
    #[error("limit options must not be empty")]
    NoLimitOptions,
    #[error("limit options must not contain a zero count")]
    ZeroLimitOption,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft, filling unset fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` for an out-of-range transition duration or an
    /// unusable set of limit options.
    pub fn validate(self) -> Result<QuizSettings, SettingsError> {
        let defaults = QuizSettings::default();

        let transition_ms = self.transition_ms.unwrap_or(defaults.transition_ms);
        if !(1..=MAX_TRANSITION_MS).contains(&transition_ms) {
            return Err(SettingsError::InvalidTransition(transition_ms));
        }

        let limit_options = self.limit_options.unwrap_or(defaults.limit_options);
        if limit_options.is_empty() {
            return Err(SettingsError::NoLimitOptions);
        }
        if limit_options.contains(&Limit::Count(0)) {
            return Err(SettingsError::ZeroLimitOption);
        }

        Ok(QuizSettings {
            transition_ms,
            default_limit: self.default_limit.unwrap_or(defaults.default_limit),
            limit_options,
        })
    }
}

impl QuizSettings {
    /// Duration of one half of a flip or slide.
    #[must_use]
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    #[must_use]
    pub fn transition_ms(&self) -> u64 {
        self.transition_ms
    }

    #[must_use]
    pub fn default_limit(&self) -> Limit {
        self.default_limit
    }

    /// Count choices offered on the setup screen.
    #[must_use]
    pub fn limit_options(&self) -> &[Limit] {
        &self.limit_options
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            transition_ms: 220,
            default_limit: Limit::Count(10),
            limit_options: vec![
                Limit::Count(10),
                Limit::Count(20),
                Limit::Count(30),
                Limit::All,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_yields_defaults() {
        let settings = QuizSettingsDraft::new().validate().unwrap();
        assert_eq!(settings, QuizSettings::default());
        assert_eq!(settings.transition(), Duration::from_millis(220));
        assert_eq!(settings.limit_options().len(), 4);
    }

    #[test]
    fn transition_bounds_are_checked() {
        let draft = QuizSettingsDraft {
            transition_ms: Some(0),
            ..QuizSettingsDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err(), SettingsError::InvalidTransition(0));
    }

    #[test]
    fn zero_count_option_is_rejected() {
        let draft = QuizSettingsDraft {
            limit_options: Some(vec![Limit::Count(0), Limit::All]),
            ..QuizSettingsDraft::default()
        };
        assert_eq!(draft.validate().unwrap_err(), SettingsError::ZeroLimitOption);
    }
}
