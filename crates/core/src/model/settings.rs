use thiserror::Error;

/// Quiz length when nothing else is configured (20 minutes).
pub const DEFAULT_DURATION_SECS: u32 = 20 * 60;
/// Minimum score, in percent, for a passing attempt.
pub const DEFAULT_PASS_THRESHOLD: u8 = 70;
/// Below this many remaining seconds the timer is shown as urgent.
pub const DEFAULT_URGENT_SECS: u32 = 5 * 60;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("quiz duration must be > 0 seconds")]
    InvalidDuration,

    #[error("pass threshold must be between 0 and 100, got {0}")]
    InvalidPassThreshold(u8),
}

/// Validated quiz configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    duration_secs: u32,
    pass_threshold: u8,
    urgent_secs: u32,
}

/// Optional overrides; unset fields fall back to the defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizSettingsDraft {
    pub duration_secs: Option<u32>,
    pub pass_threshold: Option<u8>,
    pub urgent_secs: Option<u32>,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft into settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError` for a zero duration or a threshold above 100.
    pub fn validate(self) -> Result<QuizSettings, QuizSettingsError> {
        let duration_secs = self.duration_secs.unwrap_or(DEFAULT_DURATION_SECS);
        if duration_secs == 0 {
            return Err(QuizSettingsError::InvalidDuration);
        }
        let pass_threshold = self.pass_threshold.unwrap_or(DEFAULT_PASS_THRESHOLD);
        if pass_threshold > 100 {
            return Err(QuizSettingsError::InvalidPassThreshold(pass_threshold));
        }

        Ok(QuizSettings {
            duration_secs,
            pass_threshold,
            urgent_secs: self.urgent_secs.unwrap_or(DEFAULT_URGENT_SECS),
        })
    }
}

impl QuizSettings {
    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    #[must_use]
    pub fn pass_threshold(&self) -> u8 {
        self.pass_threshold
    }

    #[must_use]
    pub fn urgent_secs(&self) -> u32 {
        self.urgent_secs
    }

    /// Duration in whole minutes, rounded down.
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_secs / 60
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            urgent_secs: DEFAULT_URGENT_SECS,
        }
    }
}
