use masterror::Error;

use super::Config;

/// Errors returned when validating a [`Config`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    /// A format string is empty and would render nothing.
    #[error("clock {field} must not be empty")]
    EmptyFormat { field: &'static str },

    /// A size or margin is zero, negative or not a number.
    #[error("appearance {field} must be a positive number, got {value}")]
    InvalidDimension { field: &'static str, value: f32 },

    /// The locale field is blank.
    #[error("clock locale must not be empty")]
    EmptyLocale
}

impl Config {
    /// Validates the configuration, ensuring formats and dimensions are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] for empty format strings, a blank
    /// locale, or non-positive appearance dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyclock_proto::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.clock.locale.trim().is_empty() {
            return Err(ConfigValidationError::EmptyLocale);
        }

        for (field, value) in [
            ("time_format", &self.clock.time_format),
            ("date_format", &self.clock.date_format)
        ] {
            if value.is_empty() {
                return Err(ConfigValidationError::EmptyFormat { field });
            }
        }

        for (field, value) in [
            ("trailing_margin", self.appearance.trailing_margin),
            ("date_size", self.appearance.date_size),
            ("time_size", self.appearance.time_size)
        ] {
            if value.is_nan() || value <= 0. {
                return Err(ConfigValidationError::InvalidDimension { field, value });
            }
        }

        Ok(())
    }
}
