use chrono::{
    DateTime, Local, Locale,
    format::{Item, StrftimeItems}
};
use hyclock_proto::config::ClockModuleConfig;
use masterror::Error;

/// Errors raised while building a [`ClockFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockFormatError {
    #[error("unknown locale '{name}'")]
    UnknownLocale { name: String },
    #[error("invalid {field} '{format}'")]
    InvalidFormat {
        field:  &'static str,
        format: String
    }
}

/// Locale plus the two strftime patterns the clock renders with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFormat {
    locale:      Locale,
    time_format: String,
    date_format: String
}

impl ClockFormat {
    /// Builds a format, checking the locale name and both patterns up front so
    /// rendering can never fail later.
    ///
    /// # Errors
    ///
    /// Returns [`ClockFormatError::UnknownLocale`] for locale names chrono does
    /// not ship, and [`ClockFormatError::InvalidFormat`] for malformed patterns.
    pub fn new(
        locale: &str,
        time_format: impl Into<String>,
        date_format: impl Into<String>
    ) -> Result<Self, ClockFormatError> {
        let locale = Locale::try_from(locale).map_err(|_| ClockFormatError::UnknownLocale {
            name: locale.to_owned()
        })?;
        let time_format = checked("time_format", time_format.into())?;
        let date_format = checked("date_format", date_format.into())?;

        Ok(Self {
            locale,
            time_format,
            date_format
        })
    }

    pub fn from_config(config: &ClockModuleConfig) -> Result<Self, ClockFormatError> {
        Self::new(&config.locale, &*config.time_format, &*config.date_format)
    }

    pub fn time(&self, at: &DateTime<Local>) -> String {
        at.format_localized(&self.time_format, self.locale).to_string()
    }

    /// Date as the locale spells it, without display capitalisation.
    pub fn date(&self, at: &DateTime<Local>) -> String {
        at.format_localized(&self.date_format, self.locale).to_string()
    }
}

impl Default for ClockFormat {
    fn default() -> Self {
        Self {
            locale:      Locale::ru_RU,
            time_format: "%H:%M:%S".to_owned(),
            date_format: "%A, %d %B %Y".to_owned()
        }
    }
}

fn checked(field: &'static str, format: String) -> Result<String, ClockFormatError> {
    if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
        return Err(ClockFormatError::InvalidFormat {
            field,
            format
        });
    }

    Ok(format)
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new()
    }
}
