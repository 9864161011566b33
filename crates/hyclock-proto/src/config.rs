mod appearance;
mod validation;

use serde::Deserialize;

pub use appearance::Appearance;
pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/hyclock/config.toml";

/// Locale and format strings used by the clock module.
///
/// Format strings use the `strftime` syntax understood by `chrono`.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClockModuleConfig {
    #[serde(default = "default_locale")]
    pub locale:      String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    #[serde(default = "default_date_format")]
    pub date_format: String
}

impl Default for ClockModuleConfig {
    fn default() -> Self {
        Self {
            locale:      default_locale(),
            time_format: default_time_format(),
            date_format: default_date_format()
        }
    }
}

fn default_locale() -> String {
    "ru_RU".to_owned()
}

fn default_time_format() -> String {
    "%H:%M:%S".to_owned()
}

fn default_date_format() -> String {
    "%A, %d %B %Y".to_owned()
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level:  String,
    #[serde(default)]
    pub clock:      ClockModuleConfig,
    #[serde(default)]
    pub appearance: Appearance
}

fn default_log_level() -> String {
    "warn".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level:  default_log_level(),
            clock:      ClockModuleConfig::default(),
            appearance: Appearance::default()
        }
    }
}
