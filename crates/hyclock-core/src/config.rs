use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use hyclock_proto::config::*;

use log::{info, warn};
use masterror::{AppError, Error};
use shellexpand::full;

/// Failures that stop configuration from being located at all.
///
/// Parse and validation problems are not in here: those fall back to the
/// defaults with a warning.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to expand config path '{path}': {reason}")]
    Expand { path: String, reason: String },
    #[error("config file does not exist: {path:?}")]
    NotFound { path: PathBuf },
    #[error("failed to create config directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<ConfigLoadError> for AppError {
    fn from(err: ConfigLoadError) -> Self {
        AppError::internal(err.to_string())
    }
}

#[derive(Debug, Error)]
enum ReadError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Decode(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(#[from] ConfigValidationError),
}

/// Resolves the config path and loads it.
///
/// An explicit path must exist. The default path may be missing, in which case
/// its parent directory is created and the defaults are used.
pub fn get_config(path: Option<PathBuf>) -> Result<(Config, PathBuf), ConfigLoadError> {
    match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(&path)?;

            if !expanded.exists() {
                return Err(ConfigLoadError::NotFound { path: expanded });
            }

            Ok((load_or_default(&expanded), expanded))
        }
        None => {
            let expanded = expand_path(Path::new(DEFAULT_CONFIG_FILE_PATH))?;

            if let Some(parent) = expanded.parent()
                && !parent.exists()
            {
                fs::create_dir_all(parent).map_err(|source| ConfigLoadError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            Ok((load_or_default(&expanded), expanded))
        }
    }
}

fn expand_path(path: &Path) -> Result<PathBuf, ConfigLoadError> {
    let str_path = path.to_string_lossy();
    let expanded = full(&str_path).map_err(|e| ConfigLoadError::Expand {
        path: str_path.to_string(),
        reason: e.to_string(),
    })?;

    Ok(PathBuf::from(expanded.into_owned()))
}

fn load_or_default(path: &Path) -> Config {
    match read_config(path) {
        Ok(config) => config,
        Err(ReadError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            info!("No config file at {path:?}, using defaults");
            Config::default()
        }
        Err(e) => {
            warn!("Failed to load config file {path:?}: {e}, using defaults");
            Config::default()
        }
    }
}

fn read_config(path: &Path) -> Result<Config, ReadError> {
    let content = fs::read_to_string(path)?;
    info!("Decoding config file {path:?}");

    let config: Config = toml::from_str(&content)?;
    config.validate()?;

    info!("Config file loaded successfully");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, tempdir};

    use super::*;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn explicit_path_is_loaded() {
        let file = write_config(
            r#"
            log_level = "info"

            [clock]
            locale = "en_US"
            "#,
        );

        let (config, path) = get_config(Some(file.path().to_path_buf())).expect("config");

        assert_eq!(path, file.path());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.clock.locale, "en_US");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let missing = dir.path().join("absent.toml");

        let err = get_config(Some(missing.clone())).unwrap_err();

        assert!(matches!(err, ConfigLoadError::NotFound { path } if path == missing));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let file = write_config("log_level = [");

        let (config, _) = get_config(Some(file.path().to_path_buf())).expect("config");

        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_values_fall_back_to_defaults() {
        let file = write_config(
            r#"
            [appearance]
            time_size = 0.0
            "#,
        );

        let (config, _) = get_config(Some(file.path().to_path_buf())).expect("config");

        assert_eq!(config, Config::default());
    }

    #[test]
    fn absent_file_reads_as_defaults() {
        let dir = tempdir().expect("temp dir");

        assert_eq!(load_or_default(&dir.path().join("config.toml")), Config::default());
    }
}
