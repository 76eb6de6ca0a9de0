//! Core configuration.
//!
//! Settings resolve in order: built-in defaults, then the optional TOML file
//! (`~/.tripbook/config.toml` unless a path is given), then caller overrides.
//! Every file field is optional so a partial file is valid.

use crate::logging::default_log_level;
use crate::model::id::IdStrategy;
use crate::service::trip_store::DEFAULT_STORAGE_KEY;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = ".tripbook";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "tripbook.db";
const LOG_DIR_NAME: &str = "logs";

/// Sparse on-disk configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSection {
    pub db_path: Option<PathBuf>,
    pub key: Option<String>,
    pub id_strategy: Option<IdStrategy>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub dir: Option<PathBuf>,
}

/// Fully resolved settings with no gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub id_strategy: IdStrategy,
    pub log_level: String,
    pub log_dir: PathBuf,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config I/O error: {err}"),
            Self::Parse(err) => write!(f, "config parse error: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

/// `~/.tripbook`, or a `tripbook` directory under the temp dir when the
/// home directory is unknown.
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DATA_DIR_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join("tripbook"))
}

pub fn default_config_path() -> PathBuf {
    data_dir().join(CONFIG_FILE_NAME)
}

/// Reads a config file. A missing file yields the empty configuration.
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        debug!(
            "event=config_load module=config status=absent path={}",
            path.display()
        );
        return Ok(ConfigFile::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let file: ConfigFile = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!(
        "event=config_load module=config status=ok path={}",
        path.display()
    );
    Ok(file)
}

impl CoreConfig {
    /// Fills every gap in `file` from the defaults rooted at `base_dir`.
    pub fn resolve_in(file: ConfigFile, base_dir: &Path) -> Self {
        Self {
            db_path: file
                .storage
                .db_path
                .unwrap_or_else(|| base_dir.join(DB_FILE_NAME)),
            storage_key: file
                .storage
                .key
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            id_strategy: file.storage.id_strategy.unwrap_or_default(),
            log_level: file
                .logging
                .level
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir: file
                .logging
                .dir
                .unwrap_or_else(|| base_dir.join(LOG_DIR_NAME)),
        }
    }

    /// [`CoreConfig::resolve_in`] rooted at [`data_dir`].
    pub fn resolve(file: ConfigFile) -> Self {
        Self::resolve_in(file, &data_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::{load_config_file, ConfigError, ConfigFile, CoreConfig};
    use crate::model::id::IdStrategy;
    use std::path::Path;

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_config_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let contents = "[storage]\nkey = \"custom.trips\"\nid_strategy = \"uuid\"\n";
        std::fs::write(&path, contents).unwrap();

        let file = load_config_file(&path).unwrap();
        let config = CoreConfig::resolve_in(file, Path::new("/base"));
        assert_eq!(config.storage_key, "custom.trips");
        assert_eq!(config.id_strategy, IdStrategy::Uuid);
        assert_eq!(config.db_path, Path::new("/base/tripbook.db"));
        assert_eq!(config.log_dir, Path::new("/base/logs"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage\nkey = 1").unwrap();
        assert!(matches!(load_config_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn defaults_use_standard_key_and_short_ids() {
        let config = CoreConfig::resolve_in(ConfigFile::default(), Path::new("/base"));
        assert_eq!(config.storage_key, "tripbook.trips");
        assert_eq!(config.id_strategy, IdStrategy::Short);
    }
}
