//! Settings file (`~/.config/aurora-dbm/settings.toml`) and flag resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use aurora_dbm_db::{DEFAULT_ERROR_LOG, ErrorLog, StoreOptions};
use serde::{Deserialize, Serialize};

use crate::CliError;

const DEFAULT_CONTENT_DB: &str = "content.db";
const DEFAULT_SETTINGS_DB: &str = "settings.db";

/// TOML config file format.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct ConfigFile {
    pub databases: DatabasesConfig,
    pub store: StoreConfig,
    pub log: LogConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct DatabasesConfig {
    pub content: Option<PathBuf>,
    pub settings: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct StoreConfig {
    pub close_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct LogConfig {
    pub error_log: Option<PathBuf>,
    /// Set to false to stop writing the error log.
    pub enabled: Option<bool>,
}

/// Where a resolved setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    Flag,
    ConfigFile,
    Default,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flag => write!(f, "command line"),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Command-line values that override the config file.
#[derive(Debug, Default, Clone)]
pub(crate) struct Overrides {
    pub content: Option<PathBuf>,
    pub settings: Option<PathBuf>,
    pub error_log: Option<PathBuf>,
}

/// Effective settings for one run.
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    pub content: PathBuf,
    pub content_source: Source,
    pub settings: PathBuf,
    pub settings_source: Source,
    pub error_log: ErrorLog,
    pub options: StoreOptions,
}

/// Return the path to the settings file.
pub(crate) fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aurora-dbm").join("settings.toml"))
}

/// Load the settings file. A missing file yields the defaults.
pub(crate) fn load_config_file() -> Result<ConfigFile, CliError> {
    match config_path() {
        Some(path) if path.exists() => load_from(&path),
        _ => Ok(ConfigFile::default()),
    }
}

fn load_from(path: &Path) -> Result<ConfigFile, CliError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
        .map_err(|e| CliError::config(format!("Failed to parse {}: {}", path.display(), e)))
}

pub(crate) fn parse_config(text: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(text)
}

fn pick(flag: Option<PathBuf>, file: Option<PathBuf>, default: &str) -> (PathBuf, Source) {
    match (flag, file) {
        (Some(path), _) => (path, Source::Flag),
        (None, Some(path)) => (path, Source::ConfigFile),
        (None, None) => (PathBuf::from(default), Source::Default),
    }
}

/// Combine flags, the config file and built-in defaults. Flags win.
pub(crate) fn resolve(config: &ConfigFile, overrides: Overrides) -> Resolved {
    let (content, content_source) = pick(
        overrides.content,
        config.databases.content.clone(),
        DEFAULT_CONTENT_DB,
    );
    let (settings, settings_source) = pick(
        overrides.settings,
        config.databases.settings.clone(),
        DEFAULT_SETTINGS_DB,
    );

    let error_log = match (overrides.error_log, config.log.enabled) {
        (Some(path), _) => ErrorLog::new(path),
        (None, Some(false)) => ErrorLog::disabled(),
        (None, _) => ErrorLog::new(
            config
                .log
                .error_log
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ERROR_LOG)),
        ),
    };

    let mut options = StoreOptions::default();
    if let Some(ms) = config.store.close_timeout_ms {
        options.close_timeout = Duration::from_millis(ms);
    }

    Resolved {
        content,
        content_source,
        settings,
        settings_source,
        error_log,
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, ConfigFile::default());

        let resolved = resolve(&config, Overrides::default());
        assert_eq!(resolved.content, PathBuf::from("content.db"));
        assert_eq!(resolved.content_source, Source::Default);
        assert_eq!(resolved.error_log.path(), Some(Path::new("error.log")));
        assert_eq!(resolved.options, StoreOptions::default());
    }

    #[test]
    fn file_values_are_used() {
        let config = parse_config(
            r#"
            [databases]
            content = "/mnt/xbox/Aurora/Data/DataBases/content.db"

            [store]
            close_timeout_ms = 250

            [log]
            enabled = false
            "#,
        )
        .unwrap();

        let resolved = resolve(&config, Overrides::default());
        assert_eq!(
            resolved.content,
            PathBuf::from("/mnt/xbox/Aurora/Data/DataBases/content.db")
        );
        assert_eq!(resolved.content_source, Source::ConfigFile);
        assert_eq!(resolved.settings_source, Source::Default);
        assert_eq!(resolved.options.close_timeout, Duration::from_millis(250));
        assert!(resolved.error_log.path().is_none());
    }

    #[test]
    fn flags_override_file() {
        let config = parse_config(
            r#"
            [databases]
            settings = "from-file.db"
            [log]
            enabled = false
            "#,
        )
        .unwrap();

        let resolved = resolve(
            &config,
            Overrides {
                settings: Some(PathBuf::from("from-flag.db")),
                error_log: Some(PathBuf::from("errors.txt")),
                ..Overrides::default()
            },
        );
        assert_eq!(resolved.settings, PathBuf::from("from-flag.db"));
        assert_eq!(resolved.settings_source, Source::Flag);
        assert_eq!(resolved.error_log.path(), Some(Path::new("errors.txt")));
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(parse_config("[store]\nclose_timeout_ms = \"soon\"").is_err());
    }
}
