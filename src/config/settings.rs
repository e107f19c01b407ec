//! TOML-based configuration for facets.
//!
//! Supports a config file (facets.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [dataset]
//! min_year = 1970
//! max_year = 2017
//!
//! [database]
//! path = "${FACETS_DB}"
//! dialect = "sqlite"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::filter::YearBounds;
use crate::sql::Dialect;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FACETS_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Dataset-wide defaults applied to filters.
    pub dataset: DatasetSettings,

    /// Where events are read from.
    pub database: DatabaseSettings,
}

/// Dataset configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetSettings {
    /// Year used when a filter has no `minYear`.
    pub min_year: i64,

    /// Year used when a filter has no `maxYear`.
    pub max_year: i64,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        let bounds = YearBounds::default();
        Self {
            min_year: bounds.min,
            max_year: bounds.max,
        }
    }
}

impl DatasetSettings {
    pub fn year_bounds(&self) -> YearBounds {
        YearBounds::new(self.min_year, self.max_year)
    }
}

/// Database configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSettings {
    /// SQLite database file (supports ${ENV_VAR} expansion).
    pub path: Option<String>,

    /// Default dialect for `facets sql`. Execution always uses SQLite
    /// placeholders, since the bundled data source is SQLite.
    pub dialect: Dialect,
}

impl DatabaseSettings {
    /// Get the database path with environment variables expanded.
    pub fn resolved_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        self.path
            .as_deref()
            .map(|p| expand_env_vars(p).map(PathBuf::from))
            .transpose()
    }
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `FACETS_CONFIG`
    /// 2. `./facets.toml`
    /// 3. `~/.config/facets/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        // Check environment variable first
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        // Check local directory
        let local_config = PathBuf::from("facets.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        // Check user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("facets").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    /// Reject settings no query could sensibly use.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let DatasetSettings { min_year, max_year } = self.dataset;
        if min_year > max_year {
            return Err(SettingsError::InvalidConfig(format!(
                "dataset.min_year ({}) is greater than dataset.max_year ({})",
                min_year, max_year
            )));
        }
        Ok(())
    }

    pub fn year_bounds(&self) -> YearBounds {
        self.dataset.year_bounds()
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A `$` not followed by a name is
/// kept as is.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.next_if_eq(&'{').is_some() {
            chars.by_ref().take_while(|&ch| ch != '}').collect()
        } else {
            let mut name = String::new();
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                name.push(ch);
            }
            if name.is_empty() {
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
