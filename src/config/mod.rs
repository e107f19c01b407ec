//! Configuration module for facets.
//!
//! Handles the config file, environment variables, and settings.

mod settings;

pub use settings::{
    expand_env_vars, DatabaseSettings, DatasetSettings, Settings, SettingsError, CONFIG_ENV_VAR,
};
