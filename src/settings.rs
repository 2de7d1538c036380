//! Layered run configuration.
//!
//! Values are resolved in increasing priority: built-in defaults, an
//! optional config file, `METEORITE_SORTER_*` environment variables, then
//! command-line flags.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::error::Result;
use crate::utils::constants::{
    DEFAULT_DATABASE_PATH, DEFAULT_SOURCE_URL, DEFAULT_USER_AGENT, ENV_PREFIX,
};

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[validate(url)]
    pub source_url: String,

    pub database_path: PathBuf,

    #[validate(length(min = 1))]
    pub user_agent: String,
}

/// Command-line values that take precedence over every other layer.
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub source_url: Option<String>,
    pub database_path: Option<PathBuf>,
}

impl Settings {
    pub fn load(config_file: Option<&Path>, overrides: &SettingsOverrides) -> Result<Self> {
        Self::load_with_env(config_file, overrides, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(
        config_file: Option<&Path>,
        overrides: &SettingsOverrides,
        environment: Environment,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("source_url", DEFAULT_SOURCE_URL)?
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(environment)
            .set_override_option("source_url", overrides.source_url.clone())?
            .set_override_option(
                "database_path",
                overrides
                    .database_path
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned()),
            )?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
