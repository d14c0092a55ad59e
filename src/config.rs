use std::path::PathBuf;

use anyhow::{ensure, Context};
use serde::Deserialize;

use crate::database::DEFAULT_TOP_N;

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Points to an optional TOML config file.
pub const CONFIG_ENV_VAR: &str = "TIMEBOARD_CONFIG";

/// Overrides the `database_path` of the config.
pub const DATABASE_ENV_VAR: &str = "TIMEBOARD_DATABASE";

/// Application config.
///
/// Every value has a default, so an empty file is a valid config.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The SQLite database file, which is created if it does not exist.
    ///
    /// Relative paths are relative to the working directory.
    pub database_path: PathBuf,

    /// The heading of the screen.
    pub title: String,

    /// The number of leaderboard entries displayed.
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from("rankings.db"),
            title: "Timer Application".to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Config {
    /// Read the config file listed in the `TIMEBOARD_CONFIG` environment
    /// variable, or use the defaults if it is not set. The database location
    /// can be overridden with `TIMEBOARD_DATABASE`.
    pub fn load() -> anyhow::Result<Config> {
        let mut config = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(f) => {
                let f = PathBuf::from(f);
                let f_str = std::fs::read_to_string(&f)
                    .with_context(|| format!("failed to read config at {}", f.display()))?;
                log::info!("using config at {}", f.display());
                Config::from_toml(&f_str)?
            }
            None => Config::default(),
        };

        if let Some(path) = std::env::var_os(DATABASE_ENV_VAR) {
            config.database_path = PathBuf::from(path);
        }

        check_config(&config)?;
        log::debug!("{:#?}", &config);
        Ok(config)
    }

    pub fn from_toml(s: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(s).context("failed to parse config")?;
        check_config(&config)?;
        Ok(config)
    }
}

/// Try to catch configuration errors early.
fn check_config(config: &Config) -> anyhow::Result<()> {
    ensure!(
        !config.database_path.as_os_str().is_empty(),
        "config: 'database_path' must not be empty"
    );
    ensure!(config.top_n > 0, "config: 'top_n' must be at least 1");
    Ok(())
}
