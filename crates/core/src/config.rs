//! Library configuration
//!
//! Settings come from three layers, later ones winning:
//! 1. Built-in defaults (database under the platform data directory)
//! 2. Environment variables, with a `.env` file loaded through `dotenvy`
//! 3. The setup object a collaborator passes in (camelCase JSON)

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{LibraryError, Result};

/// Environment variable overriding the database path
pub const ENV_DB_PATH: &str = "PROMPT_LIBRARY_DB";
/// Environment variable overriding the "recent" view size
pub const ENV_RECENT_LIMIT: &str = "PROMPT_LIBRARY_RECENT_LIMIT";
/// Environment variable toggling first-run seeding
pub const ENV_SEED: &str = "PROMPT_LIBRARY_SEED";
/// Environment variable overriding the refinement timeout
pub const ENV_REFINE_TIMEOUT_SECS: &str = "PROMPT_LIBRARY_REFINE_TIMEOUT_SECS";

const DEFAULT_RECENT_LIMIT: usize = 50;
const DEFAULT_REFINE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// SQLite database file
    pub db_path:             PathBuf,
    /// Number of prompts shown by the "recent" view
    pub recent_limit:        usize,
    /// Insert the sample categories and prompts when the library is empty
    pub seed_on_first_run:   bool,
    /// Upper bound for one external refinement call
    pub refine_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path:             default_db_path(),
            recent_limit:        DEFAULT_RECENT_LIMIT,
            seed_on_first_run:   true,
            refine_timeout_secs: DEFAULT_REFINE_TIMEOUT_SECS,
        }
    }
}

/// `<data dir>/prompt-library/library.db`, or a relative path when the
/// platform has no data directory
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("prompt-library"))
        .unwrap_or_else(|| PathBuf::from(".prompt-library"))
        .join("library.db")
}

impl Config {
    /// Defaults overlaid with environment variables (and `.env`, if present)
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with the environment, then with a setup object
    ///
    /// Unknown keys are ignored; a `null` setup keeps the environment values.
    pub fn from_setup(setup: Value) -> Result<Self> {
        let base = Self::from_env()?;
        base.merge_setup(setup)
    }

    fn merge_setup(self, setup: Value) -> Result<Self> {
        let overrides = match setup {
            Value::Null => return Ok(self),
            Value::Object(map) => map,
            other => {
                return Err(LibraryError::ConfigError(format!(
                    "setup must be an object, got {}",
                    other
                )))
            },
        };

        let mut merged = serde_json::to_value(&self)?;
        if let Value::Object(target) = &mut merged {
            for (key, value) in overrides {
                if target.contains_key(&key) {
                    target.insert(key, value);
                }
            }
        }

        serde_json::from_value(merged)
            .map_err(|e| LibraryError::ConfigError(format!("invalid setup: {}", e)))
    }

    fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            self.db_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup(ENV_RECENT_LIMIT) {
            self.recent_limit = parse_env(ENV_RECENT_LIMIT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            self.seed_on_first_run = parse_env(ENV_SEED, &raw)?;
        }
        if let Some(raw) = lookup(ENV_REFINE_TIMEOUT_SECS) {
            self.refine_timeout_secs = parse_env(ENV_REFINE_TIMEOUT_SECS, &raw)?;
        }
        Ok(self)
    }

    /// Config rooted at an explicit database file, everything else default
    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: path.into(),
            ..Self::default()
        }
    }

    pub fn refine_timeout(&self) -> Duration {
        Duration::from_secs(self.refine_timeout_secs)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| LibraryError::ConfigError(format!("{} has an invalid value: {:?}", key, raw)))
}
