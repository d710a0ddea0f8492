//! Engine configuration from environment variables.
//!
//! Supported environment variables:
//! - HEARTHSHEET_DB_PATH: SQLite file for saved characters
//! - GEMINI_API_KEY (or API_KEY): enables text generation when set
//! - GEMINI_BASE_URL, GEMINI_MODEL, GEMINI_TIMEOUT_SECS
//! - HEARTHSHEET_AUTOSAVE_MS: autosave debounce window

use std::path::PathBuf;

use crate::infrastructure::gemini::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AUTOSAVE_MS: u64 = 1000;
/// One day
pub const MAX_AUTOSAVE_MS: u64 = 86_400_000;

const FALLBACK_DB_FILE: &str = "hearthsheet_characters.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub db_path: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub gemini_timeout_secs: u64,
    pub autosave_ms: u64,
}

/// A variable was set but could not be used.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{name} must be at most {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: u64,
        max: u64,
    },
}

impl EngineConfig {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let number = |name: &'static str, default: u64| match var(name) {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { name, value }),
            None => Ok(default),
        };

        let autosave_ms = number("HEARTHSHEET_AUTOSAVE_MS", DEFAULT_AUTOSAVE_MS)?;
        if autosave_ms > MAX_AUTOSAVE_MS {
            return Err(ConfigError::OutOfRange {
                name: "HEARTHSHEET_AUTOSAVE_MS",
                value: autosave_ms,
                max: MAX_AUTOSAVE_MS,
            });
        }

        let db_path = var("HEARTHSHEET_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_db_path);

        Ok(Self {
            db_path,
            gemini_api_key: var("GEMINI_API_KEY").or_else(|| var("API_KEY")),
            gemini_base_url: var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_timeout_secs: number("GEMINI_TIMEOUT_SECS", DEFAULT_GEMINI_TIMEOUT_SECS)?,
            autosave_ms,
        })
    }

    pub fn autosave_window(&self) -> chrono::Duration {
        let ms = self.autosave_ms.min(MAX_AUTOSAVE_MS);
        chrono::Duration::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX))
    }
}

/// Platform data directory, or the working directory if there is none
fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "hearthsheet")
        .map(|dirs| dirs.data_dir().join("characters.db"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DB_FILE))
}
