use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::error::NgoError;

pub const DB_FILE: &str = "ngoboard.db";
/// Storage key the whole project set is written under.
pub const STORAGE_KEY: &str = "projectHive_data";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_AI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_AI_MODEL.to_string(),
            base_url: DEFAULT_AI_URL.to_string(),
        }
    }
}

/// Settings resolved once per invocation from flags and environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub today: Option<NaiveDate>,
    pub ai: AiConfig,
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>, today: Option<NaiveDate>, ai: AiConfig) -> Result<Self, NgoError> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self {
            data_dir,
            storage_key: STORAGE_KEY.to_string(),
            today,
            ai,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    /// The pinned calendar day, or the local one.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn default_data_dir() -> Result<PathBuf, NgoError> {
    dirs::data_local_dir()
        .map(|d| d.join("ngoboard"))
        .ok_or_else(|| NgoError::storage("Cannot determine a data directory. Pass --data-dir or set NGOBOARD_HOME."))
}
