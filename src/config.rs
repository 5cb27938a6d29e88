use crate::error::{ChapterizeError, Result};
use crate::generate::gemini::DEFAULT_MODEL;
use crate::transcript::format::DEFAULT_MARKER_INTERVAL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub model: String,
    pub marker_interval_seconds: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            marker_interval_seconds: DEFAULT_MARKER_INTERVAL,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Load from config file if it exists
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                if let Ok(file_config) = toml::from_str::<Config>(&contents) {
                    config = file_config;
                }
            }
        }

        // Override with environment variables
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            config.gemini_api_key = Some(key);
        }
        if let Ok(model) = std::env::var("GEMINI_MODEL_NAME") {
            config.model = model;
        }
        if let Ok(interval) = std::env::var("CHAPTERIZE_MARKER_INTERVAL") {
            if let Ok(i) = interval.parse() {
                config.marker_interval_seconds = i;
            }
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.gemini_api_key.is_none() {
            return Err(ChapterizeError::Config(
                "GEMINI_API_KEY not set. Get one at https://aistudio.google.com/apikey".to_string(),
            ));
        }

        if self.marker_interval_seconds <= 0.0 {
            return Err(ChapterizeError::Config(
                "Marker interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("chapterize").join("config.toml"))
    }
}
