//! Sample Configuration
//!
//! Settings of the sample app, read from the JSON file named by
//! [`CONFIG_ENV`]. Missing fields fall back to their defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Environment variable holding the path of the configuration file.
pub const CONFIG_ENV: &str = "RODE_SAMPLE_CONFIG";
/// Environment variable holding the log filter.
pub const LOG_LEVEL_ENV: &str = "RODE_LOG_LEVEL";
/// Environment variable holding the log style.
pub const LOG_STYLE_ENV: &str = "RODE_LOG_STYLE";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Window title.
    pub title: String,
    /// Text the presenter sends to every new screen.
    pub greeting: String,
    pub first_error_text: String,
    pub second_error_text: String,
    pub pixels_per_point: f32,
    /// Period of the presenter's status updates, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            title: "Rode sample".to_string(),
            greeting: "Hello World from the presenter".to_string(),
            first_error_text: "Random error".to_string(),
            second_error_text: "Specific error".to_string(),
            pixels_per_point: 1.5,
            tick_interval_ms: 1000,
        }
    }
}

impl SampleConfig {
    /// Loads the configuration from the JSON file at `path`.
    pub async fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .await
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = tokio::task::spawn_blocking(move || serde_json::from_str::<Self>(&json))
            .await??;
        Ok(config)
    }

    /// Loads the file named by [`CONFIG_ENV`], or the defaults if it is unset.
    pub async fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                info!("loading config from {}", path.display());
                Self::load(&path).await
            }
            None => Ok(Self::default()),
        }
    }
}
