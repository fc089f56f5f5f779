use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

use crate::submission::FormVariant;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Evaluation endpoint receiving the multipart submission
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Which form the view behaves like
    #[serde(default)]
    pub variant: FormVariant,

    /// Request timeout in seconds, no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Where downloaded review PDFs are written
    #[serde(default)]
    pub review_dir: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

pub fn default_endpoint() -> String {
    "http://localhost:5000/evaluate".to_string()
}

impl Config {
    /// Load the configuration at `path`, writing a default one first if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok(config);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json).with_context(|| {
            format!("Failed to write default config to file: {}", path.display())
        })?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;

        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be greater than zero when set"));
        }

        Ok(())
    }

    /// Parsed endpoint; only http and https are accepted
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid endpoint URL: {}", self.endpoint))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(anyhow!("Unsupported endpoint scheme '{}': {}", scheme, self.endpoint)),
        }
    }

    /// Directory for review downloads: configured value, then the user's download dir, then cwd
    pub fn review_dir(&self) -> PathBuf {
        self.review_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: default_endpoint(),
            variant: FormVariant::default(),
            timeout_secs: None,
            review_dir: None,
            log_level: LogLevel::default(),
        }
    }
}
