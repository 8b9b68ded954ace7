use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the session video site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Conference year used to build session page URLs
    #[serde(default = "default_year")]
    pub year: u16,

    /// Video quality to download
    #[serde(default)]
    pub quality: VideoQuality,

    /// Subtitle language code (ISO)
    #[serde(default = "default_language")]
    pub language: String,

    /// Output directory; defaults to the user's download directory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Download settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Video quality variant offered by the session page
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    // @quality: Standard definition
    Sd,
    // @quality: High definition
    #[default]
    Hd,
}

impl VideoQuality {
    // @returns: Lowercase quality tag as it appears in asset URLs
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Sd => "sd",
            Self::Hd => "hd",
        }
    }
}

// Implement Display trait for VideoQuality
impl std::fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// Implement FromStr trait for VideoQuality
impl std::str::FromStr for VideoQuality {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sd" => Ok(Self::Sd),
            "hd" => Ok(Self::Hd),
            _ => Err(anyhow!("Invalid video quality: {}", s)),
        }
    }
}

/// Download client configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DownloadConfig {
    /// Request timeout in seconds for text fetches
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// User agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Log level configuration
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

fn default_base_url() -> String {
    "https://developer.apple.com/videos/play".to_string()
}

fn default_year() -> u16 {
    2020
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("wwdcdl/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Build the canonical session page URL for a session identifier
    pub fn session_url(&self, session_id: &str) -> String {
        format!(
            "{}/wwdc{}/{}",
            self.base_url.trim_end_matches('/'),
            self.year,
            session_id
        )
    }

    /// Validate the configuration after loading and CLI overrides
    pub fn validate(&self) -> Result<()> {
        // Base URL must be an absolute URL
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| anyhow!("Invalid base URL '{}': {}", self.base_url, e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "Base URL must use http or https, got '{}'",
                parsed.scheme()
            ));
        }

        // Validate subtitle language
        let _language_name = crate::language_utils::get_language_name(&self.language)?;

        if self.download.timeout_secs == 0 {
            return Err(anyhow!("Download timeout must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            year: default_year(),
            quality: VideoQuality::default(),
            language: default_language(),
            output_dir: None,
            download: DownloadConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
