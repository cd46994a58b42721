//! Run configuration
//!
//! Defaults reproduce the fixed behaviour of a plain run against the 2023
//! World Cup results page. `Config::load` overlays an optional JSON file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;
use crate::layout::{Layout, LayoutConfig};

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV: &str = "BOWLING_SCRAPE_CONFIG";

pub const DEFAULT_INDEX_URL: &str =
    "https://www.espncricinfo.com/records/tournament/team-match-results/icc-cricket-world-cup-2023-24-15338";
pub const DEFAULT_BASE_URL: &str = "https://www.espncricinfo.com";

/// Output artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tournament results listing
    pub index_url: String,
    /// Site origin that relative scorecard links resolve against
    pub base_url: String,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub user_agent: String,
    /// Per-request timeout for the HTTP fetcher
    pub timeout_secs: u64,
    /// Check robots.txt before each page fetch
    pub respect_robots: bool,
    pub layout: LayoutConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            format: OutputFormat::Csv,
            user_agent: concat!("bowling_scrape/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            respect_robots: false,
            layout: LayoutConfig::default(),
        }
    }
}

impl Config {
    /// Load from the file named by `BOWLING_SCRAPE_CONFIG`, or defaults if unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse JSON; missing keys keep their defaults
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = url.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_respect_robots(mut self, respect: bool) -> Self {
        self.respect_robots = respect;
        self
    }

    pub fn index_url(&self) -> Result<Url, ConfigError> {
        parse_url(&self.index_url)
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        parse_url(&self.base_url)
    }

    pub fn compile_layout(&self) -> Result<Layout, ConfigError> {
        Ok(Layout::compile(&self.layout)?)
    }

    /// Check both URLs and every layout pattern
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.index_url()?;
        self.base_url()?;
        self.compile_layout()?;
        Ok(())
    }
}

fn parse_url(url: &str) -> Result<Url, ConfigError> {
    Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
