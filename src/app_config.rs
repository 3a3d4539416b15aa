use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Analysis thresholds
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Report output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Thresholds used by the text analyzers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalysisConfig {
    // @field: Entries kept in the frequency ranking
    #[serde(default = "default_frequency_top_n")]
    pub frequency_top_n: usize,

    // @field: Entries kept per collocation section
    #[serde(default = "default_collocation_top_n")]
    pub collocation_top_n: usize,

    // @field: Words must be longer than this to be ranked
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    // @field: Words longer than this count as complex
    #[serde(default = "default_complex_word_length")]
    pub complex_word_length: usize,

    // @field: Complex-word ratio above which text is Advanced
    #[serde(default = "default_advanced_ratio")]
    pub advanced_ratio: f64,

    // @field: Complex-word ratio above which text is Intermediate
    #[serde(default = "default_intermediate_ratio")]
    pub intermediate_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frequency_top_n: default_frequency_top_n(),
            collocation_top_n: default_collocation_top_n(),
            min_word_length: default_min_word_length(),
            complex_word_length: default_complex_word_length(),
            advanced_ratio: default_advanced_ratio(),
            intermediate_ratio: default_intermediate_ratio(),
        }
    }
}

/// Report output format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(anyhow!("Invalid output format: {}", s)),
        }
    }
}

/// Output configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct OutputConfig {
    /// Format used when printing reports
    #[serde(default)]
    pub format: OutputFormat,
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
    /// Equivalent filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_frequency_top_n() -> usize {
    20
}

fn default_collocation_top_n() -> usize {
    10
}

fn default_min_word_length() -> usize {
    3
}

fn default_complex_word_length() -> usize {
    6
}

fn default_advanced_ratio() -> f64 {
    0.30
}

fn default_intermediate_ratio() -> f64 {
    0.15
}

impl Config {
    /// Load a configuration file, writing the defaults first if it doesn't exist
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

        log::warn!("Config file not found at '{}', creating default config.", path.display());

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()
    }
}

impl AnalysisConfig {
    /// Validate analyzer thresholds
    pub fn validate(&self) -> Result<()> {
        if self.frequency_top_n == 0 {
            return Err(anyhow!("frequency_top_n must be greater than zero"));
        }
        if self.collocation_top_n == 0 {
            return Err(anyhow!("collocation_top_n must be greater than zero"));
        }

        for (name, ratio) in [
            ("advanced_ratio", self.advanced_ratio),
            ("intermediate_ratio", self.intermediate_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(anyhow!("{} must be within (0, 1], got {}", name, ratio));
            }
        }

        if self.intermediate_ratio >= self.advanced_ratio {
            return Err(anyhow!(
                "intermediate_ratio ({}) must be lower than advanced_ratio ({})",
                self.intermediate_ratio,
                self.advanced_ratio
            ));
        }

        Ok(())
    }
}
