//! Configuration management for the ScholarNet engine
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Analysis configuration
    pub analysis: AnalysisConfig,

    /// Community detection configuration
    pub community: CommunityConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Influence score above which an author is flagged as a key person
    #[serde(default = "default_key_person_threshold")]
    pub key_person_threshold: f64,

    /// Default number of key people returned by a ranking request
    #[serde(default = "default_key_people_top_n")]
    pub key_people_top_n: usize,

    /// Analysis deadline in seconds (0 to disable)
    #[serde(default = "default_analysis_timeout")]
    pub analysis_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommunityConfig {
    /// Maximum local-moving iterations per aggregation level
    #[serde(default = "default_community_max_iter")]
    pub max_iterations: usize,

    /// Maximum aggregation levels
    #[serde(default = "default_community_max_levels")]
    pub max_levels: usize,

    /// Minimum modularity improvement to continue aggregating
    #[serde(default = "default_min_modularity_gain")]
    pub min_modularity_gain: f64,

    /// Resolution parameter; higher values produce smaller communities
    #[serde(default = "default_resolution")]
    pub resolution: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_key_person_threshold() -> f64 { 20.0 }
fn default_key_people_top_n() -> usize { 10 }
fn default_analysis_timeout() -> u64 { 30 }
fn default_community_max_iter() -> usize { 100 }
fn default_community_max_levels() -> usize { 10 }
fn default_min_modularity_gain() -> f64 { 1e-7 }
fn default_resolution() -> f64 { 1.0 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_service_name() -> String { "scholarnet".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("analysis.key_person_threshold", default_key_person_threshold())?
            .set_default("analysis.key_people_top_n", default_key_people_top_n() as u64)?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__ANALYSIS__KEY_PERSON_THRESHOLD=25.0
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the analysis deadline as a Duration, if one is configured
    pub fn analysis_timeout(&self) -> Option<Duration> {
        if self.analysis.analysis_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.analysis.analysis_timeout_secs))
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig {
                key_person_threshold: default_key_person_threshold(),
                key_people_top_n: default_key_people_top_n(),
                analysis_timeout_secs: default_analysis_timeout(),
            },
            community: CommunityConfig {
                max_iterations: default_community_max_iter(),
                max_levels: default_community_max_levels(),
                min_modularity_gain: default_min_modularity_gain(),
                resolution: default_resolution(),
            },
            observability: ObservabilityConfig {
                log_level: default_log_level(),
                json_logging: default_json_logging(),
                service_name: default_service_name(),
            },
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AppConfig::default().analysis
    }
}

impl Default for CommunityConfig {
    fn default() -> Self {
        AppConfig::default().community
    }
}
