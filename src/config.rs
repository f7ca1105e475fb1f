use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::feed::{Backoff, RetryPolicy};
use crate::position::Frame;
use crate::time::deserialize_duration;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub grouping: GroupingConfig,
    pub evaluation: EvaluationConfig,
    pub output: OutputConfig,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_groups")]
    pub groups: Vec<String>,
    #[serde(default = "default_timeout", deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            groups: default_groups(),
            timeout: default_timeout(),
            workers: default_workers(),
            retry: RetryPolicy::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://celestrak.org/NORAD/elements/gp.php".to_string()
}

fn default_groups() -> Vec<String> {
    [
        "last-30-days",
        "stations",
        "active",
        "weather",
        "resource",
        "dmc",
        "intelsat",
        "eutelsat",
        "starlink",
        "gnss",
        "gps-ops",
        "glo-ops",
        "galileo",
        "beidou",
        "nnss",
        "musson",
        "cosmos-1408-debris",
        "fengyun-1c-debris",
        "iridium-33-debris",
        "cosmos-2251-debris",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_timeout() -> Duration {
    Duration::from_secs(20)
}

fn default_workers() -> usize {
    1
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    #[default]
    Provenance,
    Keywords,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GroupingConfig {
    pub mode: GroupingMode,
    /// Output label -> name substrings, matched case-insensitively.
    pub keywords: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub frame: Frame,
    pub workers: usize,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            frame: Frame::default(),
            workers: default_workers(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Upstream fields to pass through; `None` passes all of them.
    pub metadata_fields: Option<Vec<String>>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            metadata_fields: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    /// Load from `path`, or fall back to defaults when no file is given.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.feed.groups.is_empty() {
            return invalid("feed.groups is empty".into());
        }
        let mut seen = HashSet::new();
        for group in &self.feed.groups {
            check_label("feed.groups", group)?;
            if !seen.insert(group) {
                return invalid(format!("feed.groups lists {group:?} twice"));
            }
        }

        if self.feed.workers == 0 || self.evaluation.workers == 0 {
            return invalid("workers must be at least 1".into());
        }
        if self.feed.retry.max_attempts == 0 {
            return invalid("feed.retry.max_attempts must be at least 1".into());
        }
        if let Backoff::Exponential { factor, .. } = self.feed.retry.backoff {
            if !(factor.is_finite() && factor > 0.0) {
                return invalid(format!("backoff factor {factor} must be positive"));
            }
        }

        if self.grouping.mode == GroupingMode::Keywords {
            if self.grouping.keywords.is_empty() {
                return invalid("grouping.mode is keywords but no keywords are configured".into());
            }
            for (label, words) in &self.grouping.keywords {
                check_label("grouping.keywords", label)?;
                if words.iter().all(|w| w.trim().is_empty()) {
                    return invalid(format!("keyword group {label:?} has no keywords"));
                }
            }
        }

        Ok(())
    }
}

/// Labels become file names, so they must be non-blank and free of separators.
fn check_label(section: &str, label: &str) -> Result<(), ConfigError> {
    if label.trim().is_empty() || label.contains(['/', '\\']) || label.starts_with('.') {
        return Err(ConfigError::Invalid(format!(
            "{section}: {label:?} is not a usable group label"
        )));
    }
    Ok(())
}
