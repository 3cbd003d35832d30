//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct Config {
    /// Pager configuration.
    #[serde(default)]
    pub pager: Pager,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,

    /// Demo session configuration.
    #[serde(default)]
    pub demo: Demo,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Pager configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Pager {
    /// Number of rows requested per page.
    #[default(20)]
    pub page_size: usize,

    /// Distance to the content bottom below which the next page is requested.
    #[default(300.0)]
    pub threshold: f64,
}

impl From<Pager> for service::Config {
    fn from(value: Pager) -> Self {
        let Pager {
            page_size,
            threshold,
        } = value;
        Self {
            pager: service::pager::Config {
                page_size,
                threshold: threshold.into(),
            },
        }
    }
}

/// Demo session configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Demo {
    /// Number of team members in the synthetic roster.
    #[default(95)]
    pub members: usize,

    /// Height of a single table row.
    #[default(36.0)]
    pub row_height: f64,

    /// Height of the visible part of the table.
    #[default(540.0)]
    pub viewport_height: f64,

    /// Simulated latency of a single page fetch.
    #[default(time::Duration::from_millis(20))]
    #[serde(with = "humantime_serde")]
    pub latency: time::Duration,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
