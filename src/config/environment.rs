// ABOUTME: Environment configuration for the analytics command-line tool
// ABOUTME: Gathers analytics settings, default chart period, and logging level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use tracing::{info, Level};
use vitalcoach_core::models::ChartPeriod;
use vitalcoach_intelligence::AnalyticsConfig;

/// Variable naming the chart period used when a command does not pick one
pub const DEFAULT_PERIOD_ENV: &str = "VITALCOACH_DEFAULT_PERIOD";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debugging output, including recomputations
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Configuration of the command-line tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Period used when a command gives none; `None` falls back to a day
    pub default_period: Option<ChartPeriod>,
    /// Analytics settings
    pub analytics: AnalyticsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an analytics variable or the default period is invalid
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let default_period = match env::var(DEFAULT_PERIOD_ENV) {
            Ok(value) => Some(
                value
                    .parse::<ChartPeriod>()
                    .map_err(|e| anyhow!("Invalid {DEFAULT_PERIOD_ENV}: {e}"))?,
            ),
            Err(_) => None,
        };

        let config = Self {
            log_level: LogLevel::from_str_or_default(
                &env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
            ),
            default_period,
            analytics: AnalyticsConfig::load()
                .map_err(|e| anyhow!("Invalid analytics configuration: {e}"))?,
        };

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Vitalcoach Analytics Configuration:\n\
             - Log Level: {}\n\
             - Default Period: {}\n\
             - Week Starts: {}\n\
             - UTC Offset (minutes): {}\n\
             - Upcoming Milestones: {}\n\
             - Low Adherence Threshold: {}\n\
             - Attention List Limit: {}",
            self.log_level,
            self.default_period.unwrap_or_default(),
            self.analytics.window.first_day_of_week,
            self.analytics.window.utc_offset_minutes,
            self.analytics.aggregation.max_upcoming_milestones,
            self.analytics.rollup.low_adherence_threshold,
            self.analytics.rollup.attention_list_limit,
        )
    }
}
