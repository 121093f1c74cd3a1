// ABOUTME: Analytics configuration orchestrating calendar, aggregation, and rollup settings
// ABOUTME: Loads defaults, applies environment overrides, and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analytics Configuration Module
//!
//! Configuration is organized into domain-specific modules:
//! - `window` - calendar alignment (first day of week, UTC offset)
//! - `aggregation` - per-client aggregation and caseload rollup settings
//! - `error` - validation errors

pub mod aggregation;
pub mod error;
pub mod window;

pub use aggregation::{AggregationConfig, RollupConfig};
pub use error::ConfigError;
pub use window::WindowConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;
use vitalcoach_core::constants::env_config;

/// Global configuration singleton
static ANALYTICS_CONFIG: OnceLock<AnalyticsConfig> = OnceLock::new();

/// Main analytics configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsConfig {
    /// Calendar used for window alignment
    pub window: WindowConfig,
    /// Per-client aggregation settings
    pub aggregation: AggregationConfig,
    /// Caseload rollup settings
    pub rollup: RollupConfig,
}

impl AnalyticsConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        ANALYTICS_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load analytics config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any setting is out of its accepted range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.offset()?;

        let threshold = self.rollup.low_adherence_threshold;
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidRange(
                "low_adherence_threshold must be between 0 and 1",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(env_config::WEEK_START, &mut self.window.first_day_of_week)?;
        Self::apply_env_var(
            env_config::UTC_OFFSET_MINUTES,
            &mut self.window.utc_offset_minutes,
        )?;
        Self::apply_env_var(
            env_config::MAX_UPCOMING_MILESTONES,
            &mut self.aggregation.max_upcoming_milestones,
        )?;
        Self::apply_env_var(
            env_config::LOW_ADHERENCE_THRESHOLD,
            &mut self.rollup.low_adherence_threshold,
        )?;
        Self::apply_env_var(
            env_config::ATTENTION_LIST_LIMIT,
            &mut self.rollup.attention_list_limit,
        )?;
        Ok(self)
    }
}
