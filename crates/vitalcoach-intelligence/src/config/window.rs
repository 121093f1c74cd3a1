// ABOUTME: Calendar configuration for window alignment
// ABOUTME: First day of week and fixed UTC offset used to align chart windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{FixedOffset, Weekday};
use serde::{Deserialize, Serialize};
use vitalcoach_core::constants::time::MAX_UTC_OFFSET_MINUTES;

use super::ConfigError;

/// Calendar used to align window boundaries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WindowConfig {
    /// Day on which week windows start
    pub first_day_of_week: Weekday,
    /// Offset of the coaching calendar from UTC, in minutes
    pub utc_offset_minutes: i32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Mon,
            utc_offset_minutes: 0,
        }
    }
}

impl WindowConfig {
    /// Calendar offset as a chrono `FixedOffset`
    ///
    /// # Errors
    ///
    /// Returns an error if the configured offset is outside ±14 hours
    pub fn offset(&self) -> Result<FixedOffset, ConfigError> {
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::ValueOutOfRange(
                "utc_offset_minutes must be within ±840",
            ));
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60)
            .ok_or(ConfigError::ValueOutOfRange("utc_offset_minutes"))
    }
}
