// ABOUTME: Chart period selection and half-open time ranges
// ABOUTME: Parses viewer-selected periods and rejects unrecognized values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AnalyticsError;

/// Prefix of the textual form of a custom range (`custom:<start>/<end>`)
const CUSTOM_PREFIX: &str = "custom:";

/// Period selected by the viewer of a chart
///
/// Transient UI state: supplied by the caller on every observation and never
/// persisted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartPeriod {
    /// A single calendar day
    Day,
    /// A calendar week
    Week,
    /// A calendar month
    Month,
    /// An explicit range, widened to whole days
    Custom {
        /// Requested start
        start: DateTime<Utc>,
        /// Requested end
        end: DateTime<Utc>,
    },
}

impl ChartPeriod {
    /// Period used when the caller does not pick one
    pub const DEFAULT: Self = Self::Day;

    /// Short label used in logs and payloads
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Custom { .. } => "custom",
        }
    }
}

impl Default for ChartPeriod {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { start, end } => write!(
                f,
                "{CUSTOM_PREFIX}{}/{}",
                start.to_rfc3339(),
                end.to_rfc3339()
            ),
            other => f.write_str(other.label()),
        }
    }
}

impl FromStr for ChartPeriod {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "day" | "daily" | "today" => return Ok(Self::Day),
            "week" | "weekly" => return Ok(Self::Week),
            "month" | "monthly" => return Ok(Self::Month),
            _ => {}
        }

        let range = trimmed
            .strip_prefix(CUSTOM_PREFIX)
            .ok_or_else(|| AnalyticsError::invalid_period(trimmed))?;
        let (start, end) = range
            .split_once('/')
            .ok_or_else(|| AnalyticsError::invalid_period(trimmed))?;
        let parse = |value: &str| {
            DateTime::parse_from_rfc3339(value.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| AnalyticsError::invalid_period(trimmed))
        };

        Ok(Self::Custom {
            start: parse(start)?,
            end: parse(end)?,
        })
    }
}

/// A half-open time interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start
    pub start: DateTime<Utc>,
    /// Exclusive end
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range; callers are expected to pass `start <= end`
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whether `instant` falls inside the range
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Smallest range covering both `self` and `other`
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_named_periods() {
        assert_eq!("week".parse::<ChartPeriod>().unwrap(), ChartPeriod::Week);
        assert_eq!(" Monthly ".parse::<ChartPeriod>().unwrap(), ChartPeriod::Month);
        assert_eq!("today".parse::<ChartPeriod>().unwrap(), ChartPeriod::Day);
    }

    #[test]
    fn test_parse_custom_round_trips_display() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap();
        let period = ChartPeriod::Custom { start, end };

        assert_eq!(period.to_string().parse::<ChartPeriod>().unwrap(), period);
    }

    #[test]
    fn test_parse_rejects_unknown_period() {
        let err = "fortnight".parse::<ChartPeriod>().unwrap_err();
        assert_eq!(err, AnalyticsError::invalid_period("fortnight"));

        assert!("custom:not-a-date/also-not".parse::<ChartPeriod>().is_err());
        assert!("custom:2025-03-01T00:00:00Z".parse::<ChartPeriod>().is_err());
    }

    #[test]
    fn test_time_range_is_half_open() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();
        let range = TimeRange::new(start, end);

        assert!(range.contains(start));
        assert!(!range.contains(end));
    }
}
