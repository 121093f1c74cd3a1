// ABOUTME: Windowing engine turning a chart period and reference time into aligned windows
// ABOUTME: Computes window bounds, bucket layout, elapsed days, and preceding windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Time windows for charts and metrics
//!
//! Every window is half-open `[start, end)` and aligned to local midnight of
//! the configured calendar. Day windows are split into hourly buckets, all
//! other windows into daily buckets.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vitalcoach_core::constants::aggregation::MAX_CUSTOM_WINDOW_DAYS;
use vitalcoach_core::constants::time::{
    DAYS_PER_WEEK, HOURS_PER_DAY, SECONDS_PER_DAY, SECONDS_PER_HOUR,
};
use vitalcoach_core::errors::AnalyticsError;
use vitalcoach_core::models::{ChartPeriod, TimeRange};

use crate::config::{ConfigError, WindowConfig};

/// Width of one chart bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketSize {
    /// One hour
    Hour,
    /// One calendar day
    Day,
}

impl BucketSize {
    /// Bucket width in seconds
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Hour => SECONDS_PER_HOUR,
            Self::Day => SECONDS_PER_DAY,
        }
    }

    /// Bucket width as a chrono `Duration`
    #[must_use]
    pub fn duration(self) -> Duration {
        Duration::seconds(self.seconds())
    }
}

/// An aligned, half-open time window with a fixed bucket layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    /// Period the window was computed for
    pub period: ChartPeriod,
    /// Inclusive start
    pub start: DateTime<Utc>,
    /// Exclusive end
    pub end: DateTime<Utc>,
    /// Width of each bucket
    pub bucket_size: BucketSize,
    /// Number of buckets covering `[start, end)`
    pub bucket_count: usize,
}

impl Window {
    /// The window as a plain time range, used to scope record queries
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        TimeRange::new(self.start, self.end)
    }

    /// Whether `instant` falls inside the window
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Bucket holding `instant`
    ///
    /// A timestamp exactly on a bucket boundary belongs to the later bucket.
    #[must_use]
    pub fn bucket_index(&self, instant: DateTime<Utc>) -> Option<usize> {
        self.offset_units(instant, self.bucket_size.seconds())
            .filter(|index| *index < self.bucket_count)
    }

    /// Start of bucket `index`
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn bucket_start(&self, index: usize) -> DateTime<Utc> {
        self.start + Duration::seconds(self.bucket_size.seconds() * index as i64)
    }

    /// Number of calendar days covered by the window
    #[must_use]
    pub fn day_count(&self) -> usize {
        ((self.end - self.start).num_seconds() / SECONDS_PER_DAY).max(1) as usize
    }

    /// Calendar day of the window holding `instant`
    #[must_use]
    pub fn day_index(&self, instant: DateTime<Utc>) -> Option<usize> {
        self.offset_units(instant, SECONDS_PER_DAY)
            .filter(|index| *index < self.day_count())
    }

    /// Days of the window that have started by `now`
    ///
    /// The day containing `now` counts as elapsed.
    #[must_use]
    pub fn elapsed_days(&self, now: DateTime<Utc>) -> usize {
        self.elapsed_units(now, SECONDS_PER_DAY, self.day_count())
    }

    /// Buckets of the window that have started by `now`
    #[must_use]
    pub fn elapsed_buckets(&self, now: DateTime<Utc>) -> usize {
        self.elapsed_units(now, self.bucket_size.seconds(), self.bucket_count)
    }

    /// The window immediately before this one, with the same length and layout
    #[must_use]
    pub fn preceding(&self) -> Self {
        let length = self.end - self.start;
        let start = self.start - length;
        let period = match self.period {
            ChartPeriod::Custom { .. } => ChartPeriod::Custom {
                start,
                end: self.start,
            },
            named => named,
        };
        Self {
            period,
            start,
            end: self.start,
            bucket_size: self.bucket_size,
            bucket_count: self.bucket_count,
        }
    }

    fn offset_units(&self, instant: DateTime<Utc>, unit_seconds: i64) -> Option<usize> {
        if !self.contains(instant) {
            return None;
        }
        Some(((instant - self.start).num_seconds() / unit_seconds) as usize)
    }

    fn elapsed_units(&self, now: DateTime<Utc>, unit_seconds: i64, total: usize) -> usize {
        if now < self.start {
            return 0;
        }
        let started = (now - self.start).num_seconds() / unit_seconds + 1;
        (started as usize).min(total)
    }
}

/// Computes aligned windows on the configured calendar
#[derive(Debug, Clone)]
pub struct WindowingEngine {
    config: WindowConfig,
    offset: FixedOffset,
}

impl Default for WindowingEngine {
    fn default() -> Self {
        Self {
            config: WindowConfig::default(),
            offset: Utc.fix(),
        }
    }
}

impl WindowingEngine {
    /// Create an engine for the given calendar
    ///
    /// # Errors
    ///
    /// Returns an error if the configured UTC offset is out of range
    pub fn new(config: WindowConfig) -> Result<Self, ConfigError> {
        let offset = config.offset()?;
        Ok(Self { config, offset })
    }

    /// Calendar this engine aligns to
    #[must_use]
    pub const fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Compute the window for `period` around `reference`
    ///
    /// A missing period means a single day.
    ///
    /// # Errors
    ///
    /// Returns `MalformedWindow` for a custom range whose start is not before
    /// its end, or which spans more than a year
    pub fn compute_window(
        &self,
        reference: DateTime<Utc>,
        period: Option<ChartPeriod>,
    ) -> Result<Window, AnalyticsError> {
        let period = period.unwrap_or_default();
        let window = match period {
            ChartPeriod::Day => {
                let start = self.local_midnight(reference);
                Window {
                    period,
                    start,
                    end: start + Duration::days(1),
                    bucket_size: BucketSize::Hour,
                    bucket_count: HOURS_PER_DAY,
                }
            }
            ChartPeriod::Week => {
                let today = self.local_date(reference);
                let since_week_start = i64::from(
                    (today.weekday().num_days_from_monday() + 7
                        - self.config.first_day_of_week.num_days_from_monday())
                        % 7,
                );
                let start = self.midnight_of(today - Duration::days(since_week_start));
                Self::daily(period, start, DAYS_PER_WEEK)
            }
            ChartPeriod::Month => {
                let today = self.local_date(reference);
                let first = today.with_day(1).unwrap_or(today);
                let next = first_of_next_month(first)?;
                Self::daily(period, self.midnight_of(first), (next - first).num_days())
            }
            ChartPeriod::Custom { start, end } => self.custom(start, end)?,
        };

        debug!(
            period = %window.period.label(),
            start = %window.start,
            end = %window.end,
            buckets = window.bucket_count,
            "Computed window"
        );
        Ok(window)
    }

    /// Parse `period` text and compute its window
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` when the text names no supported period, and
    /// the errors of [`Self::compute_window`]
    pub fn compute_window_for(
        &self,
        reference: DateTime<Utc>,
        period: Option<&str>,
    ) -> Result<Window, AnalyticsError> {
        let parsed = period.map(str::parse::<ChartPeriod>).transpose()?;
        self.compute_window(reference, parsed)
    }

    fn custom(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Window, AnalyticsError> {
        if start >= end {
            return Err(AnalyticsError::malformed_window(format!(
                "custom range start {start} is not before end {end}"
            )));
        }

        let aligned_start = self.local_midnight(start);
        let floor_end = self.local_midnight(end);
        let aligned_end = if floor_end == end {
            end
        } else {
            floor_end + Duration::days(1)
        };

        let days = (aligned_end - aligned_start).num_days();
        if days > MAX_CUSTOM_WINDOW_DAYS {
            return Err(AnalyticsError::malformed_window(format!(
                "custom range spans {days} days, more than {MAX_CUSTOM_WINDOW_DAYS}"
            )));
        }

        Ok(Self::daily(
            ChartPeriod::Custom { start, end },
            aligned_start,
            days,
        ))
    }

    fn daily(period: ChartPeriod, start: DateTime<Utc>, days: i64) -> Window {
        Window {
            period,
            start,
            end: start + Duration::days(days),
            bucket_size: BucketSize::Day,
            bucket_count: days as usize,
        }
    }

    fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    fn local_midnight(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        self.midnight_of(self.local_date(instant))
    }

    fn midnight_of(&self, date: NaiveDate) -> DateTime<Utc> {
        let local = date.and_time(NaiveTime::MIN);
        let utc = local - Duration::seconds(i64::from(self.offset.local_minus_utc()));
        Utc.from_utc_datetime(&utc)
    }
}

fn first_of_next_month(first: NaiveDate) -> Result<NaiveDate, AnalyticsError> {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AnalyticsError::malformed_window(format!("no month after {first}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_day_window_has_hourly_buckets() {
        let engine = WindowingEngine::default();
        let window = engine.compute_window(at(2025, 3, 5, 14), None).unwrap();

        assert_eq!(window.period, ChartPeriod::Day);
        assert_eq!(window.start, at(2025, 3, 5, 0));
        assert_eq!(window.end, at(2025, 3, 6, 0));
        assert_eq!(window.bucket_size, BucketSize::Hour);
        assert_eq!(window.bucket_count, 24);
        assert_eq!(window.day_count(), 1);
    }

    #[test]
    fn test_week_window_starts_on_configured_weekday() {
        // 2025-03-05 is a Wednesday
        let monday = WindowingEngine::default();
        let window = monday
            .compute_window(at(2025, 3, 5, 9), Some(ChartPeriod::Week))
            .unwrap();
        assert_eq!(window.start, at(2025, 3, 3, 0));
        assert_eq!(window.bucket_count, 7);

        let sunday = WindowingEngine::new(WindowConfig {
            first_day_of_week: Weekday::Sun,
            utc_offset_minutes: 0,
        })
        .unwrap();
        let window = sunday
            .compute_window(at(2025, 3, 5, 9), Some(ChartPeriod::Week))
            .unwrap();
        assert_eq!(window.start, at(2025, 3, 2, 0));
    }

    #[test]
    fn test_month_window_covers_whole_month() {
        let engine = WindowingEngine::default();
        let feb = engine
            .compute_window(at(2024, 2, 10, 0), Some(ChartPeriod::Month))
            .unwrap();
        assert_eq!(feb.bucket_count, 29);
        assert_eq!(feb.end, at(2024, 3, 1, 0));

        let dec = engine
            .compute_window(at(2025, 12, 31, 23), Some(ChartPeriod::Month))
            .unwrap();
        assert_eq!(dec.end, at(2026, 1, 1, 0));
    }

    #[test]
    fn test_offset_shifts_local_midnight() {
        let engine = WindowingEngine::new(WindowConfig {
            first_day_of_week: Weekday::Mon,
            utc_offset_minutes: 120,
        })
        .unwrap();
        // 23:00 UTC is already the next day at UTC+2
        let window = engine.compute_window(at(2025, 3, 5, 23), None).unwrap();
        assert_eq!(window.start, at(2025, 3, 5, 22));
    }

    #[test]
    fn test_custom_window_widens_to_whole_days() {
        let engine = WindowingEngine::default();
        let start = at(2025, 3, 1, 10);
        let end = at(2025, 3, 4, 6);
        let window = engine
            .compute_window(at(2025, 3, 2, 0), Some(ChartPeriod::Custom { start, end }))
            .unwrap();

        assert_eq!(window.start, at(2025, 3, 1, 0));
        assert_eq!(window.end, at(2025, 3, 5, 0));
        assert_eq!(window.bucket_count, 4);
    }

    #[test]
    fn test_custom_window_rejects_inverted_range() {
        let engine = WindowingEngine::default();
        let start = at(2025, 3, 4, 0);
        let err = engine
            .compute_window(start, Some(ChartPeriod::Custom { start, end: start }))
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::MalformedWindow { .. }));
    }

    #[test]
    fn test_boundary_timestamp_goes_to_later_bucket() {
        let engine = WindowingEngine::default();
        let window = engine.compute_window(at(2025, 3, 5, 14), None).unwrap();

        assert_eq!(window.bucket_index(at(2025, 3, 5, 3)), Some(3));
        assert_eq!(window.bucket_index(window.start), Some(0));
        assert_eq!(window.bucket_index(window.end), None);
    }

    #[test]
    fn test_elapsed_days_counts_current_day() {
        let engine = WindowingEngine::default();
        let week = engine
            .compute_window(at(2025, 3, 7, 12), Some(ChartPeriod::Week))
            .unwrap();

        assert_eq!(week.elapsed_days(at(2025, 3, 7, 12)), 5);
        assert_eq!(week.elapsed_days(at(2025, 3, 1, 0)), 0);
        assert_eq!(week.elapsed_days(at(2025, 4, 1, 0)), 7);
    }

    #[test]
    fn test_preceding_window_has_same_layout() {
        let engine = WindowingEngine::default();
        let week = engine
            .compute_window(at(2025, 3, 5, 9), Some(ChartPeriod::Week))
            .unwrap();
        let prior = week.preceding();

        assert_eq!(prior.end, week.start);
        assert_eq!(prior.start, at(2025, 2, 24, 0));
        assert_eq!(prior.bucket_count, week.bucket_count);
        assert_eq!(prior.bucket_size, week.bucket_size);
    }

    #[test]
    fn test_compute_window_for_rejects_unknown_text() {
        let engine = WindowingEngine::default();
        let err = engine
            .compute_window_for(at(2025, 3, 5, 9), Some("quarter"))
            .unwrap_err();
        assert_eq!(err, AnalyticsError::invalid_period("quarter"));
    }
}
