// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Calendar, aggregation, and service naming constants for the analytics engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large list.

/// Calendar arithmetic
pub mod time {
    /// Seconds in one hour
    pub const SECONDS_PER_HOUR: i64 = 3_600;
    /// Seconds in one day
    pub const SECONDS_PER_DAY: i64 = 86_400;
    /// Hours in one day (bucket count of a day window)
    pub const HOURS_PER_DAY: usize = 24;
    /// Days in one week
    pub const DAYS_PER_WEEK: i64 = 7;
    /// Largest accepted UTC offset, in minutes
    pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;
}

/// Aggregation defaults
pub mod aggregation {
    /// Upcoming milestones listed per client
    pub const DEFAULT_MAX_UPCOMING_MILESTONES: usize = 5;
    /// Adherence below which a client is put on the attention list
    pub const DEFAULT_LOW_ADHERENCE_THRESHOLD: f64 = 0.5;
    /// Clients listed on the doctor's attention list
    pub const DEFAULT_ATTENTION_LIST_LIMIT: usize = 10;
    /// Longest custom window accepted, in days
    pub const MAX_CUSTOM_WINDOW_DAYS: i64 = 366;
}

/// Service identification for structured logs
pub mod service_names {
    /// Name of the analytics service
    pub const VITALCOACH_ANALYTICS: &str = "vitalcoach-analytics";
}

/// Environment variable names
pub mod env_config {
    /// First day of the week (`monday`, `sunday`, ...)
    pub const WEEK_START: &str = "VITALCOACH_WEEK_START";
    /// Fixed calendar offset from UTC, in minutes
    pub const UTC_OFFSET_MINUTES: &str = "VITALCOACH_UTC_OFFSET_MINUTES";
    /// Upcoming milestones listed per client
    pub const MAX_UPCOMING_MILESTONES: &str = "VITALCOACH_MAX_UPCOMING_MILESTONES";
    /// Attention list adherence threshold
    pub const LOW_ADHERENCE_THRESHOLD: &str = "VITALCOACH_LOW_ADHERENCE_THRESHOLD";
    /// Attention list length
    pub const ATTENTION_LIST_LIMIT: &str = "VITALCOACH_ATTENTION_LIST_LIMIT";
}
