// ABOUTME: Activity entry models for physical activity logged by clients
// ABOUTME: ActivityEntry and ActivityKind definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClientId, RecordId};

/// Kind of physical activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Walking
    Walk,
    /// Running or jogging
    Run,
    /// Cycling, indoor or outdoor
    Cycle,
    /// Swimming
    Swim,
    /// Weights or resistance training
    Strength,
    /// Yoga or stretching
    Yoga,
    /// Anything else
    Other,
}

impl ActivityKind {
    /// Every activity kind, in display order
    pub const ALL: [Self; 7] = [
        Self::Walk,
        Self::Run,
        Self::Cycle,
        Self::Swim,
        Self::Strength,
        Self::Yoga,
        Self::Other,
    ];
}

/// A timestamped record of physical activity
///
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    /// Record identifier
    pub id: RecordId,
    /// Owning client
    pub client_id: ClientId,
    /// When the activity started
    pub started_at: DateTime<Utc>,
    /// Kind of activity
    pub kind: ActivityKind,
    /// Duration in minutes
    #[serde(default)]
    pub duration_minutes: f64,
    /// Estimated calories burned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<f64>,
    /// Step count, for step-based activities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
}
