// ABOUTME: Aggregation and rollup configuration for client and caseload metrics
// ABOUTME: Milestone listing limits and attention-list thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use vitalcoach_core::constants::aggregation::{
    DEFAULT_ATTENTION_LIST_LIMIT, DEFAULT_LOW_ADHERENCE_THRESHOLD,
    DEFAULT_MAX_UPCOMING_MILESTONES,
};

/// Per-client aggregation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Upcoming milestones kept per client
    pub max_upcoming_milestones: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            max_upcoming_milestones: DEFAULT_MAX_UPCOMING_MILESTONES,
        }
    }
}

/// Caseload rollup settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollupConfig {
    /// Clients whose adherence falls below this rate need attention
    pub low_adherence_threshold: f64,
    /// Maximum length of the attention list
    pub attention_list_limit: usize,
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self {
            low_adherence_threshold: DEFAULT_LOW_ADHERENCE_THRESHOLD,
            attention_list_limit: DEFAULT_ATTENTION_LIST_LIMIT,
        }
    }
}
