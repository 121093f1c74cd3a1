// ABOUTME: Client progress analytics for doctors and nutritionists
// ABOUTME: Windowing, per-client aggregation, section composition, and caseload rollups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitalcoach Intelligence
//!
//! Pure computations turning raw client records into dashboard views. Nothing
//! in this crate reads from a store or caches results; the reactive layer in
//! the `vitalcoach` crate decides when to call into it.

/// Analytics configuration with environment overrides
pub mod config;

/// Window alignment and bucketing
pub mod windowing;

/// Per-client metric aggregation
pub mod aggregator;

/// Client detail tab catalog
pub mod sections;

/// Doctor dashboard rollups
pub mod rollup;

pub use aggregator::{
    ActivityMetrics, AdherenceMetrics, BucketPoint, ClientMetrics, ClientRecords,
    MetricAggregator, NutritionMetrics, PlanProgress, StreakMetrics,
};
pub use config::{AggregationConfig, AnalyticsConfig, ConfigError, RollupConfig, WindowConfig};
pub use rollup::{AnalyticsSnapshot, AttentionItem, CaseloadTrends, DashboardRollup, TrendDelta};
pub use sections::{
    compose_sections, evaluate_sections, ClientMetadata, SectionContent, SectionItem,
    SectionKind, TabDefinition, DEFAULT_TABS,
};
pub use windowing::{BucketSize, Window, WindowingEngine};
