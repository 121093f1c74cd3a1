// ABOUTME: Doctor dashboard rollup summarizing a caseload over a window
// ABOUTME: Raw counts, reporting-client averages, trend deltas, and attention list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Caseload rollups for the doctor dashboard
//!
//! Averages are taken over reporting clients only, that is clients with at
//! least one diet log or activity in the window. A metric nobody can resolve
//! is `None` rather than zero, and a trend delta is `None` whenever the prior
//! window had no reporting clients.

use serde::{Deserialize, Serialize};
use tracing::debug;
use vitalcoach_core::models::{ClientId, DoctorId};

use crate::aggregator::ClientMetrics;
use crate::config::RollupConfig;
use crate::windowing::Window;

/// Change of one averaged metric between the prior and the current window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendDelta {
    /// Value in the current window
    pub current: Option<f64>,
    /// Value in the preceding window
    pub prior: Option<f64>,
    /// `current - prior`, undefined without prior reporting clients
    pub delta: Option<f64>,
}

impl TrendDelta {
    fn between(current: Option<f64>, prior: Option<f64>, prior_reporting: usize) -> Self {
        let delta = if prior_reporting == 0 {
            None
        } else {
            current.zip(prior).map(|(current, prior)| current - prior)
        };
        Self {
            current,
            prior,
            delta,
        }
    }
}

/// Trends of the caseload against the preceding window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseloadTrends {
    /// Number of reporting clients
    pub reporting_clients: TrendDelta,
    /// Average diet adherence
    pub average_adherence: TrendDelta,
    /// Average calorie-target ratio
    pub average_calorie_ratio: TrendDelta,
    /// Average activities per client
    pub average_activity_count: TrendDelta,
    /// Average active minutes per client
    pub average_active_minutes: TrendDelta,
}

/// A reporting client whose adherence is below the configured threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionItem {
    /// Client identifier
    pub client_id: ClientId,
    /// Display name
    pub client_name: String,
    /// Adherence rate in the current window
    pub adherence: f64,
}

/// Doctor-level summary of a caseload over one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Doctor the snapshot belongs to
    pub doctor_id: DoctorId,
    /// Current window
    pub window: Window,
    /// Clients in the caseload
    pub total_clients: usize,
    /// Clients with active status
    pub active_clients: usize,
    /// Clients with at least one record in the window
    pub reporting_clients: usize,
    /// Diet logs across the caseload
    pub total_diet_logs: usize,
    /// Activities across the caseload
    pub total_activities: usize,
    /// Clients whose current streak is non-zero
    pub clients_on_streak: usize,
    /// Average adherence of reporting clients
    pub average_adherence: Option<f64>,
    /// Average calorie-target ratio of reporting clients with a target
    pub average_calorie_ratio: Option<f64>,
    /// Average activity count of reporting clients
    pub average_activity_count: Option<f64>,
    /// Average active minutes of reporting clients
    pub average_active_minutes: Option<f64>,
    /// Trends against the preceding window
    pub trends: CaseloadTrends,
    /// Reporting clients below the adherence threshold, lowest first
    pub attention_list: Vec<AttentionItem>,
}

/// Averages of the reporting part of a caseload
#[derive(Debug, Clone, Copy, Default)]
struct ReportingAverages {
    reporting: usize,
    adherence: Option<f64>,
    calorie_ratio: Option<f64>,
    activity_count: Option<f64>,
    active_minutes: Option<f64>,
}

impl ReportingAverages {
    fn of(metrics: &[ClientMetrics]) -> Self {
        // Sum in client order so floating-point results do not depend on input order
        let mut reporting: Vec<&ClientMetrics> =
            metrics.iter().filter(|m| m.has_data()).collect();
        reporting.sort_by(|a, b| a.client_id.cmp(&b.client_id));

        Self {
            reporting: reporting.len(),
            adherence: mean(
                reporting
                    .iter()
                    .filter(|m| m.adherence.elapsed_days > 0)
                    .map(|m| m.adherence.rate),
            ),
            calorie_ratio: mean(
                reporting
                    .iter()
                    .filter(|m| m.nutrition.calorie_target > 0.0)
                    .map(|m| m.nutrition.calorie_target_ratio),
            ),
            activity_count: mean(reporting.iter().map(|m| m.activity.activity_count as f64)),
            active_minutes: mean(reporting.iter().map(|m| m.activity.active_minutes)),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Builds [`AnalyticsSnapshot`]s from per-client metrics
#[derive(Debug, Clone, Default)]
pub struct DashboardRollup {
    config: RollupConfig,
}

impl DashboardRollup {
    /// Create a rollup
    #[must_use]
    pub const fn new(config: RollupConfig) -> Self {
        Self { config }
    }

    /// Summarize the caseload for `window`
    ///
    /// `current` holds the metrics of every client currently in the caseload
    /// for `window`, `prior` the same clients for `window.preceding()`.
    #[must_use]
    pub fn rollup(
        &self,
        doctor_id: &DoctorId,
        window: &Window,
        current: &[ClientMetrics],
        prior: &[ClientMetrics],
    ) -> AnalyticsSnapshot {
        let now = ReportingAverages::of(current);
        let before = ReportingAverages::of(prior);
        let trend = |pick: fn(&ReportingAverages) -> Option<f64>| {
            TrendDelta::between(pick(&now), pick(&before), before.reporting)
        };

        let trends = CaseloadTrends {
            reporting_clients: trend(|a| Some(a.reporting as f64)),
            average_adherence: trend(|a| a.adherence),
            average_calorie_ratio: trend(|a| a.calorie_ratio),
            average_activity_count: trend(|a| a.activity_count),
            average_active_minutes: trend(|a| a.active_minutes),
        };

        let snapshot = AnalyticsSnapshot {
            doctor_id: doctor_id.clone(),
            window: *window,
            total_clients: current.len(),
            active_clients: current.iter().filter(|m| m.is_active()).count(),
            reporting_clients: now.reporting,
            total_diet_logs: current.iter().map(|m| m.nutrition.log_count).sum(),
            total_activities: current.iter().map(|m| m.activity.activity_count).sum(),
            clients_on_streak: current.iter().filter(|m| m.streaks.is_on_streak()).count(),
            average_adherence: now.adherence,
            average_calorie_ratio: now.calorie_ratio,
            average_activity_count: now.activity_count,
            average_active_minutes: now.active_minutes,
            trends,
            attention_list: self.attention_list(current),
        };

        debug!(
            doctor_id = %doctor_id,
            total = snapshot.total_clients,
            reporting = snapshot.reporting_clients,
            attention = snapshot.attention_list.len(),
            "Rolled up caseload"
        );
        snapshot
    }

    fn attention_list(&self, current: &[ClientMetrics]) -> Vec<AttentionItem> {
        let mut items: Vec<AttentionItem> = current
            .iter()
            .filter(|m| m.has_data() && m.adherence.elapsed_days > 0)
            .filter(|m| m.adherence.rate < self.config.low_adherence_threshold)
            .map(|m| AttentionItem {
                client_id: m.client_id.clone(),
                client_name: m.client_name.clone(),
                adherence: m.adherence.rate,
            })
            .collect();
        items.sort_by(|a, b| {
            a.adherence
                .total_cmp(&b.adherence)
                .then_with(|| a.client_id.cmp(&b.client_id))
        });
        items.truncate(self.config.attention_list_limit);
        items
    }
}
