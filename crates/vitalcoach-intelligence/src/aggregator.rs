// ABOUTME: Metric aggregator deriving per-client progress metrics from raw records
// ABOUTME: Adherence, nutrition, activity, streak, chart series, and plan progress
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Per-client metric aggregation
//!
//! Aggregation is a pure function of the client's records, the window, and
//! the reference time. Records are filtered to the client and the window and
//! then summed in `(timestamp, id)` order so that the result never depends on
//! the order in which the store delivered them.

use chrono::{DateTime, Duration, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use vitalcoach_core::errors::AnalyticsError;
use vitalcoach_core::models::{
    active_plan, ActivityEntry, ActivityKind, Client, ClientId, ClientStatus, DietLogEntry,
    MealPlan, MealType, PlanId, PlanMilestone, RecordId,
};

use crate::config::AggregationConfig;
use crate::windowing::Window;

/// Raw records of one client, as read from the record source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientRecords {
    /// The client, `None` when the identifier does not resolve
    pub client: Option<Client>,
    /// All of the client's meal plans
    pub meal_plans: Vec<MealPlan>,
    /// Diet logs, possibly wider than the window
    pub diet_logs: Vec<DietLogEntry>,
    /// Activities, possibly wider than the window
    pub activities: Vec<ActivityEntry>,
}

/// Diet adherence over the elapsed part of the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdherenceMetrics {
    /// Elapsed days with at least one qualifying diet log
    pub adherent_days: usize,
    /// Days of the window started by the reference time
    pub elapsed_days: usize,
    /// `adherent_days / elapsed_days`, 0 when nothing has elapsed
    pub rate: f64,
}

/// Nutrition totals over the window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionMetrics {
    /// Diet logs in the window
    pub log_count: usize,
    /// Calories logged
    pub calories: f64,
    /// Protein logged (grams)
    pub protein_g: f64,
    /// Carbohydrates logged (grams)
    pub carbohydrates_g: f64,
    /// Fat logged (grams)
    pub fat_g: f64,
    /// Logs per meal type; every meal type is present
    pub logs_by_meal_type: BTreeMap<MealType, usize>,
    /// Active plan's daily target times elapsed days, 0 without a target
    pub calorie_target: f64,
    /// Logged calories over the target, 0 without a target
    pub calorie_target_ratio: f64,
}

/// Activity totals over the window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    /// Activities in the window
    pub activity_count: usize,
    /// Minutes of activity
    pub active_minutes: f64,
    /// Calories burned
    pub calories_burned: f64,
    /// Steps recorded
    pub steps: u64,
    /// Activities per kind; every kind is present
    pub by_kind: BTreeMap<ActivityKind, usize>,
}

/// Consecutive active buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakMetrics {
    /// Run of active buckets ending at the last elapsed bucket
    pub current_streak: usize,
    /// Longest run of active buckets in the elapsed part of the window
    pub longest_streak: usize,
}

impl StreakMetrics {
    /// Whether the client is currently on a streak
    #[must_use]
    pub const fn is_on_streak(&self) -> bool {
        self.current_streak > 0
    }
}

/// One chart point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketPoint {
    /// Bucket start
    pub start: DateTime<Utc>,
    /// Diet logs in the bucket
    pub diet_logs: usize,
    /// Calories logged in the bucket
    pub calories: f64,
    /// Activities in the bucket
    pub activities: usize,
    /// Active minutes in the bucket
    pub active_minutes: f64,
}

/// Progress on the client's active meal plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanProgress {
    /// Active plan, if any
    pub plan_id: Option<PlanId>,
    /// Active plan title
    pub plan_title: Option<String>,
    /// Day number on the plan as of the reference time, 0 before it starts
    pub days_on_plan: usize,
    /// Plan's daily calorie target
    pub daily_calorie_target: Option<f64>,
    /// Milestones due at or after the reference time, soonest first
    pub upcoming_milestones: Vec<PlanMilestone>,
}

/// Everything the dashboards show about one client for one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientMetrics {
    /// Client identifier
    pub client_id: ClientId,
    /// Display name
    pub client_name: String,
    /// Lifecycle status
    pub status: ClientStatus,
    /// Window the metrics cover
    pub window: Window,
    /// Diet adherence
    pub adherence: AdherenceMetrics,
    /// Nutrition totals
    pub nutrition: NutritionMetrics,
    /// Activity totals
    pub activity: ActivityMetrics,
    /// Activity streaks
    pub streaks: StreakMetrics,
    /// Active plan progress
    pub plan: PlanProgress,
    /// One point per bucket
    pub series: Vec<BucketPoint>,
}

impl ClientMetrics {
    /// Whether the client logged anything in the window
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.nutrition.log_count > 0 || self.activity.activity_count > 0
    }

    /// Whether the client is currently coached
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }
}

/// Derives [`ClientMetrics`] from raw records
#[derive(Debug, Clone, Default)]
pub struct MetricAggregator {
    config: AggregationConfig,
}

impl MetricAggregator {
    /// Create an aggregator
    #[must_use]
    pub const fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Aggregate one client's records over `window` as of `now`
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` when the client record is missing
    pub fn aggregate(
        &self,
        client_id: &ClientId,
        window: &Window,
        now: DateTime<Utc>,
        records: &ClientRecords,
    ) -> Result<ClientMetrics, AnalyticsError> {
        let client = records
            .client
            .as_ref()
            .ok_or_else(|| AnalyticsError::InsufficientData {
                client_id: client_id.to_string(),
            })?;

        let diet_logs = in_window(&records.diet_logs, client_id, window);
        let activities = in_window(&records.activities, client_id, window);
        let plan = active_plan(&records.meal_plans).filter(|plan| &plan.client_id == client_id);

        let adherence = adherence(window, now, &diet_logs);
        let nutrition = nutrition(&diet_logs, plan, adherence.elapsed_days);
        let series = series(window, &diet_logs, &activities);
        let streaks = streaks(&series, window.elapsed_buckets(now));

        debug!(
            client_id = %client_id,
            diet_logs = diet_logs.len(),
            activities = activities.len(),
            adherence = adherence.rate,
            "Aggregated client metrics"
        );

        Ok(ClientMetrics {
            client_id: client_id.clone(),
            client_name: client.name.clone(),
            status: client.status,
            window: *window,
            adherence,
            nutrition,
            activity: activity(&activities),
            streaks,
            plan: self.plan_progress(plan, window, now),
            series,
        })
    }

    /// Aggregate several clients one after another on the calling thread
    #[must_use]
    pub fn aggregate_each(
        &self,
        window: &Window,
        now: DateTime<Utc>,
        clients: &[(ClientId, ClientRecords)],
    ) -> Vec<Result<ClientMetrics, AnalyticsError>> {
        clients
            .iter()
            .map(|(client_id, records)| self.aggregate(client_id, window, now, records))
            .collect()
    }

    /// Aggregate several clients in parallel, keeping input order
    ///
    /// Meant for batch work over large caseloads. Reactive recomputation uses
    /// [`Self::aggregate_each`] so that it never leaves the calling thread.
    #[must_use]
    pub fn aggregate_many(
        &self,
        window: &Window,
        now: DateTime<Utc>,
        clients: &[(ClientId, ClientRecords)],
    ) -> Vec<Result<ClientMetrics, AnalyticsError>> {
        clients
            .par_iter()
            .map(|(client_id, records)| self.aggregate(client_id, window, now, records))
            .collect()
    }

    fn plan_progress(
        &self,
        plan: Option<&MealPlan>,
        window: &Window,
        now: DateTime<Utc>,
    ) -> PlanProgress {
        let Some(plan) = plan else {
            return PlanProgress::default();
        };

        // `end` is exclusive, so the last counted instant is one second before it
        let as_of = now.min(window.end - Duration::seconds(1));
        let days_on_plan = if as_of < plan.start_date {
            0
        } else {
            (as_of - plan.start_date).num_days() as usize + 1
        };

        let mut upcoming: Vec<PlanMilestone> = plan
            .milestones
            .iter()
            .filter(|milestone| milestone.due >= now)
            .cloned()
            .collect();
        upcoming.sort_by(|a, b| a.due.cmp(&b.due).then_with(|| a.title.cmp(&b.title)));
        upcoming.truncate(self.config.max_upcoming_milestones);

        PlanProgress {
            plan_id: Some(plan.id.clone()),
            plan_title: Some(plan.title.clone()),
            days_on_plan,
            daily_calorie_target: plan.daily_calorie_target,
            upcoming_milestones: upcoming,
        }
    }
}

/// Records of `client_id` inside `window`, in `(timestamp, id)` order
fn in_window<'a, T: TimedRecord>(
    records: &'a [T],
    client_id: &ClientId,
    window: &Window,
) -> Vec<&'a T> {
    let mut kept: Vec<&T> = records
        .iter()
        .filter(|record| record.owner() == client_id && window.contains(record.timestamp()))
        .collect();
    kept.sort_by(|a, b| {
        a.timestamp()
            .cmp(&b.timestamp())
            .then_with(|| a.record_id().cmp(b.record_id()))
    });
    kept
}

/// A client-owned, timestamped record
trait TimedRecord {
    fn owner(&self) -> &ClientId;
    fn timestamp(&self) -> DateTime<Utc>;
    fn record_id(&self) -> &RecordId;
}

impl TimedRecord for DietLogEntry {
    fn owner(&self) -> &ClientId {
        &self.client_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.logged_at
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

impl TimedRecord for ActivityEntry {
    fn owner(&self) -> &ClientId {
        &self.client_id
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.started_at
    }

    fn record_id(&self) -> &RecordId {
        &self.id
    }
}

fn adherence(window: &Window, now: DateTime<Utc>, logs: &[&DietLogEntry]) -> AdherenceMetrics {
    let elapsed_days = window.elapsed_days(now);
    let adherent: BTreeSet<usize> = logs
        .iter()
        .filter(|log| log.is_qualifying())
        .filter_map(|log| window.day_index(log.logged_at))
        .filter(|day| *day < elapsed_days)
        .collect();

    let adherent_days = adherent.len();
    let rate = if elapsed_days == 0 {
        0.0
    } else {
        adherent_days as f64 / elapsed_days as f64
    };

    AdherenceMetrics {
        adherent_days,
        elapsed_days,
        rate,
    }
}

fn nutrition(
    logs: &[&DietLogEntry],
    plan: Option<&MealPlan>,
    elapsed_days: usize,
) -> NutritionMetrics {
    let mut metrics = NutritionMetrics {
        log_count: logs.len(),
        logs_by_meal_type: MealType::ALL.iter().map(|meal| (*meal, 0)).collect(),
        ..NutritionMetrics::default()
    };

    for log in logs {
        metrics.calories += log.calories;
        metrics.protein_g += log.protein_g;
        metrics.carbohydrates_g += log.carbohydrates_g;
        metrics.fat_g += log.fat_g;
        *metrics.logs_by_meal_type.entry(log.meal_type).or_insert(0) += 1;
    }

    let daily_target = plan
        .and_then(|plan| plan.daily_calorie_target)
        .filter(|target| *target > 0.0)
        .unwrap_or(0.0);
    metrics.calorie_target = daily_target * elapsed_days as f64;
    metrics.calorie_target_ratio = if metrics.calorie_target > 0.0 {
        metrics.calories / metrics.calorie_target
    } else {
        0.0
    };

    metrics
}

fn activity(activities: &[&ActivityEntry]) -> ActivityMetrics {
    let mut metrics = ActivityMetrics {
        activity_count: activities.len(),
        by_kind: ActivityKind::ALL.iter().map(|kind| (*kind, 0)).collect(),
        ..ActivityMetrics::default()
    };

    for entry in activities {
        metrics.active_minutes += entry.duration_minutes;
        metrics.calories_burned += entry.calories_burned.unwrap_or(0.0);
        metrics.steps += u64::from(entry.steps.unwrap_or(0));
        *metrics.by_kind.entry(entry.kind).or_insert(0) += 1;
    }

    metrics
}

fn series(
    window: &Window,
    logs: &[&DietLogEntry],
    activities: &[&ActivityEntry],
) -> Vec<BucketPoint> {
    let mut points: Vec<BucketPoint> = (0..window.bucket_count)
        .map(|index| BucketPoint {
            start: window.bucket_start(index),
            diet_logs: 0,
            calories: 0.0,
            activities: 0,
            active_minutes: 0.0,
        })
        .collect();

    for log in logs {
        if let Some(point) = window
            .bucket_index(log.logged_at)
            .and_then(|index| points.get_mut(index))
        {
            point.diet_logs += 1;
            point.calories += log.calories;
        }
    }

    for entry in activities {
        if let Some(point) = window
            .bucket_index(entry.started_at)
            .and_then(|index| points.get_mut(index))
        {
            point.activities += 1;
            point.active_minutes += entry.duration_minutes;
        }
    }

    points
}

fn streaks(series: &[BucketPoint], elapsed_buckets: usize) -> StreakMetrics {
    let mut running = 0;
    let mut longest = 0;
    for point in series.iter().take(elapsed_buckets) {
        if point.activities > 0 {
            running += 1;
            longest = longest.max(running);
        } else {
            running = 0;
        }
    }

    StreakMetrics {
        current_streak: running,
        longest_streak: longest,
    }
}
