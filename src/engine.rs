// ABOUTME: Analytics pipeline reading raw records through a record source
// ABOUTME: Produces client metrics, client sections, and doctor dashboards as view states
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analytics Engine
//!
//! Ties the windowing engine, aggregator, section composer, and rollup to a
//! [`RecordSource`]. Data availability is reported as a [`ViewState`], never as
//! an error; only caller bugs (an unknown period, an inverted custom range)
//! surface as `Err`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vitalcoach_core::errors::{AnalyticsError, AppError, AppResult};
use vitalcoach_core::models::{ChartPeriod, ClientId, DoctorId, TimeRange};
use vitalcoach_intelligence::{
    compose_sections, AnalyticsConfig, AnalyticsSnapshot, ClientMetadata, ClientMetrics,
    ClientRecords, ConfigError, DashboardRollup, MetricAggregator, SectionItem, TabDefinition,
    Window, WindowingEngine, DEFAULT_TABS,
};

use crate::source::{RecordSource, SourceSnapshot};

/// Availability of a derived view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum ViewState<T> {
    /// Some input has not been delivered yet
    Loading,
    /// The client or doctor does not exist
    NotFound,
    /// The view is computed
    Ready(T),
}

impl<T> ViewState<T> {
    /// Whether some input is still loading
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The computed view, if ready
    #[must_use]
    pub const fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::NotFound => None,
        }
    }

    /// Transform the computed view
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            Self::Loading => ViewState::Loading,
            Self::NotFound => ViewState::NotFound,
            Self::Ready(value) => ViewState::Ready(f(value)),
        }
    }

    /// The computed view, for callers that cannot wait for missing records
    ///
    /// `entity` and `id` name the client or doctor the view was requested for.
    ///
    /// # Errors
    ///
    /// `NotFound` becomes an unresolved identity and `Loading` a
    /// resource-unavailable error.
    pub fn into_result(self, entity: &'static str, id: &str) -> AppResult<T> {
        match self {
            Self::Ready(value) => Ok(value),
            Self::NotFound => Err(AnalyticsError::UnresolvedIdentity {
                entity,
                id: id.to_owned(),
            }
            .into()),
            Self::Loading => Err(AppError::unavailable(format!(
                "Records of {entity} '{id}' are incomplete"
            ))
            .with_resource_id(id)),
        }
    }
}

/// Inputs of a client view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientViewInputs {
    /// Client to show
    pub client_id: ClientId,
    /// Selected period, `None` for a single day
    pub period: Option<ChartPeriod>,
    /// Reference time ("now")
    pub reference_time: DateTime<Utc>,
}

/// Inputs of a doctor dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorViewInputs {
    /// Doctor whose caseload is summarized
    pub doctor_id: DoctorId,
    /// Selected period, `None` for a single day
    pub period: Option<ChartPeriod>,
    /// Reference time ("now")
    pub reference_time: DateTime<Utc>,
}

/// Pure pipeline from raw records to dashboard views
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    windowing: WindowingEngine,
    aggregator: MetricAggregator,
    rollup: DashboardRollup,
    tabs: &'static [TabDefinition],
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self {
            windowing: WindowingEngine::default(),
            aggregator: MetricAggregator::default(),
            rollup: DashboardRollup::default(),
            tabs: &DEFAULT_TABS,
        }
    }
}

impl AnalyticsEngine {
    /// Build an engine from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the calendar configuration is invalid
    pub fn new(config: &AnalyticsConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            windowing: WindowingEngine::new(config.window.clone())?,
            aggregator: MetricAggregator::new(config.aggregation.clone()),
            rollup: DashboardRollup::new(config.rollup.clone()),
            tabs: &DEFAULT_TABS,
        })
    }

    /// Engine using the process-wide configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the calendar configuration is invalid
    pub fn from_global_config() -> Result<Self, ConfigError> {
        Self::new(AnalyticsConfig::global())
    }

    /// Window for `period` around `reference`
    ///
    /// # Errors
    ///
    /// Returns `MalformedWindow` for an invalid custom range
    pub fn window(
        &self,
        reference: DateTime<Utc>,
        period: Option<ChartPeriod>,
    ) -> Result<Window, AnalyticsError> {
        self.windowing.compute_window(reference, period)
    }

    /// Metrics of one client
    ///
    /// # Errors
    ///
    /// Returns `MalformedWindow` for an invalid custom range
    pub fn client_metrics<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        inputs: &ClientViewInputs,
    ) -> Result<ViewState<ClientMetrics>, AnalyticsError> {
        let window = self.window(inputs.reference_time, inputs.period)?;
        Ok(self.client_metrics_in(source, &inputs.client_id, &window, inputs.reference_time))
    }

    /// Visible sections of one client's detail screen
    ///
    /// # Errors
    ///
    /// Returns `MalformedWindow` for an invalid custom range
    pub fn client_sections<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        inputs: &ClientViewInputs,
    ) -> Result<ViewState<Vec<SectionItem>>, AnalyticsError> {
        let window = self.window(inputs.reference_time, inputs.period)?;
        Ok(self.client_sections_in(source, &inputs.client_id, &window, inputs.reference_time))
    }

    /// Caseload rollup of one doctor
    ///
    /// # Errors
    ///
    /// Returns `MalformedWindow` for an invalid custom range
    pub fn doctor_dashboard<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        inputs: &DoctorViewInputs,
    ) -> Result<ViewState<AnalyticsSnapshot>, AnalyticsError> {
        let window = self.window(inputs.reference_time, inputs.period)?;
        Ok(self.doctor_dashboard_in(source, &inputs.doctor_id, &window, inputs.reference_time))
    }

    /// Metrics of one client over an already computed window
    pub fn client_metrics_in<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        client_id: &ClientId,
        window: &Window,
        now: DateTime<Utc>,
    ) -> ViewState<ClientMetrics> {
        match load_records(source, client_id, window.time_range()) {
            ViewState::Ready(records) => self.aggregate(client_id, window, now, &records),
            ViewState::Loading => ViewState::Loading,
            ViewState::NotFound => ViewState::NotFound,
        }
    }

    /// Visible sections of one client over an already computed window
    pub fn client_sections_in<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        client_id: &ClientId,
        window: &Window,
        now: DateTime<Utc>,
    ) -> ViewState<Vec<SectionItem>> {
        let records = match load_records(source, client_id, window.time_range()) {
            ViewState::Ready(records) => records,
            ViewState::Loading => return ViewState::Loading,
            ViewState::NotFound => return ViewState::NotFound,
        };
        let metadata = records
            .client
            .as_ref()
            .map(ClientMetadata::from)
            .unwrap_or_default();

        self.aggregate(client_id, window, now, &records)
            .map(|metrics| compose_sections(&metrics, &metadata, self.tabs))
    }

    /// Caseload rollup over an already computed window
    ///
    /// Caseload members whose client record does not exist are left out.
    pub fn doctor_dashboard_in<S: RecordSource + ?Sized>(
        &self,
        source: &S,
        doctor_id: &DoctorId,
        window: &Window,
        now: DateTime<Utc>,
    ) -> ViewState<AnalyticsSnapshot> {
        let caseload = match source.caseload(doctor_id) {
            SourceSnapshot::Loading => return ViewState::Loading,
            SourceSnapshot::Ready(None) => return ViewState::NotFound,
            SourceSnapshot::Ready(Some(caseload)) => caseload,
        };

        let prior_window = window.preceding();
        let range = prior_window.time_range().union(&window.time_range());
        let mut members = Vec::with_capacity(caseload.len());
        let mut loading = false;
        for client_id in caseload {
            match load_records(source, &client_id, range) {
                ViewState::Ready(records) => members.push((client_id, records)),
                ViewState::Loading => loading = true,
                ViewState::NotFound => {
                    debug!(doctor_id = %doctor_id, client_id = %client_id, "Caseload member not found");
                }
            }
        }
        if loading {
            return ViewState::Loading;
        }

        let current = ready_metrics(self.aggregator.aggregate_each(window, now, &members));
        let prior = ready_metrics(self.aggregator.aggregate_each(&prior_window, now, &members));
        ViewState::Ready(self.rollup.rollup(doctor_id, window, &current, &prior))
    }

    fn aggregate(
        &self,
        client_id: &ClientId,
        window: &Window,
        now: DateTime<Utc>,
        records: &ClientRecords,
    ) -> ViewState<ClientMetrics> {
        self.aggregator
            .aggregate(client_id, window, now, records)
            .map_or(ViewState::NotFound, ViewState::Ready)
    }
}

fn ready_metrics(results: Vec<Result<ClientMetrics, AnalyticsError>>) -> Vec<ClientMetrics> {
    results.into_iter().filter_map(Result::ok).collect()
}

/// Read every record stream of a client
///
/// Reading stops at the client record when it is loading or missing, so the
/// caller depends only on that key until the client exists.
fn load_records<S: RecordSource + ?Sized>(
    source: &S,
    client_id: &ClientId,
    range: TimeRange,
) -> ViewState<ClientRecords> {
    let client = match source.client(client_id) {
        SourceSnapshot::Loading => return ViewState::Loading,
        SourceSnapshot::Ready(None) => return ViewState::NotFound,
        SourceSnapshot::Ready(Some(client)) => client,
    };

    let meal_plans = source.meal_plans(client_id);
    let diet_logs = source.diet_logs(client_id, Some(range));
    let activities = source.activities(client_id, Some(range));

    match (meal_plans, diet_logs, activities) {
        (
            SourceSnapshot::Ready(meal_plans),
            SourceSnapshot::Ready(diet_logs),
            SourceSnapshot::Ready(activities),
        ) => ViewState::Ready(ClientRecords {
            client: Some(client),
            meal_plans,
            diet_logs,
            activities,
        }),
        _ => ViewState::Loading,
    }
}
