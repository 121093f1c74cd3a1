// ABOUTME: Reactive binding layer exposing live, memoized analytics views
// ABOUTME: Observations of client metrics, client sections, and doctor dashboards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Reactive Binding Layer
//!
//! An observation computes its view once when created, emits it, and then
//! listens to the [`RecordStore`]. When a snapshot it read changes revision the
//! view is recomputed; a result structurally equal to the last one is not
//! emitted again. The caller owns the returned [`ObservationHandle`], and
//! dropping it ends the observation.
//!
//! The window is computed once from the explicit inputs when the observation
//! starts, so an invalid period is reported immediately and recomputations
//! cannot fail.

mod observation;

pub use observation::ObservationHandle;

use std::rc::Rc;
use vitalcoach_core::errors::AnalyticsError;
use vitalcoach_intelligence::{AnalyticsSnapshot, ClientMetrics, SectionItem};

use crate::engine::{AnalyticsEngine, ClientViewInputs, DoctorViewInputs, ViewState};
use crate::source::{InputKey, RecordSource, RecordStore};
use observation::ObservationCell;

/// Something the record store notifies when a snapshot changes
pub trait Observer {
    /// `changed` received a structurally different snapshot
    fn notify(&self, changed: &InputKey);
}

/// Observe the metrics of one client
///
/// # Errors
///
/// Returns `MalformedWindow` when the inputs name an invalid custom range
pub fn observe_client_metrics(
    store: &RecordStore,
    engine: &AnalyticsEngine,
    inputs: &ClientViewInputs,
    listener: impl FnMut(&Rc<ViewState<ClientMetrics>>) + 'static,
) -> Result<ObservationHandle<ClientMetrics>, AnalyticsError> {
    let window = engine.window(inputs.reference_time, inputs.period)?;
    let engine = engine.clone();
    let client_id = inputs.client_id.clone();
    let now = inputs.reference_time;

    let cell = ObservationCell::start(
        "client_metrics",
        store,
        Box::new(move |source: &dyn RecordSource| {
            engine.client_metrics_in(source, &client_id, &window, now)
        }),
        Box::new(listener),
    );
    Ok(ObservationHandle::new(cell))
}

/// Observe the visible sections of one client's detail screen
///
/// # Errors
///
/// Returns `MalformedWindow` when the inputs name an invalid custom range
pub fn observe_client_sections(
    store: &RecordStore,
    engine: &AnalyticsEngine,
    inputs: &ClientViewInputs,
    listener: impl FnMut(&Rc<ViewState<Vec<SectionItem>>>) + 'static,
) -> Result<ObservationHandle<Vec<SectionItem>>, AnalyticsError> {
    let window = engine.window(inputs.reference_time, inputs.period)?;
    let engine = engine.clone();
    let client_id = inputs.client_id.clone();
    let now = inputs.reference_time;

    let cell = ObservationCell::start(
        "client_sections",
        store,
        Box::new(move |source: &dyn RecordSource| {
            engine.client_sections_in(source, &client_id, &window, now)
        }),
        Box::new(listener),
    );
    Ok(ObservationHandle::new(cell))
}

/// Observe a doctor's caseload rollup
///
/// The observation depends on the caseload and on every record stream of the
/// clients it contained at the last computation.
///
/// # Errors
///
/// Returns `MalformedWindow` when the inputs name an invalid custom range
pub fn observe_doctor_dashboard(
    store: &RecordStore,
    engine: &AnalyticsEngine,
    inputs: &DoctorViewInputs,
    listener: impl FnMut(&Rc<ViewState<AnalyticsSnapshot>>) + 'static,
) -> Result<ObservationHandle<AnalyticsSnapshot>, AnalyticsError> {
    let window = engine.window(inputs.reference_time, inputs.period)?;
    let engine = engine.clone();
    let doctor_id = inputs.doctor_id.clone();
    let now = inputs.reference_time;

    let cell = ObservationCell::start(
        "doctor_dashboard",
        store,
        Box::new(move |source: &dyn RecordSource| {
            engine.doctor_dashboard_in(source, &doctor_id, &window, now)
        }),
        Box::new(listener),
    );
    Ok(ObservationHandle::new(cell))
}
