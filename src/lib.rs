// ABOUTME: Main library entry point for the Vitalcoach client progress analytics engine
// ABOUTME: Binds the pure analytics pipeline to a reactive record store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitalcoach
//!
//! Derives dashboard analytics for a nutrition and fitness coaching product
//! from raw client records: per-client progress metrics over a selected chart
//! period, the detail sections of a client page, and a doctor's caseload
//! rollup.
//!
//! ## Architecture
//!
//! - **vitalcoach-core**: record models, identifiers, chart periods, errors
//! - **vitalcoach-intelligence**: windowing, aggregation, sections, rollups
//! - **source**: the record source boundary and an in-memory reactive store
//! - **engine**: the pipeline from a record source to view states
//! - **reactive**: memoized observations that re-run only when their inputs change
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use vitalcoach::engine::{AnalyticsEngine, ClientViewInputs};
//! use vitalcoach::fixtures::Fixture;
//! use vitalcoach::reactive::observe_client_metrics;
//! use vitalcoach::source::RecordStore;
//! use vitalcoach_core::models::{ChartPeriod, ClientId};
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = RecordStore::new();
//! Fixture::from_path("demo.json".as_ref())?.load_into(&store);
//!
//! let inputs = ClientViewInputs {
//!     client_id: ClientId::new("c-001"),
//!     period: Some(ChartPeriod::Week),
//!     reference_time: Utc::now(),
//! };
//! let handle = observe_client_metrics(&store, &AnalyticsEngine::default(), &inputs, |state| {
//!     println!("{state:?}");
//! })?;
//! handle.unsubscribe();
//! # Ok(())
//! # }
//! ```

/// Process configuration loaded from the environment
pub mod config;

/// Analytics pipeline producing view states from a record source
pub mod engine;

/// JSON record fixtures for demos, the CLI, and tests
pub mod fixtures;

/// Structured logging setup
pub mod logging;

/// Memoized observations of derived views
pub mod reactive;

/// Record source boundary and in-memory reactive store
pub mod source;

pub use engine::{AnalyticsEngine, ClientViewInputs, DoctorViewInputs, ViewState};
pub use reactive::{
    observe_client_metrics, observe_client_sections, observe_doctor_dashboard, ObservationHandle,
    Observer,
};
pub use source::{Delivery, InputKey, RecordSource, RecordStore, Revision, SourceSnapshot};
