// ABOUTME: Command implementations for vitalcoach-cli
// ABOUTME: Shared fixture loading, period parsing, and reference time handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod client;
pub mod dashboard;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use vitalcoach::config::ServerConfig;
use vitalcoach::engine::AnalyticsEngine;
use vitalcoach::fixtures::Fixture;
use vitalcoach::source::RecordStore;
use vitalcoach_core::models::ChartPeriod;

/// Arguments shared by every view command
pub struct ViewArgs {
    pub fixture: PathBuf,
    pub period: Option<String>,
    pub now: Option<String>,
}

/// Everything a view command needs, resolved from its arguments
pub struct ViewContext {
    pub store: RecordStore,
    pub engine: AnalyticsEngine,
    pub period: Option<ChartPeriod>,
    pub now: DateTime<Utc>,
}

impl ViewArgs {
    pub fn resolve(&self, config: &ServerConfig) -> Result<ViewContext> {
        let fixture = Fixture::from_path(&self.fixture)?;
        let store = RecordStore::new();
        fixture.load_into(&store);

        let period = match &self.period {
            Some(text) => Some(text.parse::<ChartPeriod>()?),
            None => config.default_period,
        };
        let now = match &self.now {
            Some(text) => DateTime::parse_from_rfc3339(text)
                .map_err(|e| anyhow!("Invalid --now '{text}': {e}"))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };

        Ok(ViewContext {
            store,
            engine: AnalyticsEngine::new(&config.analytics)?,
            period,
            now,
        })
    }
}

pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
