// ABOUTME: Shared test utilities and record builders for integration tests
// ABOUTME: Provides quiet logging setup and helpers for loading records into a store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `vitalcoach`

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Once;
use vitalcoach::source::{Delivery, RecordStore};
use vitalcoach_core::models::{
    ActivityEntry, ActivityKind, Client, ClientId, DietLogEntry, DoctorId, MealPlan, MealType,
    PlanId, PlanMilestone, PlanStatus, RecordId,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// A time in March 2025 (Monday the 3rd starts a week)
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
}

/// Friday afternoon of the week starting 2025-03-03
pub fn friday() -> DateTime<Utc> {
    at(7, 12)
}

pub fn client(id: &str, doctor: &str, name: &str) -> Client {
    Client::new(id, doctor, name)
}

pub fn diet_log(id: &str, client: &str, when: DateTime<Utc>, calories: f64) -> DietLogEntry {
    DietLogEntry {
        id: RecordId::new(id),
        client_id: ClientId::new(client),
        plan_id: None,
        logged_at: when,
        meal_type: MealType::Lunch,
        calories,
        protein_g: 25.0,
        carbohydrates_g: 60.0,
        fat_g: 15.0,
        food_items: Vec::new(),
        followed_plan: None,
    }
}

pub fn activity(id: &str, client: &str, when: DateTime<Utc>, minutes: f64) -> ActivityEntry {
    ActivityEntry {
        id: RecordId::new(id),
        client_id: ClientId::new(client),
        started_at: when,
        kind: ActivityKind::Walk,
        duration_minutes: minutes,
        calories_burned: Some(minutes * 5.0),
        steps: Some(4_000),
    }
}

pub fn plan(id: &str, client: &str, start: DateTime<Utc>, target: f64) -> MealPlan {
    MealPlan {
        id: PlanId::new(id),
        client_id: ClientId::new(client),
        title: "Balanced plate".to_owned(),
        status: PlanStatus::Active,
        start_date: start,
        daily_calorie_target: Some(target),
        macro_targets: None,
        milestones: vec![PlanMilestone {
            title: "First weigh-in".to_owned(),
            due: at(20, 9),
        }],
    }
}

/// Daily qualifying logs of `client` on each of `days` (March 2025)
pub fn daily_logs(client: &str, days: &[u32]) -> Vec<DietLogEntry> {
    days.iter()
        .map(|&day| diet_log(&format!("{client}-log-{day}"), client, at(day, 8), 500.0))
        .collect()
}

/// Deliver a client and all of its record streams
pub fn deliver_client(
    store: &RecordStore,
    client: Client,
    plans: Vec<MealPlan>,
    logs: Vec<DietLogEntry>,
    activities: Vec<ActivityEntry>,
) {
    let id = client.id.clone();
    store.deliver(Delivery::Client {
        id: id.clone(),
        client: Some(client),
    });
    store.deliver(Delivery::MealPlans {
        client_id: id.clone(),
        plans,
    });
    store.deliver(Delivery::DietLogs {
        client_id: id.clone(),
        logs,
    });
    store.deliver(Delivery::Activities {
        client_id: id,
        activities,
    });
}

pub fn deliver_caseload(store: &RecordStore, doctor: &str, clients: &[&str]) {
    store.deliver(Delivery::Caseload {
        doctor_id: DoctorId::new(doctor),
        clients: Some(clients.iter().map(|&id| ClientId::new(id)).collect()),
    });
}

/// Store with doctor `d1` following `c1` (3 of 5 days) and `c2` (every day)
pub fn two_client_store() -> RecordStore {
    let store = RecordStore::new();
    deliver_caseload(&store, "d1", &["c1", "c2"]);
    deliver_client(
        &store,
        client("c1", "d1", "Ana"),
        vec![plan("p1", "c1", at(1, 0), 2_000.0)],
        daily_logs("c1", &[3, 4, 6]),
        vec![activity("c1-a1", "c1", at(4, 18), 30.0)],
    );
    deliver_client(
        &store,
        client("c2", "d1", "Ben"),
        Vec::new(),
        daily_logs("c2", &[3, 4, 5, 6, 7]),
        Vec::new(),
    );
    store
}
