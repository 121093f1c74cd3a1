// ABOUTME: Criterion benchmarks for the client analytics pipeline
// ABOUTME: Measures per-client aggregation, caseload rollup, and reactive recomputation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the analytics pipeline.
//!
//! Measures aggregation of synthetic client records over a month window, the
//! doctor caseload rollup, and a full recompute through a live observation.

#![allow(clippy::panic, missing_docs)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vitalcoach::engine::{AnalyticsEngine, DoctorViewInputs};
use vitalcoach::reactive::observe_doctor_dashboard;
use vitalcoach::source::{Delivery, RecordStore};
use vitalcoach_core::models::{
    ActivityEntry, ActivityKind, ChartPeriod, Client, ClientId, DietLogEntry, DoctorId, MealType,
    RecordId,
};
use vitalcoach_intelligence::{ClientRecords, DashboardRollup, MetricAggregator, Window};

/// Caseload sizes exercised by the scaling benchmarks
const CASELOAD_SIZES: [usize; 3] = [10, 100, 500];

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn month_window() -> Window {
    AnalyticsEngine::default()
        .window(reference_time(), Some(ChartPeriod::Month))
        .unwrap_or_else(|e| panic!("month window: {e}"))
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
fn generate_records(index: usize) -> (ClientId, ClientRecords) {
    let id = ClientId::new(format!("c{index:04}"));
    let start = reference_time() - Duration::days(45);

    let diet_logs = (0..90)
        .filter(|n| (n + index) % 7 != 0)
        .map(|n| DietLogEntry {
            id: RecordId::new(format!("{id}-l{n}")),
            client_id: id.clone(),
            plan_id: None,
            logged_at: start + Duration::hours(n as i64 * 12),
            meal_type: if n % 2 == 0 { MealType::Breakfast } else { MealType::Dinner },
            calories: 350.0 + (n % 5) as f64 * 50.0,
            protein_g: 20.0,
            carbohydrates_g: 45.0,
            fat_g: 12.0,
            food_items: Vec::new(),
            followed_plan: Some(n % 11 != 0),
        })
        .collect();

    let activities = (0..30)
        .filter(|n| (n + index) % 3 != 0)
        .map(|n| ActivityEntry {
            id: RecordId::new(format!("{id}-a{n}")),
            client_id: id.clone(),
            started_at: start + Duration::days(n as i64) + Duration::hours(18),
            kind: ActivityKind::ALL[n % ActivityKind::ALL.len()],
            duration_minutes: 20.0 + (n % 4) as f64 * 10.0,
            calories_burned: Some(180.0),
            steps: None,
        })
        .collect();

    let records = ClientRecords {
        client: Some(Client::new(id.clone(), "d1", format!("Client {index}"))),
        meal_plans: Vec::new(),
        diet_logs,
        activities,
    };
    (id, records)
}

fn generate_caseload(size: usize) -> Vec<(ClientId, ClientRecords)> {
    (0..size).map(generate_records).collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let window = month_window();
    let aggregator = MetricAggregator::default();
    let (id, records) = generate_records(1);

    c.bench_function("aggregate_single_client_month", |b| {
        b.iter(|| {
            aggregator.aggregate(
                black_box(&id),
                black_box(&window),
                reference_time(),
                black_box(&records),
            )
        });
    });
}

fn bench_aggregate_many(c: &mut Criterion) {
    let window = month_window();
    let aggregator = MetricAggregator::default();
    let mut group = c.benchmark_group("aggregate_many");

    for size in CASELOAD_SIZES {
        let caseload = generate_caseload(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &caseload, |b, caseload| {
            b.iter(|| aggregator.aggregate_many(&window, reference_time(), black_box(caseload)));
        });
    }
    group.finish();
}

fn bench_rollup(c: &mut Criterion) {
    let window = month_window();
    let prior_window = window.preceding();
    let aggregator = MetricAggregator::default();
    let rollup = DashboardRollup::default();
    let doctor = DoctorId::new("d1");
    let mut group = c.benchmark_group("rollup");

    for size in CASELOAD_SIZES {
        let caseload = generate_caseload(size);
        let current: Vec<_> = aggregator
            .aggregate_many(&window, reference_time(), &caseload)
            .into_iter()
            .filter_map(Result::ok)
            .collect();
        let prior: Vec<_> = aggregator
            .aggregate_many(&prior_window, reference_time(), &caseload)
            .into_iter()
            .filter_map(Result::ok)
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| rollup.rollup(&doctor, &window, black_box(&current), black_box(&prior)));
        });
    }
    group.finish();
}

fn bench_reactive_recompute(c: &mut Criterion) {
    let store = RecordStore::new();
    let caseload = generate_caseload(100);
    store.deliver(Delivery::Caseload {
        doctor_id: DoctorId::new("d1"),
        clients: Some(caseload.iter().map(|(id, _)| id.clone()).collect()),
    });
    for (id, records) in &caseload {
        store.deliver(Delivery::Client {
            id: id.clone(),
            client: records.client.clone(),
        });
        store.deliver(Delivery::MealPlans {
            client_id: id.clone(),
            plans: Vec::new(),
        });
        store.deliver(Delivery::DietLogs {
            client_id: id.clone(),
            logs: records.diet_logs.clone(),
        });
        store.deliver(Delivery::Activities {
            client_id: id.clone(),
            activities: records.activities.clone(),
        });
    }

    let inputs = DoctorViewInputs {
        doctor_id: DoctorId::new("d1"),
        period: Some(ChartPeriod::Month),
        reference_time: reference_time(),
    };
    let _handle = observe_doctor_dashboard(&store, &AnalyticsEngine::default(), &inputs, |_| {})
        .unwrap_or_else(|e| panic!("observe dashboard: {e}"));

    let (first_id, first_records) = &caseload[0];
    let mut toggle = false;
    c.bench_function("dashboard_recompute_100_clients", |b| {
        b.iter(|| {
            toggle = !toggle;
            let logs = if toggle {
                first_records.diet_logs[1..].to_vec()
            } else {
                first_records.diet_logs.clone()
            };
            store.deliver(Delivery::DietLogs {
                client_id: first_id.clone(),
                logs,
            });
        });
    });
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_aggregate_many,
    bench_rollup,
    bench_reactive_recompute
);
criterion_main!(benches);
