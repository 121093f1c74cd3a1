// ABOUTME: Integration tests for the analytics pipeline over a record store
// ABOUTME: Covers windows, client metrics, detail sections, and caseload rollups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::float_cmp, missing_docs)]

mod common;

use chrono::{Duration, Weekday};
use common::{
    activity, at, client, daily_logs, deliver_caseload, deliver_client, diet_log, friday,
    init_test_logging, plan, two_client_store,
};
use vitalcoach::engine::{AnalyticsEngine, ClientViewInputs, DoctorViewInputs, ViewState};
use vitalcoach::source::{Delivery, RecordStore};
use vitalcoach_core::errors::{AnalyticsError, ErrorCode};
use vitalcoach_core::models::{ChartPeriod, ClientId, DoctorId};
use vitalcoach_intelligence::{
    AnalyticsConfig, BucketSize, ClientRecords, MetricAggregator, SectionKind, WindowConfig,
    WindowingEngine,
};

fn client_inputs(id: &str, period: Option<ChartPeriod>) -> ClientViewInputs {
    ClientViewInputs {
        client_id: ClientId::new(id),
        period,
        reference_time: friday(),
    }
}

fn doctor_inputs(id: &str) -> DoctorViewInputs {
    DoctorViewInputs {
        doctor_id: DoctorId::new(id),
        period: Some(ChartPeriod::Week),
        reference_time: friday(),
    }
}

#[test]
fn test_day_window_is_hourly_and_contains_reference() {
    let window = AnalyticsEngine::default().window(friday(), None).unwrap();

    assert_eq!(window.period, ChartPeriod::Day);
    assert_eq!(window.start, at(7, 0));
    assert_eq!(window.end, at(8, 0));
    assert_eq!(window.bucket_size, BucketSize::Hour);
    assert_eq!(window.bucket_count, 24);
    assert!(window.contains(friday()));
}

#[test]
fn test_week_and_month_windows_have_daily_buckets() {
    let engine = AnalyticsEngine::default();

    let week = engine.window(friday(), Some(ChartPeriod::Week)).unwrap();
    assert_eq!(week.start, at(3, 0));
    assert_eq!(week.end - week.start, Duration::days(7));
    assert_eq!(week.bucket_count, 7);

    let month = engine.window(friday(), Some(ChartPeriod::Month)).unwrap();
    assert_eq!(month.start, at(1, 0));
    assert_eq!(month.bucket_count, 31);
    assert_eq!(month.bucket_size, BucketSize::Day);
}

#[test]
fn test_week_start_follows_configuration() {
    let windowing = WindowingEngine::new(WindowConfig {
        first_day_of_week: Weekday::Sun,
        utc_offset_minutes: 0,
    })
    .unwrap();

    let week = windowing
        .compute_window(friday(), Some(ChartPeriod::Week))
        .unwrap();
    assert_eq!(week.start, at(2, 0));
}

#[test]
fn test_boundary_timestamp_belongs_to_later_bucket() {
    let week = AnalyticsEngine::default()
        .window(friday(), Some(ChartPeriod::Week))
        .unwrap();

    assert_eq!(week.bucket_index(at(4, 0)), Some(1));
    assert_eq!(week.bucket_index(at(10, 0)), None);
}

#[test]
fn test_inverted_custom_range_is_rejected() {
    let period = ChartPeriod::Custom {
        start: at(10, 0),
        end: at(3, 0),
    };
    let err = AnalyticsEngine::default()
        .client_metrics(&RecordStore::new(), &client_inputs("c1", Some(period)))
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::MalformedWindow { .. }));
}

#[test]
fn test_unknown_period_text_is_rejected() {
    let err = "fortnight".parse::<ChartPeriod>().unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidPeriod { .. }));
}

#[test]
fn test_adherence_three_of_five_elapsed_days() {
    init_test_logging();
    let store = two_client_store();

    let state = AnalyticsEngine::default()
        .client_metrics(&store, &client_inputs("c1", Some(ChartPeriod::Week)))
        .unwrap();
    let metrics = state.as_ready().unwrap();

    assert_eq!(metrics.adherence.adherent_days, 3);
    assert_eq!(metrics.adherence.elapsed_days, 5);
    assert!((metrics.adherence.rate - 0.6).abs() < 1e-9);
    assert_eq!(metrics.nutrition.log_count, 3);
    assert_eq!(metrics.activity.activity_count, 1);
    assert_eq!(metrics.series.len(), 7);
    assert_eq!(metrics.streaks.longest_streak, 1);
    assert_eq!(metrics.streaks.current_streak, 0);
}

#[test]
fn test_metrics_ignore_record_order() {
    let week = AnalyticsEngine::default()
        .window(friday(), Some(ChartPeriod::Week))
        .unwrap();
    let mut records = ClientRecords {
        client: Some(client("c1", "d1", "Ana")),
        meal_plans: vec![plan("p1", "c1", at(1, 0), 1_800.0)],
        diet_logs: daily_logs("c1", &[3, 4, 5, 6]),
        activities: vec![
            activity("a1", "c1", at(3, 7), 20.0),
            activity("a2", "c1", at(5, 19), 45.0),
        ],
    };
    let aggregator = MetricAggregator::default();
    let id = ClientId::new("c1");

    let forward = aggregator.aggregate(&id, &week, friday(), &records).unwrap();
    records.diet_logs.reverse();
    records.activities.reverse();
    let backward = aggregator.aggregate(&id, &week, friday(), &records).unwrap();

    assert_eq!(forward, backward);
}

#[test]
fn test_records_outside_window_are_ignored() {
    let store = RecordStore::new();
    let mut logs = daily_logs("c1", &[3, 4]);
    logs.extend(daily_logs("c1", &[1, 12]));
    deliver_client(&store, client("c1", "d1", "Ana"), Vec::new(), logs, Vec::new());

    let state = AnalyticsEngine::default()
        .client_metrics(&store, &client_inputs("c1", Some(ChartPeriod::Week)))
        .unwrap();
    assert_eq!(state.as_ready().unwrap().nutrition.log_count, 2);
}

#[test]
fn test_client_view_is_loading_until_every_stream_arrives() {
    let store = RecordStore::new();
    let engine = AnalyticsEngine::default();
    let inputs = client_inputs("c1", None);

    assert!(engine.client_metrics(&store, &inputs).unwrap().is_loading());

    store.deliver(Delivery::Client {
        id: ClientId::new("c1"),
        client: Some(client("c1", "d1", "Ana")),
    });
    store.deliver(Delivery::MealPlans {
        client_id: ClientId::new("c1"),
        plans: Vec::new(),
    });
    assert!(engine.client_metrics(&store, &inputs).unwrap().is_loading());

    store.deliver(Delivery::DietLogs {
        client_id: ClientId::new("c1"),
        logs: Vec::new(),
    });
    store.deliver(Delivery::Activities {
        client_id: ClientId::new("c1"),
        activities: Vec::new(),
    });
    assert!(matches!(
        engine.client_metrics(&store, &inputs).unwrap(),
        ViewState::Ready(_)
    ));
}

#[test]
fn test_missing_client_is_not_found() {
    let store = RecordStore::new();
    store.deliver(Delivery::Client {
        id: ClientId::new("ghost"),
        client: None,
    });

    let engine = AnalyticsEngine::default();
    let inputs = client_inputs("ghost", None);
    assert_eq!(
        engine.client_metrics(&store, &inputs).unwrap(),
        ViewState::NotFound
    );
    assert_eq!(
        engine.client_sections(&store, &inputs).unwrap(),
        ViewState::NotFound
    );
}

#[test]
fn test_sections_follow_catalog_order_and_skip_empty_tabs() {
    let store = two_client_store();
    let engine = AnalyticsEngine::default();

    let c1 = engine
        .client_sections(&store, &client_inputs("c1", Some(ChartPeriod::Week)))
        .unwrap();
    let kinds: Vec<SectionKind> = c1.as_ready().unwrap().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Adherence,
            SectionKind::Nutrition,
            SectionKind::Activity,
            SectionKind::Streaks,
            SectionKind::MealPlan,
            SectionKind::Milestones,
        ]
    );

    let c2 = engine
        .client_sections(&store, &client_inputs("c2", Some(ChartPeriod::Week)))
        .unwrap();
    let kinds: Vec<SectionKind> = c2.as_ready().unwrap().iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![SectionKind::Adherence, SectionKind::Nutrition]
    );
    assert!(c2.as_ready().unwrap().iter().all(|s| s.visible));
}

#[test]
fn test_client_without_records_has_no_sections() {
    let store = RecordStore::new();
    deliver_client(&store, client("c4", "d1", "Dana"), Vec::new(), Vec::new(), Vec::new());

    let sections = AnalyticsEngine::default()
        .client_sections(&store, &client_inputs("c4", Some(ChartPeriod::Week)))
        .unwrap();
    assert_eq!(sections, ViewState::Ready(Vec::new()));
}

#[test]
fn test_view_state_into_result_reports_identity() {
    let store = RecordStore::new();
    store.deliver(Delivery::Client {
        id: ClientId::new("ghost"),
        client: None,
    });
    let engine = AnalyticsEngine::default();

    let missing = engine
        .client_metrics(&store, &client_inputs("ghost", None))
        .unwrap()
        .into_result("client", "ghost")
        .unwrap_err();
    assert_eq!(missing.code, ErrorCode::ResourceNotFound);
    assert_eq!(missing.context.resource_id.as_deref(), Some("ghost"));
    assert!(missing.message.contains("client 'ghost'"));

    let pending = engine
        .client_metrics(&store, &client_inputs("later", None))
        .unwrap()
        .into_result("client", "later")
        .unwrap_err();
    assert_eq!(pending.code, ErrorCode::ResourceUnavailable);
    assert_eq!(pending.context.resource_id.as_deref(), Some("later"));
}

#[test]
fn test_profile_section_needs_contact_details() {
    let store = RecordStore::new();
    let mut detailed = client("c3", "d1", "Cleo");
    detailed.email = Some("cleo@example.com".to_owned());
    deliver_client(&store, detailed, Vec::new(), Vec::new(), Vec::new());

    let sections = AnalyticsEngine::default()
        .client_sections(&store, &client_inputs("c3", None))
        .unwrap();
    let first = &sections.as_ready().unwrap()[0];
    assert_eq!(first.kind, SectionKind::Profile);
    assert_eq!(first.title, "Profile");
}

#[test]
fn test_dashboard_averages_reporting_clients() {
    init_test_logging();
    let store = two_client_store();

    let state = AnalyticsEngine::default()
        .doctor_dashboard(&store, &doctor_inputs("d1"))
        .unwrap();
    let snapshot = state.as_ready().unwrap();

    assert_eq!(snapshot.total_clients, 2);
    assert_eq!(snapshot.active_clients, 2);
    assert_eq!(snapshot.reporting_clients, 2);
    assert_eq!(snapshot.total_diet_logs, 8);
    assert_eq!(snapshot.total_activities, 1);
    assert!((snapshot.average_adherence.unwrap() - 0.8).abs() < 1e-9);
    assert!((snapshot.average_activity_count.unwrap() - 0.5).abs() < 1e-9);
    assert!(snapshot.attention_list.is_empty());
}

#[test]
fn test_silent_client_does_not_dilute_average_adherence() {
    let store = RecordStore::new();
    deliver_caseload(&store, "d2", &["a", "b"]);
    // Four of the five elapsed days logged
    deliver_client(
        &store,
        client("a", "d2", "Ana"),
        Vec::new(),
        daily_logs("a", &[3, 4, 5, 6]),
        Vec::new(),
    );
    deliver_client(&store, client("b", "d2", "Ben"), Vec::new(), Vec::new(), Vec::new());

    let state = AnalyticsEngine::default()
        .doctor_dashboard(&store, &doctor_inputs("d2"))
        .unwrap();
    let snapshot = state.as_ready().unwrap();

    assert_eq!(snapshot.total_clients, 2);
    assert_eq!(snapshot.reporting_clients, 1);
    assert!((snapshot.average_adherence.unwrap() - 0.8).abs() < 1e-9);
}

#[test]
fn test_trend_is_undefined_without_prior_data() {
    let store = two_client_store();

    let state = AnalyticsEngine::default()
        .doctor_dashboard(&store, &doctor_inputs("d1"))
        .unwrap();
    let trends = &state.as_ready().unwrap().trends;

    assert_eq!(trends.reporting_clients.prior, Some(0.0));
    assert_eq!(trends.reporting_clients.delta, None);
    assert_eq!(trends.average_adherence.prior, None);
    assert_eq!(trends.average_adherence.delta, None);
}

#[test]
fn test_trend_compares_with_preceding_window() {
    let store = RecordStore::new();
    deliver_caseload(&store, "d1", &["c1"]);
    let mut logs = daily_logs("c1", &[3, 4, 5, 6, 7]);
    // Previous week: every day through Sunday the 2nd
    logs.extend((0..7).map(|day| {
        let when = at(3, 8) - Duration::days(7 - day);
        diet_log(&format!("prior-{day}"), "c1", when, 400.0)
    }));
    deliver_client(&store, client("c1", "d1", "Ana"), Vec::new(), logs, Vec::new());

    let state = AnalyticsEngine::default()
        .doctor_dashboard(&store, &doctor_inputs("d1"))
        .unwrap();
    let trend = &state.as_ready().unwrap().trends.average_adherence;

    assert_eq!(trend.current, Some(1.0));
    assert_eq!(trend.prior, Some(1.0));
    assert_eq!(trend.delta, Some(0.0));
}

#[test]
fn test_attention_list_uses_configured_threshold() {
    let store = two_client_store();
    let mut config = AnalyticsConfig::default();
    config.rollup.low_adherence_threshold = 0.7;

    let engine = AnalyticsEngine::new(&config).unwrap();
    let state = engine.doctor_dashboard(&store, &doctor_inputs("d1")).unwrap();
    let attention = &state.as_ready().unwrap().attention_list;

    assert_eq!(attention.len(), 1);
    assert_eq!(attention[0].client_id, ClientId::new("c1"));
    assert_eq!(attention[0].client_name, "Ana");
}

#[test]
fn test_dashboard_skips_missing_members_and_reports_unknown_doctor() {
    let store = two_client_store();
    deliver_caseload(&store, "d1", &["c1", "c2", "gone"]);
    store.deliver(Delivery::Client {
        id: ClientId::new("gone"),
        client: None,
    });
    store.deliver(Delivery::Caseload {
        doctor_id: DoctorId::new("nobody"),
        clients: None,
    });
    let engine = AnalyticsEngine::default();

    let state = engine.doctor_dashboard(&store, &doctor_inputs("d1")).unwrap();
    assert_eq!(state.as_ready().unwrap().total_clients, 2);

    assert_eq!(
        engine.doctor_dashboard(&store, &doctor_inputs("nobody")).unwrap(),
        ViewState::NotFound
    );
}

#[test]
fn test_dashboard_is_loading_while_a_member_is_loading() {
    let store = two_client_store();
    deliver_caseload(&store, "d1", &["c1", "c2", "c9"]);

    let state = AnalyticsEngine::default()
        .doctor_dashboard(&store, &doctor_inputs("d1"))
        .unwrap();
    assert!(state.is_loading());
}
