// ABOUTME: Dashboard command printing a doctor's caseload rollup
// ABOUTME: Reports unknown doctors and incomplete caseloads as errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use tracing::info;
use vitalcoach::config::ServerConfig;
use vitalcoach::engine::DoctorViewInputs;
use vitalcoach_core::models::DoctorId;

use super::{print_json, ViewArgs};

pub fn show(config: &ServerConfig, args: &ViewArgs, doctor: &str) -> Result<()> {
    let context = args.resolve(config)?;
    let inputs = DoctorViewInputs {
        doctor_id: DoctorId::new(doctor),
        period: context.period,
        reference_time: context.now,
    };

    let snapshot = context
        .engine
        .doctor_dashboard(&context.store, &inputs)?
        .into_result("doctor", doctor)?;

    info!(
        doctor_id = %inputs.doctor_id,
        clients = snapshot.total_clients,
        reporting = snapshot.reporting_clients,
        "Dashboard computed"
    );
    print_json(&snapshot)
}
