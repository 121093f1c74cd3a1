// ABOUTME: Client command printing one client's metrics and detail sections
// ABOUTME: Reports missing clients and unresolved inputs as errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use serde_json::json;
use tracing::info;
use vitalcoach::config::ServerConfig;
use vitalcoach::engine::{ClientViewInputs, ViewState};
use vitalcoach::source::RecordSource;
use vitalcoach_core::models::ClientId;
use vitalcoach_intelligence::{evaluate_sections, ClientMetadata, DEFAULT_TABS};

use super::{print_json, ViewArgs};

pub fn show(
    config: &ServerConfig,
    args: &ViewArgs,
    client: &str,
    all_sections: bool,
) -> Result<()> {
    let context = args.resolve(config)?;
    let inputs = ClientViewInputs {
        client_id: ClientId::new(client),
        period: context.period,
        reference_time: context.now,
    };

    let metrics = context
        .engine
        .client_metrics(&context.store, &inputs)?
        .into_result("client", client)?;

    let sections = if all_sections {
        let metadata = context
            .store
            .client(&inputs.client_id)
            .ready()
            .flatten()
            .map(|client| ClientMetadata::from(&client))
            .unwrap_or_default();
        evaluate_sections(&metrics, &metadata, &DEFAULT_TABS)
    } else {
        match context.engine.client_sections(&context.store, &inputs)? {
            ViewState::Ready(sections) => sections,
            ViewState::Loading | ViewState::NotFound => Vec::new(),
        }
    };

    info!(
        client_id = %inputs.client_id,
        sections = sections.len(),
        "Client view computed"
    );
    print_json(&json!({
        "metrics": metrics,
        "sections": sections,
    }))
}
