// ABOUTME: JSON fixtures describing doctors, clients, plans, diet logs, and activities
// ABOUTME: Converts a fixture into store deliveries for demos, the CLI, and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Record fixtures
//!
//! A fixture is a flat JSON document. Loading it delivers one snapshot per
//! input key to a [`RecordStore`]: every doctor's caseload, every client, and
//! each client's plans, diet logs, and activities (empty when the fixture has
//! none, so that nothing stays loading).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;
use vitalcoach_core::errors::{AppError, AppResult};
use vitalcoach_core::models::{
    ActivityEntry, Client, ClientId, DietLogEntry, DoctorId, MealPlan,
};

use crate::source::{Delivery, RecordStore};

/// A doctor and their caseload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDoctor {
    /// Doctor identifier
    pub id: DoctorId,
    /// Display name
    pub name: String,
    /// Clients currently in the caseload
    #[serde(default)]
    pub clients: Vec<ClientId>,
}

/// Raw records for a demo or test
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    /// Doctors
    #[serde(default)]
    pub doctors: Vec<FixtureDoctor>,
    /// Clients
    #[serde(default)]
    pub clients: Vec<Client>,
    /// Meal plans of all clients
    #[serde(default)]
    pub meal_plans: Vec<MealPlan>,
    /// Diet logs of all clients
    #[serde(default)]
    pub diet_logs: Vec<DietLogEntry>,
    /// Activities of all clients
    #[serde(default)]
    pub activities: Vec<ActivityEntry>,
}

impl Fixture {
    /// Parse a fixture from JSON text
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the JSON does not describe a fixture
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            AppError::invalid_input(format!("Cannot read fixture {}", path.display()))
                .with_source(e)
        })?;
        Self::from_json(&json)
    }

    /// One delivery per input key, doctors first, then clients in id order
    #[must_use]
    pub fn deliveries(&self) -> Vec<Delivery> {
        let mut deliveries: Vec<Delivery> = self
            .doctors
            .iter()
            .map(|doctor| Delivery::Caseload {
                doctor_id: doctor.id.clone(),
                clients: Some(doctor.clients.clone()),
            })
            .collect();

        let mut per_client: BTreeMap<&ClientId, ClientDeliveries> = BTreeMap::new();
        for client in &self.clients {
            per_client.entry(&client.id).or_default().client = Some(client.clone());
        }
        for plan in &self.meal_plans {
            per_client
                .entry(&plan.client_id)
                .or_default()
                .plans
                .push(plan.clone());
        }
        for log in &self.diet_logs {
            per_client
                .entry(&log.client_id)
                .or_default()
                .logs
                .push(log.clone());
        }
        for activity in &self.activities {
            per_client
                .entry(&activity.client_id)
                .or_default()
                .activities
                .push(activity.clone());
        }

        for (client_id, records) in per_client {
            deliveries.extend(records.into_deliveries(client_id));
        }
        deliveries
    }

    /// Deliver every snapshot of the fixture to `store`
    pub fn load_into(&self, store: &RecordStore) {
        let deliveries = self.deliveries();
        let count = deliveries.len();
        for delivery in deliveries {
            store.deliver(delivery);
        }
        info!(
            doctors = self.doctors.len(),
            clients = self.clients.len(),
            deliveries = count,
            "Fixture loaded"
        );
    }
}

#[derive(Default)]
struct ClientDeliveries {
    client: Option<Client>,
    plans: Vec<MealPlan>,
    logs: Vec<DietLogEntry>,
    activities: Vec<ActivityEntry>,
}

impl ClientDeliveries {
    fn into_deliveries(self, client_id: &ClientId) -> [Delivery; 4] {
        [
            Delivery::Client {
                id: client_id.clone(),
                client: self.client,
            },
            Delivery::MealPlans {
                client_id: client_id.clone(),
                plans: self.plans,
            },
            Delivery::DietLogs {
                client_id: client_id.clone(),
                logs: self.logs,
            },
            Delivery::Activities {
                client_id: client_id.clone(),
                activities: self.activities,
            },
        ]
    }
}
