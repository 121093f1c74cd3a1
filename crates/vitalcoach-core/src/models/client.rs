// ABOUTME: Client and doctor models as delivered by the reactive record store
// ABOUTME: Read-only identity, contact metadata, and coaching relationship
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{ClientId, DoctorId};

/// Coaching lifecycle status of a client
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// Currently coached
    #[default]
    Active,
    /// Coaching temporarily on hold
    Paused,
    /// No longer coached, kept for history
    Archived,
}

/// A coached client
///
/// Owned by the backing store; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    /// Client identifier
    pub id: ClientId,
    /// Doctor responsible for this client
    pub doctor_id: DoctorId,
    /// Display name
    pub name: String,
    /// Contact phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Stated coaching goal ("lose 5 kg", "manage blood sugar")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    /// Allergies, intolerances, or dietary preferences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_notes: Option<String>,
    /// Lifecycle status
    #[serde(default)]
    pub status: ClientStatus,
}

impl Client {
    /// Create a client with only the required fields set
    #[must_use]
    pub fn new(id: impl Into<ClientId>, doctor_id: impl Into<DoctorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            doctor_id: doctor_id.into(),
            name: name.into(),
            phone: None,
            email: None,
            age: None,
            goal: None,
            dietary_notes: None,
            status: ClientStatus::Active,
        }
    }

    /// Whether the client is currently coached
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }
}

/// A doctor or nutritionist with a caseload of clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Doctor {
    /// Doctor identifier
    pub id: DoctorId,
    /// Display name
    pub name: String,
}
