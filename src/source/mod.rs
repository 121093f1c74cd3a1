// ABOUTME: Raw record source boundary between the analytics engine and the reactive store
// ABOUTME: Snapshot states, input keys, revisions, and read tracking for dependency capture
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Record Source
//!
//! The engine never talks to the backing store directly. It reads through the
//! [`RecordSource`] trait, whose every query answers with a [`SourceSnapshot`]:
//! either the data has arrived or it is still loading.
//!
//! Each query is keyed by an [`InputKey`] and each key carries a [`Revision`]
//! that changes whenever a structurally different snapshot is delivered for
//! it. Wrapping a source in a [`TrackingSource`] records which keys a
//! computation read and at which revision, which is all an observation needs
//! to decide later whether recomputing could change anything.

mod store;

pub use store::RecordStore;

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use vitalcoach_core::models::{
    ActivityEntry, Client, ClientId, DietLogEntry, DoctorId, MealPlan, TimeRange,
};

/// State of one query against the record source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum SourceSnapshot<T> {
    /// Nothing delivered yet
    Loading,
    /// Delivered value
    Ready(T),
}

impl<T> SourceSnapshot<T> {
    /// Whether the query is still loading
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The delivered value, if any
    #[must_use]
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Loading => None,
            Self::Ready(value) => Some(value),
        }
    }

    /// Transform the delivered value
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SourceSnapshot<U> {
        match self {
            Self::Loading => SourceSnapshot::Loading,
            Self::Ready(value) => SourceSnapshot::Ready(f(value)),
        }
    }
}

/// Identifies one query of the record source
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum InputKey {
    /// A client record
    Client(ClientId),
    /// A doctor's caseload
    Caseload(DoctorId),
    /// A client's meal plans
    MealPlans(ClientId),
    /// A client's diet logs
    DietLogs(ClientId),
    /// A client's activities
    Activities(ClientId),
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Client(id) => write!(f, "client/{id}"),
            Self::Caseload(id) => write!(f, "caseload/{id}"),
            Self::MealPlans(id) => write!(f, "meal_plans/{id}"),
            Self::DietLogs(id) => write!(f, "diet_logs/{id}"),
            Self::Activities(id) => write!(f, "activities/{id}"),
        }
    }
}

/// Change stamp of an input key; 0 means never delivered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Revision(pub u64);

impl Revision {
    /// Stamp of a key that was never delivered
    pub const NEVER: Self = Self(0);
}

/// A snapshot pushed by the backing store for one key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delivery {
    /// Client record, `None` when the client does not exist
    Client {
        /// Client identifier
        id: ClientId,
        /// Client record
        client: Option<Client>,
    },
    /// Doctor caseload, `None` when the doctor does not exist
    Caseload {
        /// Doctor identifier
        doctor_id: DoctorId,
        /// Client identifiers in the caseload
        clients: Option<Vec<ClientId>>,
    },
    /// All meal plans of a client
    MealPlans {
        /// Owning client
        client_id: ClientId,
        /// Plans
        plans: Vec<MealPlan>,
    },
    /// All diet logs of a client
    DietLogs {
        /// Owning client
        client_id: ClientId,
        /// Logs
        logs: Vec<DietLogEntry>,
    },
    /// All activities of a client
    Activities {
        /// Owning client
        client_id: ClientId,
        /// Activities
        activities: Vec<ActivityEntry>,
    },
}

impl Delivery {
    /// Key this delivery replaces the snapshot of
    #[must_use]
    pub fn key(&self) -> InputKey {
        match self {
            Self::Client { id, .. } => InputKey::Client(id.clone()),
            Self::Caseload { doctor_id, .. } => InputKey::Caseload(doctor_id.clone()),
            Self::MealPlans { client_id, .. } => InputKey::MealPlans(client_id.clone()),
            Self::DietLogs { client_id, .. } => InputKey::DietLogs(client_id.clone()),
            Self::Activities { client_id, .. } => InputKey::Activities(client_id.clone()),
        }
    }
}

/// Read access to raw records
///
/// Keys never delivered read as [`SourceSnapshot::Loading`].
pub trait RecordSource {
    /// Client record; `Ready(None)` when the client does not exist
    fn client(&self, id: &ClientId) -> SourceSnapshot<Option<Client>>;

    /// Doctor's current caseload; `Ready(None)` when the doctor does not exist
    fn caseload(&self, doctor_id: &DoctorId) -> SourceSnapshot<Option<Vec<ClientId>>>;

    /// Client's meal plans
    fn meal_plans(&self, client_id: &ClientId) -> SourceSnapshot<Vec<MealPlan>>;

    /// Client's diet logs, restricted to `range` when given
    fn diet_logs(
        &self,
        client_id: &ClientId,
        range: Option<TimeRange>,
    ) -> SourceSnapshot<Vec<DietLogEntry>>;

    /// Client's activities, restricted to `range` when given
    fn activities(
        &self,
        client_id: &ClientId,
        range: Option<TimeRange>,
    ) -> SourceSnapshot<Vec<ActivityEntry>>;

    /// Current revision of `key`
    fn revision(&self, key: &InputKey) -> Revision;
}

/// Input keys read by a computation and the revision each had when read
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    reads: BTreeMap<InputKey, Revision>,
}

impl Dependencies {
    /// Whether `key` was read
    #[must_use]
    pub fn contains(&self, key: &InputKey) -> bool {
        self.reads.contains_key(key)
    }

    /// Whether every key read still has the revision it had when read
    #[must_use]
    pub fn is_current(&self, source: &dyn RecordSource) -> bool {
        self.reads
            .iter()
            .all(|(key, revision)| source.revision(key) == *revision)
    }

    /// Keys read, in key order
    pub fn keys(&self) -> impl Iterator<Item = &InputKey> {
        self.reads.keys()
    }

    /// Number of keys read
    #[must_use]
    pub fn len(&self) -> usize {
        self.reads.len()
    }

    /// Whether nothing was read
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }
}

/// A [`RecordSource`] wrapper recording every key read through it
pub struct TrackingSource<'a> {
    inner: &'a dyn RecordSource,
    reads: RefCell<BTreeMap<InputKey, Revision>>,
}

impl<'a> TrackingSource<'a> {
    /// Start tracking reads against `inner`
    #[must_use]
    pub fn new(inner: &'a dyn RecordSource) -> Self {
        Self {
            inner,
            reads: RefCell::new(BTreeMap::new()),
        }
    }

    /// Finish tracking and return what was read
    #[must_use]
    pub fn into_dependencies(self) -> Dependencies {
        Dependencies {
            reads: self.reads.into_inner(),
        }
    }

    fn record(&self, key: InputKey) {
        let revision = self.inner.revision(&key);
        self.reads.borrow_mut().entry(key).or_insert(revision);
    }
}

impl RecordSource for TrackingSource<'_> {
    fn client(&self, id: &ClientId) -> SourceSnapshot<Option<Client>> {
        self.record(InputKey::Client(id.clone()));
        self.inner.client(id)
    }

    fn caseload(&self, doctor_id: &DoctorId) -> SourceSnapshot<Option<Vec<ClientId>>> {
        self.record(InputKey::Caseload(doctor_id.clone()));
        self.inner.caseload(doctor_id)
    }

    fn meal_plans(&self, client_id: &ClientId) -> SourceSnapshot<Vec<MealPlan>> {
        self.record(InputKey::MealPlans(client_id.clone()));
        self.inner.meal_plans(client_id)
    }

    fn diet_logs(
        &self,
        client_id: &ClientId,
        range: Option<TimeRange>,
    ) -> SourceSnapshot<Vec<DietLogEntry>> {
        self.record(InputKey::DietLogs(client_id.clone()));
        self.inner.diet_logs(client_id, range)
    }

    fn activities(
        &self,
        client_id: &ClientId,
        range: Option<TimeRange>,
    ) -> SourceSnapshot<Vec<ActivityEntry>> {
        self.record(InputKey::Activities(client_id.clone()));
        self.inner.activities(client_id, range)
    }

    fn revision(&self, key: &InputKey) -> Revision {
        self.inner.revision(key)
    }
}
