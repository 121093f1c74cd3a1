// ABOUTME: In-process reactive record store holding the latest snapshot per input key
// ABOUTME: Bumps revisions on structural change and notifies observers in arrival order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};
use vitalcoach_core::models::{
    ActivityEntry, Client, ClientId, DietLogEntry, DoctorId, MealPlan, TimeRange,
};

use super::{Delivery, InputKey, RecordSource, Revision, SourceSnapshot};
use crate::reactive::Observer;

/// Latest delivered snapshot of every key
#[derive(Default)]
struct Snapshots {
    clients: HashMap<ClientId, Option<Client>>,
    caseloads: HashMap<DoctorId, Option<Vec<ClientId>>>,
    meal_plans: HashMap<ClientId, Vec<MealPlan>>,
    diet_logs: HashMap<ClientId, Vec<DietLogEntry>>,
    activities: HashMap<ClientId, Vec<ActivityEntry>>,
    revisions: HashMap<InputKey, Revision>,
    clock: u64,
}

impl Snapshots {
    /// Store `delivery`; returns its key when the stored value changed
    fn apply(&mut self, delivery: Delivery) -> Option<InputKey> {
        let key = delivery.key();
        let changed = match delivery {
            Delivery::Client { id, client } => replace(&mut self.clients, id, client),
            Delivery::Caseload { doctor_id, clients } => {
                replace(&mut self.caseloads, doctor_id, clients)
            }
            Delivery::MealPlans { client_id, plans } => {
                replace(&mut self.meal_plans, client_id, plans)
            }
            Delivery::DietLogs { client_id, logs } => replace(&mut self.diet_logs, client_id, logs),
            Delivery::Activities {
                client_id,
                activities,
            } => replace(&mut self.activities, client_id, activities),
        };

        if !changed {
            return None;
        }
        self.clock += 1;
        self.revisions.insert(key.clone(), Revision(self.clock));
        Some(key)
    }
}

/// Insert `value`, reporting whether it differs from what was stored
fn replace<K: Eq + Hash, V: PartialEq>(
    map: &mut HashMap<K, V>,
    key: K,
    value: V,
) -> bool {
    match map.get(&key) {
        Some(existing) if *existing == value => false,
        _ => {
            map.insert(key, value);
            true
        }
    }
}

fn snapshot<K, V>(map: &HashMap<K, V>, key: &K) -> SourceSnapshot<V>
where
    K: Eq + Hash,
    V: Clone,
{
    map.get(key)
        .map_or(SourceSnapshot::Loading, |value| SourceSnapshot::Ready(value.clone()))
}

fn in_range<T>(
    records: SourceSnapshot<Vec<T>>,
    range: Option<TimeRange>,
    timestamp: impl Fn(&T) -> DateTime<Utc>,
) -> SourceSnapshot<Vec<T>> {
    match range {
        None => records,
        Some(range) => records.map(|records| {
            records
                .into_iter()
                .filter(|record| range.contains(timestamp(record)))
                .collect()
        }),
    }
}

/// Resets the dispatching flag when dispatch ends, even on unwind
struct DispatchGuard<'a>(&'a Cell<bool>);

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

struct StoreInner {
    snapshots: RefCell<Snapshots>,
    observers: RefCell<Vec<Weak<dyn Observer>>>,
    queue: RefCell<VecDeque<Delivery>>,
    dispatching: Cell<bool>,
}

/// Single-threaded in-process snapshot store
///
/// Cloning a `RecordStore` yields another handle to the same store.
#[derive(Clone)]
pub struct RecordStore {
    inner: Rc<StoreInner>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Create an empty store; every key reads as loading
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(StoreInner {
                snapshots: RefCell::new(Snapshots::default()),
                observers: RefCell::new(Vec::new()),
                queue: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
            }),
        }
    }

    /// Deliver a snapshot and notify observers of the key if it changed
    ///
    /// A delivery made while observers are being notified is queued and
    /// processed after the current one, so every observer sees snapshots in
    /// arrival order.
    pub fn deliver(&self, delivery: Delivery) {
        self.inner.queue.borrow_mut().push_back(delivery);
        self.dispatch(|| {});
    }

    /// Register an observer; it stays registered until it is dropped
    pub fn subscribe(&self, observer: Weak<dyn Observer>) {
        self.inner.observers.borrow_mut().push(observer);
    }

    /// Number of observers still alive
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner
            .observers
            .borrow()
            .iter()
            .filter(|observer| observer.strong_count() > 0)
            .count()
    }

    /// Run `f` as part of a dispatch, then drain queued deliveries
    pub(crate) fn dispatch(&self, f: impl FnOnce()) {
        if self.inner.dispatching.get() {
            f();
            return;
        }

        let _guard = DispatchGuard::enter(&self.inner.dispatching);
        f();
        while let Some(delivery) = self.next_queued() {
            let changed = self.inner.snapshots.borrow_mut().apply(delivery);
            match changed {
                Some(key) => self.notify(&key),
                None => trace!("Delivery unchanged, no notification"),
            }
        }
    }

    fn next_queued(&self) -> Option<Delivery> {
        self.inner.queue.borrow_mut().pop_front()
    }

    fn notify(&self, key: &InputKey) {
        let live: Vec<Rc<dyn Observer>> = {
            let mut observers = self.inner.observers.borrow_mut();
            observers.retain(|observer| observer.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };

        debug!(key = %key, observers = live.len(), "Snapshot changed");
        for observer in live {
            observer.notify(key);
        }
    }
}

impl RecordSource for RecordStore {
    fn client(&self, id: &ClientId) -> SourceSnapshot<Option<Client>> {
        snapshot(&self.inner.snapshots.borrow().clients, id)
    }

    fn caseload(&self, doctor_id: &DoctorId) -> SourceSnapshot<Option<Vec<ClientId>>> {
        snapshot(&self.inner.snapshots.borrow().caseloads, doctor_id)
    }

    fn meal_plans(&self, client_id: &ClientId) -> SourceSnapshot<Vec<MealPlan>> {
        snapshot(&self.inner.snapshots.borrow().meal_plans, client_id)
    }

    fn diet_logs(
        &self,
        client_id: &ClientId,
        range: Option<TimeRange>,
    ) -> SourceSnapshot<Vec<DietLogEntry>> {
        let logs = snapshot(&self.inner.snapshots.borrow().diet_logs, client_id);
        in_range(logs, range, |log| log.logged_at)
    }

    fn activities(
        &self,
        client_id: &ClientId,
        range: Option<TimeRange>,
    ) -> SourceSnapshot<Vec<ActivityEntry>> {
        let activities = snapshot(&self.inner.snapshots.borrow().activities, client_id);
        in_range(activities, range, |activity| activity.started_at)
    }

    fn revision(&self, key: &InputKey) -> Revision {
        self.inner
            .snapshots
            .borrow()
            .revisions
            .get(key)
            .copied()
            .unwrap_or(Revision::NEVER)
    }
}
