// ABOUTME: Memoized observation cell and the caller-owned handle that keeps it alive
// ABOUTME: Recomputes only when a read input changed and suppresses equal results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info};

use super::Observer;
use crate::engine::ViewState;
use crate::source::{Dependencies, InputKey, RecordSource, RecordStore, TrackingSource};

/// Computation of a view from the record source
pub type Compute<T> = Box<dyn Fn(&dyn RecordSource) -> ViewState<T>>;

/// Receives every emitted value
pub type Listener<T> = Box<dyn FnMut(&Rc<ViewState<T>>)>;

/// Last emitted value and the inputs it was computed from
struct Memo<T> {
    value: Option<Rc<ViewState<T>>>,
    dependencies: Dependencies,
}

/// A live, memoized view over a [`RecordStore`]
pub(crate) struct ObservationCell<T> {
    label: &'static str,
    store: RecordStore,
    compute: Compute<T>,
    memo: RefCell<Memo<T>>,
    listener: RefCell<Option<Listener<T>>>,
    active: Cell<bool>,
    recomputes: Cell<usize>,
    emissions: Cell<usize>,
}

impl<T: PartialEq + 'static> ObservationCell<T> {
    /// Create the cell, compute and emit its initial value, and subscribe it
    pub(crate) fn start(
        label: &'static str,
        store: &RecordStore,
        compute: Compute<T>,
        listener: Listener<T>,
    ) -> Rc<Self> {
        let cell = Rc::new(Self {
            label,
            store: store.clone(),
            compute,
            memo: RefCell::new(Memo {
                value: None,
                dependencies: Dependencies::default(),
            }),
            listener: RefCell::new(Some(listener)),
            active: Cell::new(true),
            recomputes: Cell::new(0),
            emissions: Cell::new(0),
        });

        let observer: Rc<dyn Observer> = cell.clone();
        store.subscribe(Rc::downgrade(&observer));
        info!(observation = label, "Observation started");

        store.dispatch(|| cell.recompute());
        cell
    }

    fn recompute(&self) {
        let tracking = TrackingSource::new(&self.store);
        let value = (self.compute)(&tracking);
        let dependencies = tracking.into_dependencies();
        self.recomputes.set(self.recomputes.get() + 1);

        let emitted = {
            let mut memo = self.memo.borrow_mut();
            memo.dependencies = dependencies;
            if memo.value.as_deref() == Some(&value) {
                None
            } else {
                let value = Rc::new(value);
                memo.value = Some(Rc::clone(&value));
                Some(value)
            }
        };

        match emitted {
            Some(value) => self.emit(&value),
            None => debug!(observation = self.label, "Recomputed value unchanged, suppressed"),
        }
    }

    fn emit(&self, value: &Rc<ViewState<T>>) {
        self.emissions.set(self.emissions.get() + 1);
        // Take the listener out so it may read the handle while running
        let listener = self.listener.borrow_mut().take();
        if let Some(mut listener) = listener {
            listener(value);
            if self.active.get() {
                *self.listener.borrow_mut() = Some(listener);
            }
        }
    }

    pub(crate) fn current(&self) -> Option<Rc<ViewState<T>>> {
        self.memo.borrow().value.clone()
    }

    pub(crate) fn recompute_count(&self) -> usize {
        self.recomputes.get()
    }

    pub(crate) fn emission_count(&self) -> usize {
        self.emissions.get()
    }

    pub(crate) fn dependency_keys(&self) -> Vec<InputKey> {
        self.memo.borrow().dependencies.keys().cloned().collect()
    }

    fn deactivate(&self) {
        if !self.active.replace(false) {
            return;
        }
        self.listener.borrow_mut().take();
        self.memo.borrow_mut().value = None;
        info!(observation = self.label, "Observation stopped");
    }
}

impl<T: PartialEq + 'static> Observer for ObservationCell<T> {
    fn notify(&self, changed: &InputKey) {
        if !self.active.get() {
            return;
        }
        {
            let memo = self.memo.borrow();
            if !memo.dependencies.contains(changed) || memo.dependencies.is_current(&self.store) {
                return;
            }
        }
        debug!(observation = self.label, key = %changed, "Input changed, recomputing");
        self.recompute();
    }
}

/// Caller-owned handle of a live observation
///
/// Dropping the handle stops the observation and releases its last value.
pub struct ObservationHandle<T: PartialEq + 'static> {
    cell: Rc<ObservationCell<T>>,
}

impl<T: PartialEq + 'static> ObservationHandle<T> {
    pub(crate) fn new(cell: Rc<ObservationCell<T>>) -> Self {
        Self { cell }
    }

    /// Latest emitted value
    #[must_use]
    pub fn current(&self) -> Option<Rc<ViewState<T>>> {
        self.cell.current()
    }

    /// Whether the latest value is still loading
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.current().is_some_and(|value| value.is_loading())
    }

    /// Times the view was computed, including the initial computation
    #[must_use]
    pub fn recompute_count(&self) -> usize {
        self.cell.recompute_count()
    }

    /// Values delivered to the listener, including the initial one
    #[must_use]
    pub fn emission_count(&self) -> usize {
        self.cell.emission_count()
    }

    /// Input keys the latest computation read
    #[must_use]
    pub fn dependencies(&self) -> Vec<InputKey> {
        self.cell.dependency_keys()
    }

    /// Stop observing
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl<T: PartialEq + 'static> Drop for ObservationHandle<T> {
    fn drop(&mut self) {
        self.cell.deactivate();
    }
}
