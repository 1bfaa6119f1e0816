// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The base condition: a thread-safe boolean cell that can be set
//! explicitly. Every derived condition drives one of these internally.

use std::sync::{Arc, Mutex, Weak};

use crate::condition::{Condition, Settable};
use crate::observer::{ObserverGuard, StateObserver};
use crate::signal::{self, Signal, SignalSender};

/// A condition that is set or unset explicitly.
///
/// Cloning is cheap and shares the underlying state.
#[derive(Clone)]
pub struct ManualCondition {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    satisfied: bool,
    closed: bool,
    waiters: Vec<SignalSender>,
    observers: Vec<(u64, Box<dyn StateObserver>)>,
    next_observer_id: u64,
}

impl ManualCondition {
    /// Create a new manual condition in the specified initial state.
    pub fn new(satisfied: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                satisfied,
                closed: false,
                waiters: Vec::new(),
                observers: Vec::new(),
                next_observer_id: 0,
            })),
        }
    }

    /// Set the satisfied state.
    ///
    /// Setting the current state is a no-op: no signal releases and no
    /// observer is invoked. On an actual change every armed signal releases,
    /// then the observers run in registration order with the new state.
    /// Ignored after close.
    pub fn set(&self, satisfied: bool) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if inner.closed || inner.satisfied == satisfied {
            return;
        }

        inner.satisfied = satisfied;

        for waiter in inner.waiters.drain(..) {
            waiter.release();
        }

        for (_, observer) in &inner.observers {
            observer.on_change(satisfied);
        }
    }
}

impl Condition for ManualCondition {
    fn wait_for(&self, satisfied: bool) -> Signal {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if inner.closed {
            return Signal::closed();
        }

        if inner.satisfied == satisfied {
            return Signal::released();
        }

        let (tx, rx) = signal::pair();
        inner.waiters.push(tx);
        rx
    }

    fn watch(&self) -> (bool, Signal) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if inner.closed {
            return (inner.satisfied, Signal::closed());
        }

        let (tx, rx) = signal::pair();
        inner.waiters.push(tx);
        (inner.satisfied, rx)
    }

    fn register(&self, observer: Box<dyn StateObserver>) -> ObserverGuard {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if inner.closed {
            return ObserverGuard::detached();
        }

        let id = inner.next_observer_id;
        inner.next_observer_id += 1;
        inner.observers.push((id, observer));

        let weak: Weak<Mutex<Inner>> = Arc::downgrade(&self.inner);

        ObserverGuard::new(move || {
            if let Some(inner) = weak.upgrade() {
                let mut inner = inner.lock().unwrap_or_else(|e| e.into_inner());
                inner.observers.retain(|(observer_id, _)| *observer_id != id);
            }
        })
    }

    fn close(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());

        if inner.closed {
            return;
        }

        inner.closed = true;

        for waiter in inner.waiters.drain(..) {
            waiter.close();
        }

        inner.observers.clear();
    }

    fn as_settable(&self) -> Option<&dyn Settable> {
        Some(self)
    }
}

impl Settable for ManualCondition {
    fn set(&self, satisfied: bool) {
        ManualCondition::set(self, satisfied)
    }
}

#[cfg(test)]
#[path = "manual_tests.rs"]
mod tests;
