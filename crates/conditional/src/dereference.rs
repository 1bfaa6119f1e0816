// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Non-owning condition handles.

use std::sync::Arc;

use crate::condition::{Condition, Settable};
use crate::observer::{ObserverGuard, StateObserver};
use crate::signal::Signal;

/// A handle on a condition whose `close` is a no-op.
///
/// The condition graph has a single owner for every condition (typically a
/// registry); everyone else holds a `Dereference` so that dropping or
/// closing a shared handle never tears down the graph underneath the owner.
pub struct Dereference {
    condition: Arc<dyn Condition>,
}

impl Dereference {
    pub fn new(condition: Arc<dyn Condition>) -> Self {
        Self { condition }
    }
}

impl Condition for Dereference {
    fn wait_for(&self, satisfied: bool) -> Signal {
        self.condition.wait_for(satisfied)
    }

    fn watch(&self) -> (bool, Signal) {
        self.condition.watch()
    }

    fn register(&self, observer: Box<dyn StateObserver>) -> ObserverGuard {
        self.condition.register(observer)
    }

    fn close(&self) {}

    fn as_settable(&self) -> Option<&dyn Settable> {
        self.condition.as_settable()
    }
}

#[cfg(test)]
#[path = "dereference_tests.rs"]
mod tests;
