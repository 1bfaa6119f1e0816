// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logical negation of another condition.

use std::sync::Arc;

use crate::condition::Condition;
use crate::observer::{ObserverGuard, StateObserver};
use crate::signal::Signal;

/// A condition whose satisfied state is the inverse of the one it wraps.
///
/// The wrapper is a stateless adapter: waits and snapshots forward to the
/// sub-condition with the polarity flipped, and observers see flipped
/// values. Closing closes the sub-condition.
pub struct Inverse {
    subcondition: Arc<dyn Condition>,
}

impl Inverse {
    pub fn new(subcondition: Arc<dyn Condition>) -> Self {
        Self { subcondition }
    }
}

impl Condition for Inverse {
    fn wait_for(&self, satisfied: bool) -> Signal {
        self.subcondition.wait_for(!satisfied)
    }

    fn watch(&self) -> (bool, Signal) {
        let (satisfied, signal) = self.subcondition.watch();
        (!satisfied, signal)
    }

    fn register(&self, observer: Box<dyn StateObserver>) -> ObserverGuard {
        self.subcondition
            .register(Box::new(move |satisfied: bool| {
                observer.on_change(!satisfied)
            }))
    }

    fn close(&self) {
        self.subcondition.close()
    }
}

#[cfg(test)]
#[path = "inverse_tests.rs"]
mod tests;
