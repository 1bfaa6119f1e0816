// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Conditions reflecting whether the current time lies inside a recurring
//! interval.

use std::sync::Mutex;

use gtm_time::Moment;

use crate::clock::{Clock, SystemClock};
use crate::condition::Condition;
use crate::manual::ManualCondition;
use crate::observer::{ObserverGuard, StateObserver};
use crate::signal::{self, Signal, SignalSender};

/// A condition that is satisfied while the current time is inside the
/// associated moment's interval.
///
/// A background driver re-evaluates the moment at every interval boundary.
pub struct TimeCondition {
    cell: ManualCondition,
    stop: Mutex<Option<SignalSender>>,
}

impl TimeCondition {
    pub fn new(moment: impl Moment + 'static) -> Self {
        Self::with_clock(moment, SystemClock)
    }

    /// Create a time condition with an explicit clock, the seam used by
    /// tests to drive time manually.
    pub fn with_clock(moment: impl Moment + 'static, clock: impl Clock) -> Self {
        let (inside, _) = moment.next_interval(clock.now());
        let cell = ManualCondition::new(inside);
        let (stop_tx, stop_rx) = signal::pair();

        tokio::spawn(drive(moment, clock, cell.clone(), stop_rx));

        Self {
            cell,
            stop: Mutex::new(Some(stop_tx)),
        }
    }
}

impl Condition for TimeCondition {
    fn wait_for(&self, satisfied: bool) -> Signal {
        self.cell.wait_for(satisfied)
    }

    fn watch(&self) -> (bool, Signal) {
        self.cell.watch()
    }

    fn register(&self, observer: Box<dyn StateObserver>) -> ObserverGuard {
        self.cell.register(observer)
    }

    fn close(&self) {
        let stop = self.stop.lock().unwrap_or_else(|e| e.into_inner()).take();

        if let Some(stop) = stop {
            stop.release();
        }

        self.cell.close();
    }
}

async fn drive(
    moment: impl Moment,
    clock: impl Clock,
    cell: ManualCondition,
    mut stop: Signal,
) {
    loop {
        let now = clock.now();
        let (inside, boundary) = moment.next_interval(now);
        cell.set(inside);

        tracing::debug!(inside, %boundary, "time condition evaluated");

        tokio::select! {
            _ = &mut stop => return,
            _ = clock.sleep_until(boundary) => {}
        }
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
