// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Debouncing of another condition's state changes.

use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Sleep;

use crate::condition::Condition;
use crate::manual::ManualCondition;
use crate::observer::{ObserverGuard, StateObserver};
use crate::signal::{self, ConditionClosed, Signal, SignalSender};

/// A condition that mirrors its sub-condition, but only once the
/// sub-condition has held a state continuously for the configured delay.
///
/// The initial state is copied without delay. A flip that reverts within
/// less than the delay never propagates.
pub struct DelayedCondition {
    cell: ManualCondition,
    subcondition: Arc<dyn Condition>,
    stop: Mutex<Option<SignalSender>>,
}

impl DelayedCondition {
    pub fn new(subcondition: Arc<dyn Condition>, delay: Duration) -> Self {
        let (state, change) = subcondition.watch();
        let cell = ManualCondition::new(state);
        let (stop_tx, stop_rx) = signal::pair();

        tokio::spawn(drive(
            subcondition.clone(),
            cell.clone(),
            delay,
            state,
            change,
            stop_rx,
        ));

        Self {
            cell,
            subcondition,
            stop: Mutex::new(Some(stop_tx)),
        }
    }
}

impl Condition for DelayedCondition {
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

        self.subcondition.close();
        self.cell.close();
    }
}

async fn drive(
    subcondition: Arc<dyn Condition>,
    cell: ManualCondition,
    delay: Duration,
    mut candidate: bool,
    change: Signal,
    mut stop: Signal,
) {
    let mut change = Some(change);
    let mut timer: Option<Pin<Box<Sleep>>> = None;

    loop {
        tokio::select! {
            _ = &mut stop => return,

            outcome = next_change(&mut change) => {
                let (state, signal) = subcondition.watch();
                candidate = state;
                // Once the sub-condition is closed there is nothing left to
                // observe; any pending candidate still commits below.
                change = outcome.is_ok().then_some(signal);
                timer = Some(Box::pin(tokio::time::sleep(delay)));
            }

            _ = next_timer(&mut timer) => {
                cell.set(candidate);
                timer = None;
            }
        }
    }
}

async fn next_change(change: &mut Option<Signal>) -> Result<(), ConditionClosed> {
    match change {
        Some(signal) => signal.await,
        None => std::future::pending().await,
    }
}

async fn next_timer(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(timer) => timer.as_mut().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "delay_tests.rs"]
mod tests;
