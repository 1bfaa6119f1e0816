// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logical aggregation of several conditions.

use std::fmt;
use std::future::{poll_fn, Future};
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::Poll;

use thiserror::Error;
use tokio::sync::oneshot;

use crate::condition::Condition;
use crate::manual::ManualCondition;
use crate::observer::{ObserverGuard, StateObserver};
use crate::signal::{self, ConditionClosed, Signal, SignalSender};

/// The aggregation operator of a [`CompositeCondition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Satisfied when every sub-condition is satisfied.
    And,
    /// Satisfied when at least one sub-condition is satisfied.
    Or,
    /// Satisfied when exactly one sub-condition is satisfied.
    Xor,
}

impl Operator {
    pub fn reduce(self, values: &[bool]) -> bool {
        match self {
            Operator::And => values.iter().all(|value| *value),
            Operator::Or => values.iter().any(|value| *value),
            Operator::Xor => values.iter().filter(|value| **value).count() == 1,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => write!(f, "and"),
            Operator::Or => write!(f, "or"),
            Operator::Xor => write!(f, "xor"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompositeError {
    #[error("a composite condition requires at least one sub-condition")]
    Empty,
}

/// An aggregation of conditions under an [`Operator`].
///
/// A background driver snapshots every sub-condition, publishes the reduced
/// value into an internal cell and re-reduces whenever a sub-condition
/// changes. The constructor returns once the first reduced state is
/// established. Closing stops the driver and closes every sub-condition.
pub struct CompositeCondition {
    cell: ManualCondition,
    subconditions: Vec<Arc<dyn Condition>>,
    stop: Mutex<Option<SignalSender>>,
}

impl CompositeCondition {
    pub async fn new(
        operator: Operator,
        subconditions: Vec<Arc<dyn Condition>>,
    ) -> Result<Self, CompositeError> {
        if subconditions.is_empty() {
            return Err(CompositeError::Empty);
        }

        let cell = ManualCondition::new(false);
        let (stop_tx, stop_rx) = signal::pair();
        let (ready_tx, ready_rx) = oneshot::channel();

        tokio::spawn(drive(
            operator,
            subconditions.clone(),
            cell.clone(),
            stop_rx,
            ready_tx,
        ));

        let _ = ready_rx.await;

        Ok(Self {
            cell,
            subconditions,
            stop: Mutex::new(Some(stop_tx)),
        })
    }
}

impl Condition for CompositeCondition {
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

        for subcondition in &self.subconditions {
            subcondition.close();
        }

        self.cell.close();
    }
}

enum Wake {
    Stop,
    Changed(usize, Result<(), ConditionClosed>),
}

async fn drive(
    operator: Operator,
    subconditions: Vec<Arc<dyn Condition>>,
    cell: ManualCondition,
    mut stop: Signal,
    ready: oneshot::Sender<()>,
) {
    let mut states = Vec::with_capacity(subconditions.len());
    let mut signals: Vec<Option<Signal>> = Vec::with_capacity(subconditions.len());

    for subcondition in &subconditions {
        let (state, signal) = subcondition.watch();
        states.push(state);
        signals.push(Some(signal));
    }

    cell.set(operator.reduce(&states));
    let _ = ready.send(());

    loop {
        let wake = poll_fn(|cx| {
            if Pin::new(&mut stop).poll(cx).is_ready() {
                return Poll::Ready(Wake::Stop);
            }

            for (index, slot) in signals.iter_mut().enumerate() {
                if let Some(signal) = slot {
                    if let Poll::Ready(outcome) = Pin::new(signal).poll(cx) {
                        return Poll::Ready(Wake::Changed(index, outcome));
                    }
                }
            }

            Poll::Pending
        })
        .await;

        match wake {
            Wake::Stop => return,
            Wake::Changed(index, outcome) => {
                let (state, signal) = subconditions[index].watch();
                states[index] = state;
                // A closed sub-condition keeps its last observed state and
                // is not re-waited; its change signal would stay released
                // forever.
                signals[index] = outcome.is_ok().then_some(signal);
                cell.set(operator.reduce(&states));

                tracing::trace!(
                    %operator,
                    changed = index,
                    state,
                    "composite re-evaluated"
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "composite_tests.rs"]
mod tests;
