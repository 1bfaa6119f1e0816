// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hysteresis over a periodically sampled probe.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::condition::Condition;
use crate::executor::Executor;
use crate::manual::ManualCondition;
use crate::observer::{ObserverGuard, StateObserver};
use crate::signal::{self, Signal, SignalSender};

/// A condition driven by a probe sampled at a fixed period.
///
/// The condition becomes satisfied after `up` consecutive `true` samples
/// and unsatisfied after `down` consecutive `false` samples; a threshold of
/// zero commits on the first sample of that polarity. After a commit the
/// condition stays locked until the sampled value flips again, so a stable
/// probe never re-commits. Probe failures and timeouts count as `false`
/// samples.
///
/// The initial state is a synchronous sample taken before the condition is
/// returned; it starts locked.
pub struct CutOffCondition {
    cell: ManualCondition,
    stop: Mutex<Option<SignalSender>>,
}

impl CutOffCondition {
    pub async fn new(
        up: u32,
        down: u32,
        period: Duration,
        executor: Arc<dyn Executor>,
    ) -> Self {
        let state = sample(&*executor, period).await;
        let cell = ManualCondition::new(state);
        let (stop_tx, stop_rx) = signal::pair();

        tokio::spawn(drive(
            executor,
            period,
            cell.clone(),
            Hysteresis::new(up, down, state),
            stop_rx,
        ));

        Self {
            cell,
            stop: Mutex::new(Some(stop_tx)),
        }
    }
}

impl Condition for CutOffCondition {
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

/// Sample the probe once, bounded by the sampling period.
async fn sample(executor: &dyn Executor, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, executor.probe()).await {
        Ok(Ok(state)) => state,
        Ok(Err(error)) => {
            tracing::warn!(%error, "probe failed, sampling false");
            false
        }
        Err(_) => {
            tracing::warn!(?timeout, "probe timed out, sampling false");
            false
        }
    }
}

async fn drive(
    executor: Arc<dyn Executor>,
    period: Duration,
    cell: ManualCondition,
    mut hysteresis: Hysteresis,
    mut stop: Signal,
) {
    let start = tokio::time::Instant::now() + period;
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut stop => return,

            _ = ticker.tick() => {
                let state = sample(&*executor, period).await;

                if let Some(commit) = hysteresis.tick(state) {
                    tracing::debug!(state = commit, "cut-off committed");
                    cell.set(commit);
                }
            }
        }
    }
}

/// The counter and lock state of a cut-off, kept apart from the ticker so
/// the transition logic is a pure function of the sample stream.
struct Hysteresis {
    up: u32,
    down: u32,
    counter: u32,
    last_state: bool,
    locked: bool,
}

impl Hysteresis {
    fn new(up: u32, down: u32, initial: bool) -> Self {
        Self {
            up,
            down,
            counter: 0,
            last_state: initial,
            locked: true,
        }
    }

    /// Feed one sample; returns the state to commit, if any.
    fn tick(&mut self, state: bool) -> Option<bool> {
        if state == self.last_state {
            if !self.locked {
                self.counter += 1;
            }
        } else {
            self.last_state = state;
            self.counter = 0;
            self.locked = false;
        }

        let threshold = if state { self.up } else { self.down };

        if !self.locked && self.counter >= threshold {
            self.locked = true;
            return Some(state);
        }

        None
    }
}

#[cfg(test)]
#[path = "cutoff_tests.rs"]
mod tests;
