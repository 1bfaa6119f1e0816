// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable wall-clock handling.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local};
use tokio::sync::Notify;

/// A wall clock together with a cancellable sleep.
#[async_trait]
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<FixedOffset>;

    /// Suspend until the clock reaches `deadline`. Returns immediately when
    /// the deadline has already passed.
    async fn sleep_until(&self, deadline: DateTime<FixedOffset>);
}

/// Real system clock.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }

    async fn sleep_until(&self, deadline: DateTime<FixedOffset>) {
        let until = (deadline - self.now()).to_std().unwrap_or(Duration::ZERO);
        tokio::time::sleep(until).await
    }
}

/// Fake clock for testing with controllable time.
///
/// Sleeps only complete once [`FakeClock::advance`] moves the clock past
/// their deadline.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<DateTime<FixedOffset>>>,
    advanced: Arc<Notify>,
}

impl FakeClock {
    pub fn new(start: DateTime<FixedOffset>) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
            advanced: Arc::new(Notify::new()),
        }
    }

    /// Advance the clock by the given duration, waking pending sleeps.
    pub fn advance(&self, duration: Duration) {
        {
            let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
            *current =
                *current + chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX);
        }

        self.advanced.notify_waiters();
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn sleep_until(&self, deadline: DateTime<FixedOffset>) {
        loop {
            let advanced = self.advanced.notified();

            if self.now() >= deadline {
                return;
            }

            advanced.await;
        }
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
