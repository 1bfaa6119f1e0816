// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Push subscriptions on condition state changes.

use tokio::sync::watch;

/// An observer of condition state changes.
///
/// Observers are invoked in registration order, under the observed
/// condition's lock; they must be fast and must not re-enter the condition
/// they observe.
pub trait StateObserver: Send + Sync {
    /// Called with the new satisfied state after every change.
    fn on_change(&self, satisfied: bool);
}

impl<F> StateObserver for F
where
    F: Fn(bool) + Send + Sync,
{
    fn on_change(&self, satisfied: bool) {
        self(satisfied)
    }
}

/// An observer that forwards states into a single-slot watch channel.
///
/// The channel keeps only the latest value: a state delivered while the
/// previous one is still unread overwrites it. Producers therefore never
/// block on a slow consumer, at the cost of coalescing rapid flips.
pub struct ChannelObserver {
    tx: watch::Sender<bool>,
}

impl ChannelObserver {
    pub fn new(tx: watch::Sender<bool>) -> Self {
        Self { tx }
    }
}

impl StateObserver for ChannelObserver {
    fn on_change(&self, satisfied: bool) {
        // No receivers left is fine; the subscription is simply stale.
        let _ = self.tx.send(satisfied);
    }
}

/// Handle returned from [`Condition::register`]; cancelling it removes the
/// observer. Cancellation is idempotent and also happens on drop.
///
/// [`Condition::register`]: crate::Condition::register
pub struct ObserverGuard {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ObserverGuard {
    pub(crate) fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A guard that does nothing, handed out by closed conditions.
    pub(crate) fn detached() -> Self {
        Self { cancel: None }
    }

    /// Remove the observer from the condition it was registered on.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for ObserverGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverGuard")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
