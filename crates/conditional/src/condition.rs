// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The condition capability.

use crate::observer::{ObserverGuard, StateObserver};
use crate::signal::Signal;

/// A condition that is either satisfied or unsatisfied.
///
/// All methods are thread-safe. Conditions are shared as
/// `Arc<dyn Condition>`; whoever owns a condition is responsible for
/// closing it (see [`Dereference`] for non-owning handles).
///
/// [`Dereference`]: crate::Dereference
pub trait Condition: Send + Sync {
    /// Returns a signal that releases once the condition reaches the
    /// specified satisfied state.
    ///
    /// If the condition already has that state, the signal is released
    /// before it is returned. If the condition is closed, the signal carries
    /// the closed marker.
    fn wait_for(&self, satisfied: bool) -> Signal;

    /// Returns the current satisfied state together with a signal that
    /// releases on the next state change (or on close).
    fn watch(&self) -> (bool, Signal);

    /// Register an observer that is called with every new state until the
    /// returned guard is cancelled or dropped.
    fn register(&self, observer: Box<dyn StateObserver>) -> ObserverGuard;

    /// Terminate the condition.
    ///
    /// Every armed signal handed out so far releases with the closed marker
    /// and all observers are detached. Derived conditions close their
    /// sub-conditions. Closing twice is a no-op.
    fn close(&self);

    /// The settable capability, when this condition supports being driven
    /// externally.
    fn as_settable(&self) -> Option<&dyn Settable> {
        None
    }
}

/// A condition whose satisfied state can be set explicitly.
pub trait Settable: Condition {
    /// Set the satisfied state. Setting the current state is a no-op that
    /// releases no signal and notifies no observer.
    fn set(&self, satisfied: bool);
}
