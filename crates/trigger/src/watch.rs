// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watching a condition and driving a trigger with its transitions.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use gtm_conditional::{ChannelObserver, Condition, ConditionClosed, Signal};

use crate::action::{Action, ActionContext, ActionError};

/// A pair of actions driven by a condition's transitions.
#[derive(Clone, Default)]
pub struct Trigger {
    /// Run whenever the watched condition becomes satisfied.
    pub up: Option<Arc<dyn Action>>,
    /// Run whenever the watched condition becomes unsatisfied.
    pub down: Option<Arc<dyn Action>>,
}

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("trigger up: {0}")]
    Up(#[source] ActionError),
    #[error("trigger down: {0}")]
    Down(#[source] ActionError),
    #[error(transparent)]
    Closed(#[from] ConditionClosed),
}

/// Watch a condition and drive a trigger with its state changes.
///
/// Observed transitions run their action sequentially on this task; states
/// arriving while an action runs coalesce into a single slot, so a burst of
/// flips may skip intermediate states but never queues actions up.
///
/// The watch exits when `cancel` releases (`Ok`), when the condition is
/// closed, or when an action fails; an action failure also interrupts
/// nothing else, it is simply fatal to this watch.
pub async fn watch(
    name: Option<&str>,
    condition: &dyn Condition,
    trigger: &Trigger,
    mut cancel: Signal,
) -> Result<(), WatchError> {
    let (tx, mut rx) = watch::channel(false);
    let _guard = condition.register(Box::new(ChannelObserver::new(tx)));

    loop {
        tokio::select! {
            _ = &mut cancel => return Ok(()),

            changed = rx.changed() => {
                if changed.is_err() {
                    // The condition dropped its observers: it was closed.
                    return Err(WatchError::Closed(ConditionClosed));
                }

                let state = *rx.borrow_and_update();
                let action = if state {
                    trigger.up.as_ref()
                } else {
                    trigger.down.as_ref()
                };

                let Some(action) = action else { continue };

                let context = ActionContext {
                    condition_name: name.map(str::to_string),
                    state,
                };

                tracing::info!(name, state, "running trigger action");

                tokio::select! {
                    // Cancelling mid-action abandons it; command actions
                    // kill their child on drop.
                    _ = &mut cancel => return Ok(()),

                    result = action.run(&context) => {
                        if let Err(error) = result {
                            tracing::error!(name, state, %error, "trigger action failed");

                            return Err(if state {
                                WatchError::Up(error)
                            } else {
                                WatchError::Down(error)
                            });
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
