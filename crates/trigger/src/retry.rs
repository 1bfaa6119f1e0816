// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Retrying wrapper around another action.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::action::{Action, ActionContext, ActionError};

/// An action that retries another action up to `max` attempts, sleeping
/// `delay` between failures.
///
/// With `max == 0` the inner action is never run, and thus never fails.
pub struct Retry {
    action: Arc<dyn Action>,
    max: u32,
    delay: Duration,
}

impl Retry {
    pub fn new(action: Arc<dyn Action>, max: u32, delay: Duration) -> Self {
        Self { action, max, delay }
    }
}

#[async_trait]
impl Action for Retry {
    async fn run(&self, context: &ActionContext) -> Result<(), ActionError> {
        let mut last = Ok(());

        for attempt in 1..=self.max {
            last = self.action.run(context).await;

            match &last {
                Ok(()) => return Ok(()),
                Err(error) => {
                    tracing::warn!(attempt, max = self.max, %error, "action attempt failed");

                    if attempt < self.max {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }

        last
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
