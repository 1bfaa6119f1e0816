// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actions fired by triggers.

use async_trait::async_trait;
use thiserror::Error;

/// Errors an action can fail with. An action failure is fatal to the watch
/// that ran it.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("executing \"{command}\": {status}, output was:\n{output}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        output: String,
    },
    #[error("{0}")]
    Other(String),
}

/// The condition transition an action runs for.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// The name of the condition whose state changed, when it has one.
    pub condition_name: Option<String>,
    /// The state the condition transitioned to.
    pub state: bool,
}

/// An action performed when a watched condition changes state.
#[async_trait]
pub trait Action: Send + Sync {
    async fn run(&self, context: &ActionContext) -> Result<(), ActionError>;
}

/// An action backed by a plain function, mostly useful in tests.
pub struct FnAction<F>(F);

impl<F> FnAction<F>
where
    F: Fn(&ActionContext) -> Result<(), ActionError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> Action for FnAction<F>
where
    F: Fn(&ActionContext) -> Result<(), ActionError> + Send + Sync,
{
    async fn run(&self, context: &ActionContext) -> Result<(), ActionError> {
        (self.0)(context)
    }
}
