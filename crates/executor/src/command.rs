// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Probing through an external command's exit status.

use std::process::Stdio;

use async_trait::async_trait;
use gtm_conditional::{Executor, ProbeError};
use tokio::process::Command;

/// An executor that reports `true` when the configured command exits
/// successfully.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    command: String,
    args: Vec<String>,
}

impl CommandExecutor {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

#[async_trait]
impl Executor for CommandExecutor {
    async fn probe(&self) -> Result<bool, ProbeError> {
        let status = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            // The cut-off bounds each probe by its period; a timed-out
            // probe must not leave the child running.
            .kill_on_drop(true)
            .status()
            .await?;

        Ok(status.success())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
