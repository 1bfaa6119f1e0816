// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Actions that execute external commands.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::action::{Action, ActionContext, ActionError};

/// Environment variable carrying the name of the condition whose state
/// changed, when it has one.
pub const CONDITION_NAME_VAR: &str = "GOTOMATIC_CONDITION_NAME";

/// Environment variable carrying the new condition state, as `0` or `1`.
pub const CONDITION_STATE_VAR: &str = "GOTOMATIC_CONDITION_STATE";

/// An action that executes a command.
///
/// The command runs with exactly the provided environment plus
/// [`CONDITION_NAME_VAR`] and [`CONDITION_STATE_VAR`]. A non-zero exit
/// status is an error carrying the combined output.
pub struct CommandAction {
    command: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl CommandAction {
    pub fn new(command: impl Into<String>, args: Vec<String>, env: Vec<(String, String)>) -> Self {
        Self {
            command: command.into(),
            args,
            env,
        }
    }
}

#[async_trait]
impl Action for CommandAction {
    async fn run(&self, context: &ActionContext) -> Result<(), ActionError> {
        let mut command = Command::new(&self.command);
        command
            .args(&self.args)
            .env_clear()
            .envs(self.env.iter().map(|(key, value)| (key, value)))
            .env(
                CONDITION_STATE_VAR,
                if context.state { "1" } else { "0" },
            )
            .stdin(Stdio::null())
            .kill_on_drop(true);

        if let Some(name) = &context.condition_name {
            command.env(CONDITION_NAME_VAR, name);
        }

        let output = command.output().await?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));

            return Err(ActionError::CommandFailed {
                command: format!("{} {}", self.command, self.args.join(" ")),
                status: output.status,
                output: combined,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
