// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration document declarations.
//!
//! The document is YAML (or JSON, which YAML subsumes). Conditions are
//! declared either inline as tagged objects or as string references into
//! the registry; times stay strings here and are parsed against the
//! accepted layouts when the registry builds the graph.

use std::collections::HashMap;
use std::time::Duration;

use gtm_time::Frequency;
use serde::Deserialize;

/// A full configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Document {
    #[serde(default)]
    pub conditions: Vec<ConditionDecl>,
    #[serde(default)]
    pub triggers: Vec<TriggerDecl>,
}

/// A condition declaration: a reference to a named condition, or an inline
/// definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ConditionDecl {
    Reference(String),
    Inline(Box<InlineCondition>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct InlineCondition {
    /// Registering a name makes the condition shareable by reference; the
    /// registry keeps ownership.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: ConditionKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ConditionKind {
    Manual {
        #[serde(default)]
        state: bool,
    },
    Inverse {
        condition: ConditionDecl,
    },
    Delay {
        condition: ConditionDecl,
        #[serde(with = "humantime_serde")]
        delay: Duration,
    },
    And {
        conditions: Vec<ConditionDecl>,
    },
    Or {
        conditions: Vec<ConditionDecl>,
    },
    Xor {
        conditions: Vec<ConditionDecl>,
    },
    Time {
        start: String,
        stop: String,
        #[serde(default = "default_frequency")]
        frequency: Frequency,
    },
    CutOff {
        #[serde(default)]
        up: u32,
        #[serde(default = "default_down")]
        down: u32,
        #[serde(default = "default_period", with = "humantime_serde")]
        period: Duration,
        #[serde(default)]
        executor: Option<ExecutorDecl>,
    },
}

fn default_frequency() -> Frequency {
    Frequency::Year
}

fn default_down() -> u32 {
    3
}

fn default_period() -> Duration {
    Duration::from_secs(5)
}

/// An executor declaration for cut-off conditions.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ExecutorDecl {
    Cmd {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        /// Accepted for declaration compatibility; command probes are
        /// bounded by the cut-off period instead.
        #[serde(default, with = "humantime_serde")]
        timeout: Option<Duration>,
    },
    Http {
        #[serde(default = "default_method")]
        method: String,
        url: String,
        #[serde(default = "default_status_codes")]
        status_codes: Vec<u16>,
        #[serde(default = "default_http_timeout", with = "humantime_serde")]
        timeout: Duration,
    },
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_status_codes() -> Vec<u16> {
    vec![200, 201]
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(1)
}

/// A trigger declaration: a condition paired with up/down actions.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerDecl {
    pub condition: ConditionDecl,
    #[serde(default)]
    pub up: Option<ActionDecl>,
    #[serde(default)]
    pub down: Option<ActionDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ActionDecl {
    Command {
        command: String,
        #[serde(default)]
        args: Vec<String>,
        #[serde(default)]
        env: HashMap<String, String>,
    },
}

#[cfg(test)]
#[path = "decl_tests.rs"]
mod tests;
