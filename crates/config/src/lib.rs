// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gtm-config: configuration documents and the condition registry.
//!
//! A YAML (or JSON) document declares named conditions and the triggers
//! watching them; [`Registry::load`] builds the live condition graph and
//! retains ownership of it, handing out non-owning handles by name.

pub mod decl;
pub mod registry;
pub mod timefmt;

pub use decl::{
    ActionDecl, ConditionDecl, ConditionKind, Document, ExecutorDecl, InlineCondition, TriggerDecl,
};
pub use registry::{ConfigError, Registry};
pub use timefmt::{parse_time, ParseTimeError};
