// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gtm-executor: boolean probes for cut-off conditions.
//!
//! An executor answers "is the thing up right now?" by running an external
//! command or an HTTP request. Probe failures are reported as errors; the
//! cut-off condition absorbs them as `false` samples.

pub mod command;
pub mod http;

pub use command::CommandExecutor;
pub use http::HttpExecutor;

use async_trait::async_trait;
use gtm_conditional::{Executor, ProbeError};

/// An executor that always reports the same state. Used as the default for
/// unconfigured cut-offs and as a test stand-in.
#[derive(Debug, Clone, Copy)]
pub struct ConstExecutor(pub bool);

#[async_trait]
impl Executor for ConstExecutor {
    async fn probe(&self) -> Result<bool, ProbeError> {
        Ok(self.0)
    }
}
