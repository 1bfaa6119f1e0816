// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The probe seam used by cut-off conditions.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a probe can fail with.
///
/// Cut-off conditions absorb probe failures as `false` samples; the error
/// only surfaces in logs.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("request failed: {0}")]
    Request(String),
}

/// A boolean probe of some external state.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn probe(&self) -> Result<bool, ProbeError>;
}
