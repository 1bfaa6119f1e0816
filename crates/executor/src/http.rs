// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Probing through an HTTP request.

use std::time::Duration;

use async_trait::async_trait;
use gtm_conditional::{Executor, ProbeError};
use reqwest::Method;

/// An executor that reports `true` when the configured URL answers with one
/// of the accepted status codes.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    method: String,
    url: String,
    status_codes: Vec<u16>,
    client: reqwest::Client,
}

impl HttpExecutor {
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        status_codes: Vec<u16>,
        timeout: Duration,
    ) -> Result<Self, ProbeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| ProbeError::Request(error.to_string()))?;

        Ok(Self {
            method: method.into(),
            url: url.into(),
            status_codes,
            client,
        })
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn probe(&self) -> Result<bool, ProbeError> {
        let method = Method::from_bytes(self.method.as_bytes())
            .map_err(|_| ProbeError::Request(format!("invalid method \"{}\"", self.method)))?;

        let response = self
            .client
            .request(method, &self.url)
            .send()
            .await
            .map_err(|error| ProbeError::Request(error.to_string()))?;

        Ok(self.status_codes.contains(&response.status().as_u16()))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
