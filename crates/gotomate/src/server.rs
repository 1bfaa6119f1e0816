// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The HTTP surface over the condition registry.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use gtm_config::Registry;

pub fn router(registry: Arc<Registry>) -> Router {
    Router::new()
        .route(
            "/conditions/{name}",
            get(get_condition).post(wait_condition).put(set_condition),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(registry)
}

/// `GET /conditions/{name}`: the current state as a JSON boolean.
async fn get_condition(
    State(registry): State<Arc<Registry>>,
    Path(name): Path<String>,
) -> Response {
    let Some(condition) = registry.get(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let (state, _change) = condition.watch();
    Json(state).into_response()
}

/// `POST /conditions/{name}`: block until the condition reaches the
/// requested state. If the condition closes while waiting, the client is
/// told to retry elsewhere.
async fn wait_condition(
    State(registry): State<Arc<Registry>>,
    Path(name): Path<String>,
    Json(target): Json<bool>,
) -> Response {
    let Some(condition) = registry.get(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match condition.wait_for(target).await {
        Ok(()) => Json(target).into_response(),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::RETRY_AFTER, "0")],
        )
            .into_response(),
    }
}

/// `PUT /conditions/{name}`: set the condition, when it is settable.
async fn set_condition(
    State(registry): State<Arc<Registry>>,
    Path(name): Path<String>,
    Json(target): Json<bool>,
) -> Response {
    let Some(condition) = registry.get(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match condition.as_settable() {
        Some(settable) => {
            settable.set(target);
            StatusCode::OK.into_response()
        }
        None => (StatusCode::BAD_REQUEST, "unsettable condition type\n").into_response(),
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
