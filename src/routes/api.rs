// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only statistics API.

use crate::error::Result;
use crate::models::StatsResponse;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/stats", get(get_stats))
}

/// Aggregated coding-activity statistics for all configured platforms.
///
/// Per-platform failures degrade to zero-default stats inside a 200;
/// only an unexpected internal error surfaces as a 500.
async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>> {
    Ok(Json(state.stats.get_stats().await))
}
