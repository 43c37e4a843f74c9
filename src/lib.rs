// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Streakboard: coding-activity aggregation for a portfolio dashboard.
//!
//! This crate provides the backend API that fetches public activity
//! from GitHub, LeetCode, and GeeksforGeeks, normalizes it into
//! per-day calendars, and derives current/longest activity streaks.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::StatsService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub stats: StatsService,
}
