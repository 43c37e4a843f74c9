// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Streakboard API Server
//!
//! Aggregates a developer's public coding-platform activity (GitHub,
//! LeetCode, GeeksforGeeks) into contribution calendars and streaks
//! for the portfolio statistics dashboard.

use std::sync::Arc;
use std::time::Duration;

use streakboard::{
    config::Config,
    services::{GfgClient, GithubClient, LeetCodeClient, StatsService},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Streakboard API");

    // One shared HTTP client carries the per-call timeout for every
    // outbound request.
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .user_agent(concat!("streakboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client");

    let github = GithubClient::new(
        http.clone(),
        config.github_graphql_url.clone(),
        config.github_username.clone(),
        config.github_token.clone(),
    );
    let leetcode = LeetCodeClient::new(
        http.clone(),
        config.leetcode_base_url.clone(),
        config.leetcode_username.clone(),
    );
    let gfg = GfgClient::new(
        http,
        config.gfg_base_url.clone(),
        config.gfg_username.clone(),
    );

    let cache_key = format!(
        "{}:{}:{}",
        config.github_username, config.leetcode_username, config.gfg_username
    );
    let stats = StatsService::new(github, leetcode, gfg, cache_key, config.cache_ttl_minutes);
    tracing::info!(
        cache_ttl_minutes = config.cache_ttl_minutes,
        "Stats service initialized"
    );

    // Build shared state
    let state = Arc::new(AppState { config: config.clone(), stats });

    // Build router
    let app = streakboard::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("streakboard=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
