// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Response-cache behavior: a fresh cache entry must be served without
//! re-running the upstream fan-out.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use streakboard::config::Config;
use tower::ServiceExt;

mod common;

async fn hit_stats(app: &axum::Router) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cached_stats_served_without_refetch() {
    let hits = Arc::new(AtomicUsize::new(0));
    let github_url =
        common::spawn_fixture_server(common::github_fixture_router(hits.clone())).await;
    let failing_url = common::spawn_fixture_server(common::failing_router()).await;

    let mut config = Config::test_default();
    config.github_graphql_url = format!("{}/graphql", github_url);
    config.leetcode_base_url = failing_url.clone();
    config.gfg_base_url = failing_url;
    config.cache_ttl_minutes = 30;

    let (app, _) = common::create_test_app(config);

    hit_stats(&app).await;
    let after_first = hits.load(Ordering::SeqCst);
    // The account-creation query plus at least one window.
    assert!(after_first >= 2, "expected upstream traffic, got {after_first}");

    hit_stats(&app).await;
    assert_eq!(
        hits.load(Ordering::SeqCst),
        after_first,
        "second request must be served from cache"
    );
}

#[tokio::test]
async fn test_zero_ttl_disables_cache() {
    let hits = Arc::new(AtomicUsize::new(0));
    let github_url =
        common::spawn_fixture_server(common::github_fixture_router(hits.clone())).await;
    let failing_url = common::spawn_fixture_server(common::failing_router()).await;

    let mut config = Config::test_default();
    config.github_graphql_url = format!("{}/graphql", github_url);
    config.leetcode_base_url = failing_url.clone();
    config.gfg_base_url = failing_url;
    config.cache_ttl_minutes = 0;

    let (app, _) = common::create_test_app(config);

    hit_stats(&app).await;
    let after_first = hits.load(Ordering::SeqCst);
    hit_stats(&app).await;

    assert!(
        hits.load(Ordering::SeqCst) > after_first,
        "zero TTL must re-run the fan-out on every request"
    );
}
