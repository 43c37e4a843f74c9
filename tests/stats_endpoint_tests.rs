// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end tests for the stats endpoint.
//!
//! The real router is exercised against in-process fixture servers so
//! the full pipeline runs: windowed fetches, fallback merging, calendar
//! normalization, and streak computation.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use streakboard::config::Config;
use tower::ServiceExt;

mod common;

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = common::create_test_app(Config::test_default());

    let (status, body) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_stats_aggregation_end_to_end() {
    let github_url =
        common::spawn_fixture_server(common::github_fixture_router(Arc::default())).await;
    let leetcode_url = common::spawn_fixture_server(common::leetcode_fixture_router()).await;
    let gfg_url = common::spawn_fixture_server(common::gfg_fixture_router()).await;

    let mut config = Config::test_default();
    config.github_graphql_url = format!("{}/graphql", github_url);
    config.leetcode_base_url = leetcode_url;
    config.gfg_base_url = gfg_url;

    let (app, _) = common::create_test_app(config);
    let (status, body) = get_json(app, "/api/stats").await;

    assert_eq!(status, StatusCode::OK);

    // GitHub: two active days (yesterday + today) in one window.
    assert_eq!(body["github"]["total_contributions"], 5);
    assert_eq!(body["github"]["total_active_days"], 2);
    assert_eq!(body["github"]["current_streak"]["count"], 2);
    assert_eq!(body["github"]["longest_streak"]["count"], 2);

    // LeetCode: empty yearly calendars, so the REST fallback supplied
    // the submissions; profile counters pass through.
    assert_eq!(body["leetcode"]["total_solved"], 100);
    assert_eq!(body["leetcode"]["easy_solved"], 50);
    assert_eq!(body["leetcode"]["ranking"], 1234);
    assert_eq!(body["leetcode"]["total_active_days"], 2);
    assert_eq!(body["leetcode"]["current_streak"]["count"], 2);

    // GFG: scraped counters pass through, activity stays empty.
    assert_eq!(body["gfg"]["problems_solved"], 250);
    assert_eq!(body["gfg"]["coding_score"], 812);
    assert_eq!(body["gfg"]["pod_streak_current"], 12);
    assert_eq!(body["gfg"]["pod_streak_longest"], 97);
    assert_eq!(body["gfg"]["current_streak"]["count"], 0);
    assert!(body["gfg"]["calendar"].as_array().unwrap().is_empty());

    assert!(body["fetched_at"].is_string());
}

#[tokio::test]
async fn test_stats_degrade_to_defaults_when_upstreams_fail() {
    let failing_url = common::spawn_fixture_server(common::failing_router()).await;

    let mut config = Config::test_default();
    config.github_graphql_url = format!("{}/graphql", failing_url);
    config.leetcode_base_url = failing_url.clone();
    config.gfg_base_url = failing_url;

    let (app, _) = common::create_test_app(config);
    let (status, body) = get_json(app, "/api/stats").await;

    // Upstream failures never break the endpoint: every platform
    // reports its well-typed zero defaults.
    assert_eq!(status, StatusCode::OK);
    for platform in ["github", "leetcode", "gfg"] {
        assert_eq!(body[platform]["current_streak"]["count"], 0, "{platform}");
        assert_eq!(body[platform]["longest_streak"]["count"], 0, "{platform}");
        assert_eq!(body[platform]["total_active_days"], 0, "{platform}");
        assert!(
            body[platform]["calendar"].as_array().unwrap().is_empty(),
            "{platform}"
        );
    }
    assert_eq!(body["github"]["total_contributions"], 0);
    assert_eq!(body["leetcode"]["total_solved"], 0);
    assert_eq!(body["gfg"]["problems_solved"], 0);
}

#[tokio::test]
async fn test_stats_partial_degradation_keeps_healthy_platforms() {
    let gfg_url = common::spawn_fixture_server(common::gfg_fixture_router()).await;
    let failing_url = common::spawn_fixture_server(common::failing_router()).await;

    let mut config = Config::test_default();
    config.github_graphql_url = format!("{}/graphql", failing_url);
    config.leetcode_base_url = failing_url;
    config.gfg_base_url = gfg_url;

    let (app, _) = common::create_test_app(config);
    let (status, body) = get_json(app, "/api/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["github"]["total_contributions"], 0);
    assert_eq!(body["leetcode"]["total_solved"], 0);
    // GFG still delivered its data.
    assert_eq!(body["gfg"]["problems_solved"], 250);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _) = common::create_test_app(Config::test_default());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
