// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use streakboard::config::Config;
use streakboard::routes::create_router;
use streakboard::services::{GfgClient, GithubClient, LeetCodeClient, StatsService};
use streakboard::time_utils;
use streakboard::AppState;

/// Serve a fixture router on an ephemeral port, returning its base URL.
#[allow(dead_code)]
pub async fn spawn_fixture_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture server");
    let addr = listener.local_addr().expect("fixture server addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fixture server");
    });
    format!("http://{}", addr)
}

/// Build the real app with adapters pointed at the configured base URLs.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> (axum::Router, Arc<AppState>) {
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.fetch_timeout_secs))
        .build()
        .expect("build HTTP client");

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
    let gfg = GfgClient::new(http, config.gfg_base_url.clone(), config.gfg_username.clone());

    let stats = StatsService::new(
        github,
        leetcode,
        gfg,
        "test".to_string(),
        config.cache_ttl_minutes,
    );

    let state = Arc::new(AppState { config, stats });
    (create_router(state.clone()), state)
}

/// UNIX timestamp for noon on `date` in the reference timezone.
#[allow(dead_code)]
pub fn noon_timestamp(date: NaiveDate) -> i64 {
    let local = date.and_hms_opt(12, 0, 0).unwrap();
    time_utils::reference_offset()
        .from_local_datetime(&local)
        .unwrap()
        .timestamp()
}

/// GitHub GraphQL fixture: an account created ~100 days ago (a single
/// fetch window) with contributions yesterday and today. Every GraphQL
/// hit bumps the counter.
#[allow(dead_code)]
pub fn github_fixture_router(hits: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/graphql",
        post(move |Json(body): Json<Value>| {
            let hits = hits.clone();
            async move {
                hits.fetch_add(1, Ordering::SeqCst);
                let query = body["query"].as_str().unwrap_or("");
                if query.contains("createdAt") {
                    let created = (Utc::now() - chrono::Duration::days(100)).to_rfc3339();
                    Json(json!({"data": {"user": {"createdAt": created}}}))
                } else {
                    let today = time_utils::today();
                    let yesterday = today.pred_opt().unwrap();
                    Json(json!({"data": {"user": {"contributionsCollection": {
                        "contributionCalendar": {
                            "totalContributions": 5,
                            "weeks": [{"contributionDays": [
                                {
                                    "date": yesterday.format("%Y-%m-%d").to_string(),
                                    "contributionCount": 2
                                },
                                {
                                    "date": today.format("%Y-%m-%d").to_string(),
                                    "contributionCount": 3
                                }
                            ]}]
                        }
                    }}}}))
                }
            }
        }),
    )
}

/// LeetCode fixture: empty yearly calendars (so the REST fallback kicks
/// in), a REST calendar with submissions yesterday and today, and fixed
/// profile counters.
#[allow(dead_code)]
pub fn leetcode_fixture_router() -> Router {
    Router::new()
        .route(
            "/graphql",
            post(|Json(body): Json<Value>| async move {
                let query = body["query"].as_str().unwrap_or("");
                if query.contains("userCalendar") {
                    Json(json!({"data": {"matchedUser": {
                        "userCalendar": {"submissionCalendar": "{}"}
                    }}}))
                } else {
                    Json(json!({"data": {"matchedUser": {
                        "profile": {"ranking": 1234},
                        "submitStats": {"acSubmissionNum": [
                            {"difficulty": "All", "count": 100},
                            {"difficulty": "Easy", "count": 50},
                            {"difficulty": "Medium", "count": 40},
                            {"difficulty": "Hard", "count": 10}
                        ]}
                    }}}))
                }
            }),
        )
        .route(
            "/api/user_submission_calendar/{username}/",
            get(|| async {
                let today = time_utils::today();
                let yesterday = today.pred_opt().unwrap();
                let mut calendar = serde_json::Map::new();
                calendar.insert(noon_timestamp(yesterday).to_string(), json!(2));
                calendar.insert(noon_timestamp(today).to_string(), json!(1));
                Json(Value::Object(calendar))
            }),
        )
}

/// GeeksforGeeks fixture: a profile page with an embedded Next.js blob.
#[allow(dead_code)]
pub fn gfg_fixture_router() -> Router {
    const PROFILE_HTML: &str = r#"<html><body>
        <script id="__NEXT_DATA__" type="application/json">{
            "props": {"pageProps": {
                "userInfo": {
                    "total_problems_solved": 250,
                    "score": 812,
                    "institute_rank": 3,
                    "pod_solved_current_streak": 12,
                    "pod_solved_longest_streak": 97
                },
                "userSubmissionsInfo": {
                    "School": {"p1": {}, "p2": {}},
                    "Basic": {"p3": {}},
                    "Easy": {"p4": {}, "p5": {}, "p6": {}},
                    "Medium": {"p7": {}},
                    "Hard": {}
                }
            }}
        }</script>
    </body></html>"#;

    Router::new().route("/user/{username}/", get(|| async { Html(PROFILE_HTML) }))
}

/// Upstream that fails every request.
#[allow(dead_code)]
pub fn failing_router() -> Router {
    Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR })
}
