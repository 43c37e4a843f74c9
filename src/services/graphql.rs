// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Minimal GraphQL-over-HTTP helper shared by the GitHub and LeetCode
//! clients.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// POST a GraphQL query and extract the `data` payload.
///
/// Transport failures, non-2xx statuses, GraphQL-level errors, and a
/// missing `data` field all surface as typed upstream failures so the
/// aggregator can degrade that platform to empty data.
pub(crate) async fn post_query<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    bearer_token: Option<&str>,
    platform: &str,
    query: &str,
    variables: Value,
) -> Result<T, AppError> {
    let mut request = http.post(url).json(&serde_json::json!({
        "query": query,
        "variables": variables,
    }));
    if let Some(token) = bearer_token {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .map_err(|e| AppError::upstream(platform, e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::upstream(
            platform,
            format!("HTTP {}: {}", status, body),
        ));
    }

    let envelope: GraphQlResponse<T> = response
        .json()
        .await
        .map_err(|e| AppError::upstream(platform, format!("JSON parse error: {}", e)))?;

    if let Some(err) = envelope.errors.first() {
        return Err(AppError::upstream(
            platform,
            format!("GraphQL error: {}", err.message),
        ));
    }

    envelope
        .data
        .ok_or_else(|| AppError::upstream(platform, "response missing data"))
}
