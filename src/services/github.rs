// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub contribution-calendar client.
//!
//! The GraphQL API caps `contributionsCollection(from:, to:)` at a
//! one-year span, so the full history is fetched as a sequence of
//! windowed queries run concurrently and merged by date. A failed
//! window contributes no data but never aborts the fetch: partial data
//! beats no data.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use futures_util::future::join_all;
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::models::Calendar;
use crate::services::graphql;

const PLATFORM: &str = "github";

/// Window advance: just under a year. Adjacent windows start one second
/// after the previous one ends, so they cannot overlap.
const WINDOW_DAYS: i64 = 364;

const CREATED_AT_QUERY: &str = r#"
query accountCreated($login: String!) {
  user(login: $login) {
    createdAt
  }
}
"#;

const CONTRIBUTIONS_QUERY: &str = r#"
query contributionWindow($login: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $login) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

/// Normalized GitHub contribution history.
#[derive(Debug, Clone)]
pub struct GithubActivity {
    pub calendar: Calendar,
    pub total_contributions: u64,
}

/// GitHub GraphQL client.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    graphql_url: String,
    username: String,
    token: String,
}

impl GithubClient {
    pub fn new(
        http: reqwest::Client,
        graphql_url: impl Into<String>,
        username: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            graphql_url: graphql_url.into(),
            username: username.into(),
            token: token.into(),
        }
    }

    /// Fetch the full contribution calendar since account creation.
    pub async fn fetch_activity(&self) -> Result<GithubActivity, AppError> {
        if self.token.is_empty() {
            return Err(AppError::upstream(PLATFORM, "no API token configured"));
        }

        let created_at = self.fetch_created_at().await?;
        let windows = contribution_windows(created_at, Utc::now());

        let results = join_all(windows.iter().map(|w| self.fetch_window(w))).await;

        let mut calendar = Calendar::new();
        let mut total_contributions = 0u64;
        for (window, result) in windows.iter().zip(results) {
            match result {
                Ok(slice) => {
                    calendar.merge(&slice.calendar);
                    total_contributions += slice.total_contributions;
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        from = %window.from,
                        to = %window.to,
                        "GitHub window fetch failed, skipping"
                    );
                }
            }
        }

        tracing::debug!(
            username = %self.username,
            days = calendar.len(),
            total_contributions,
            "GitHub contribution calendar fetched"
        );

        Ok(GithubActivity {
            calendar,
            total_contributions,
        })
    }

    /// Resolve the account creation date that anchors the first window.
    async fn fetch_created_at(&self) -> Result<DateTime<Utc>, AppError> {
        let data: CreatedAtData = graphql::post_query(
            &self.http,
            &self.graphql_url,
            Some(&self.token),
            PLATFORM,
            CREATED_AT_QUERY,
            json!({ "login": self.username }),
        )
        .await?;

        let user = data
            .user
            .ok_or_else(|| AppError::upstream(PLATFORM, "user not found"))?;
        Ok(user.created_at)
    }

    /// Fetch one `[from, to)` contribution window.
    async fn fetch_window(&self, window: &FetchWindow) -> Result<WindowSlice, AppError> {
        let data: ContributionsData = graphql::post_query(
            &self.http,
            &self.graphql_url,
            Some(&self.token),
            PLATFORM,
            CONTRIBUTIONS_QUERY,
            json!({
                "login": self.username,
                "from": window.from.to_rfc3339(),
                "to": window.to.to_rfc3339(),
            }),
        )
        .await?;

        let user = data
            .user
            .ok_or_else(|| AppError::upstream(PLATFORM, "user not found"))?;
        Ok(WindowSlice::from(user.contributions.calendar))
    }
}

/// One bounded fetch window, `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FetchWindow {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

/// Split `[created_at, now]` into windows the upstream span cap accepts.
fn contribution_windows(created_at: DateTime<Utc>, now: DateTime<Utc>) -> Vec<FetchWindow> {
    let mut windows = Vec::new();
    let mut from = created_at;
    while from < now {
        let to = (from + Duration::days(WINDOW_DAYS)).min(now);
        windows.push(FetchWindow { from, to });
        from = to + Duration::seconds(1);
    }
    windows
}

/// The contribution data carried by one window response.
#[derive(Debug, Clone)]
struct WindowSlice {
    calendar: Calendar,
    total_contributions: u64,
}

impl From<ContributionCalendar> for WindowSlice {
    fn from(upstream: ContributionCalendar) -> Self {
        let mut calendar = Calendar::new();
        for week in upstream.weeks {
            for day in week.contribution_days {
                // GitHub returns local calendar dates, not timestamps;
                // they are taken as-is with no timezone conversion.
                calendar.add(day.date, day.contribution_count);
            }
        }
        Self {
            calendar,
            total_contributions: upstream.total_contributions,
        }
    }
}

// ─── Upstream response shapes ────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CreatedAtData {
    user: Option<CreatedAtUser>,
}

#[derive(Debug, Deserialize)]
struct CreatedAtUser {
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ContributionsData {
    user: Option<ContributionsUser>,
}

#[derive(Debug, Deserialize)]
struct ContributionsUser {
    #[serde(rename = "contributionsCollection")]
    contributions: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
struct ContributionsCollection {
    #[serde(rename = "contributionCalendar")]
    calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
struct ContributionCalendar {
    #[serde(rename = "totalContributions")]
    total_contributions: u64,
    weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Deserialize)]
struct ContributionWeek {
    #[serde(rename = "contributionDays")]
    contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Deserialize)]
struct ContributionDay {
    date: NaiveDate,
    #[serde(rename = "contributionCount")]
    contribution_count: u64,
}
