// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! LeetCode submission-calendar client.
//!
//! Calendar data is scoped by calendar year upstream, so the primary
//! path queries GraphQL once per year from the epoch year and merges the
//! results by timestamp. When the merge yields suspiciously little data
//! the client tries up to two best-effort fallbacks in order: the
//! undocumented REST calendar endpoint, then the calendar JSON embedded
//! in the profile page. Fallback entries only fill timestamps the pool
//! does not already have, so re-fetching the same data cannot inflate
//! counts.

use chrono::Datelike;
use futures_util::future::join_all;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};

use crate::error::AppError;
use crate::models::{ActivitySample, Calendar};
use crate::services::graphql;
use crate::time_utils;

const PLATFORM: &str = "leetcode";

/// First year with any submission data worth querying.
const EPOCH_YEAR: i32 = 2015;

/// A primary merge below this many day entries triggers the fallbacks.
const SPARSE_CALENDAR_THRESHOLD: usize = 366;

const YEAR_CALENDAR_QUERY: &str = r#"
query userProfileCalendar($username: String!, $year: Int) {
  matchedUser(username: $username) {
    userCalendar(year: $year) {
      submissionCalendar
    }
  }
}
"#;

const PROFILE_QUERY: &str = r#"
query userProfile($username: String!) {
  matchedUser(username: $username) {
    profile {
      ranking
    }
    submitStats {
      acSubmissionNum {
        difficulty
        count
      }
    }
  }
}
"#;

/// Normalized LeetCode submission history plus profile counters.
#[derive(Debug, Clone)]
pub struct LeetCodeActivity {
    pub calendar: Calendar,
    pub profile: LeetCodeProfile,
}

/// Pass-through profile counters.
#[derive(Debug, Clone, Default)]
pub struct LeetCodeProfile {
    pub total_solved: u64,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
    pub ranking: u64,
}

/// LeetCode client (unauthenticated, public endpoints).
#[derive(Clone)]
pub struct LeetCodeClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
}

impl LeetCodeClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            username: username.into(),
        }
    }

    /// Fetch the full submission calendar and profile counters.
    pub async fn fetch_activity(&self) -> Result<LeetCodeActivity, AppError> {
        let current_year = time_utils::today().year();
        let years: Vec<i32> = (EPOCH_YEAR..=current_year).collect();

        let results = join_all(years.iter().map(|&year| self.fetch_year_calendar(year))).await;

        // Merge years by timestamp before date-bucketing; summing at
        // matching timestamps is the defensive measure against overlap
        // between yearly responses.
        let mut by_timestamp: BTreeMap<i64, u64> = BTreeMap::new();
        for (year, result) in years.iter().zip(results) {
            match result {
                Ok(samples) => {
                    for sample in samples {
                        *by_timestamp.entry(sample.timestamp).or_insert(0) += sample.count;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, year = *year, "LeetCode year fetch failed, skipping");
                }
            }
        }

        if by_timestamp.len() < SPARSE_CALENDAR_THRESHOLD {
            let fallback = self.fetch_calendar_endpoint().await;
            merge_fallback("calendar_endpoint", fallback, &mut by_timestamp);
        }
        if by_timestamp.len() < SPARSE_CALENDAR_THRESHOLD {
            let fallback = self.fetch_profile_page_calendar().await;
            merge_fallback("profile_page", fallback, &mut by_timestamp);
        }

        let calendar = Calendar::from_samples(
            by_timestamp
                .into_iter()
                .map(|(timestamp, count)| ActivitySample { timestamp, count }),
        );

        let profile = match self.fetch_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "LeetCode profile fetch failed, using zero counters");
                LeetCodeProfile::default()
            }
        };

        tracing::debug!(
            username = %self.username,
            days = calendar.len(),
            total_solved = profile.total_solved,
            "LeetCode submission calendar fetched"
        );

        Ok(LeetCodeActivity { calendar, profile })
    }

    /// Primary source: GraphQL calendar for one year.
    async fn fetch_year_calendar(&self, year: i32) -> Result<Vec<ActivitySample>, AppError> {
        let data: CalendarData = graphql::post_query(
            &self.http,
            &self.graphql_url(),
            None,
            PLATFORM,
            YEAR_CALENDAR_QUERY,
            json!({ "username": self.username, "year": year }),
        )
        .await?;

        let user = data
            .matched_user
            .ok_or_else(|| AppError::upstream(PLATFORM, "user not found"))?;
        let calendar = user
            .user_calendar
            .ok_or_else(|| AppError::upstream(PLATFORM, "calendar missing from response"))?;
        parse_submission_calendar(&calendar.submission_calendar)
    }

    /// Fallback 1: undocumented REST calendar endpoint.
    async fn fetch_calendar_endpoint(&self) -> Result<Vec<ActivitySample>, AppError> {
        let url = format!(
            "{}/api/user_submission_calendar/{}/",
            self.base_url, self.username
        );
        let body = self.fetch_text(&url).await?;
        parse_calendar_payload(&body)
    }

    /// Fallback 2: calendar JSON embedded in the profile HTML page.
    async fn fetch_profile_page_calendar(&self) -> Result<Vec<ActivitySample>, AppError> {
        let url = format!("{}/{}/", self.base_url, self.username);
        let html = self.fetch_text(&url).await?;
        scrape_submission_calendar(&html)
    }

    /// Profile counters from the submit-stats GraphQL query.
    async fn fetch_profile(&self) -> Result<LeetCodeProfile, AppError> {
        let data: ProfileData = graphql::post_query(
            &self.http,
            &self.graphql_url(),
            None,
            PLATFORM,
            PROFILE_QUERY,
            json!({ "username": self.username }),
        )
        .await?;

        let user = data
            .matched_user
            .ok_or_else(|| AppError::upstream(PLATFORM, "user not found"))?;

        let mut profile = LeetCodeProfile {
            ranking: user.profile.and_then(|p| p.ranking).unwrap_or(0),
            ..LeetCodeProfile::default()
        };
        for entry in user.submit_stats.ac_submission_num {
            match entry.difficulty.as_str() {
                "All" => profile.total_solved = entry.count,
                "Easy" => profile.easy_solved = entry.count,
                "Medium" => profile.medium_solved = entry.count,
                "Hard" => profile.hard_solved = entry.count,
                _ => {}
            }
        }
        Ok(profile)
    }

    fn graphql_url(&self) -> String {
        format!("{}/graphql", self.base_url)
    }

    async fn fetch_text(&self, url: &str) -> Result<String, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::upstream(PLATFORM, e))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(
                PLATFORM,
                format!("HTTP {} from {}", response.status(), url),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::upstream(PLATFORM, e))
    }
}

/// Merge fallback samples into the timestamp pool, filling only missing
/// entries so overlapping sources stay idempotent. Fallback errors are
/// logged and swallowed.
fn merge_fallback(
    source: &str,
    result: Result<Vec<ActivitySample>, AppError>,
    pool: &mut BTreeMap<i64, u64>,
) {
    match result {
        Ok(samples) => {
            let before = pool.len();
            for sample in samples {
                pool.entry(sample.timestamp).or_insert(sample.count);
            }
            tracing::info!(
                source,
                added = pool.len() - before,
                "LeetCode fallback calendar merged"
            );
        }
        Err(e) => {
            tracing::debug!(error = %e, source, "LeetCode fallback failed, ignoring");
        }
    }
}

/// Parse the upstream submission calendar: a JSON object mapping UNIX
/// seconds (as string keys) to submission counts.
fn parse_submission_calendar(raw: &str) -> Result<Vec<ActivitySample>, AppError> {
    let entries: HashMap<String, u64> = serde_json::from_str(raw)
        .map_err(|e| AppError::upstream(PLATFORM, format!("calendar parse error: {}", e)))?;

    Ok(entries
        .into_iter()
        .filter_map(|(timestamp, count)| {
            timestamp
                .parse::<i64>()
                .ok()
                .map(|timestamp| ActivitySample { timestamp, count })
        })
        .collect())
}

/// The REST endpoint serves either the calendar object directly or the
/// same object re-encoded as a JSON string; accept both.
fn parse_calendar_payload(body: &str) -> Result<Vec<ActivitySample>, AppError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| AppError::upstream(PLATFORM, format!("calendar payload: {}", e)))?;

    match value {
        Value::String(inner) => parse_submission_calendar(&inner),
        Value::Object(_) => parse_submission_calendar(body),
        _ => Err(AppError::upstream(PLATFORM, "unexpected calendar payload")),
    }
}

/// Extract the `submissionCalendar` JSON string embedded in profile HTML.
fn scrape_submission_calendar(html: &str) -> Result<Vec<ActivitySample>, AppError> {
    let re = Regex::new(r#""submissionCalendar"\s*:\s*"((?:\\.|[^"\\])*)""#)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("calendar regex: {}", e)))?;

    let captured = re
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or_else(|| AppError::upstream(PLATFORM, "no embedded calendar in profile page"))?;

    // Re-wrap in quotes and parse as a JSON string to undo the escaping.
    let unescaped: String = serde_json::from_str(&format!("\"{}\"", captured.as_str()))
        .map_err(|e| AppError::upstream(PLATFORM, format!("embedded calendar: {}", e)))?;
    parse_submission_calendar(&unescaped)
}

// ─── Upstream response shapes ────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct CalendarData {
    #[serde(rename = "matchedUser")]
    matched_user: Option<CalendarUser>,
}

#[derive(Debug, Deserialize)]
struct CalendarUser {
    #[serde(rename = "userCalendar")]
    user_calendar: Option<UserCalendar>,
}

#[derive(Debug, Deserialize)]
struct UserCalendar {
    #[serde(rename = "submissionCalendar")]
    submission_calendar: String,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    #[serde(rename = "matchedUser")]
    matched_user: Option<ProfileUser>,
}

#[derive(Debug, Deserialize)]
struct ProfileUser {
    profile: Option<ProfileNode>,
    #[serde(rename = "submitStats")]
    submit_stats: SubmitStats,
}

#[derive(Debug, Deserialize)]
struct ProfileNode {
    // Null for unranked accounts.
    #[serde(default)]
    ranking: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SubmitStats {
    #[serde(rename = "acSubmissionNum")]
    ac_submission_num: Vec<SubmissionCount>,
}

#[derive(Debug, Deserialize)]
struct SubmissionCount {
    difficulty: String,
    count: u64,
}
