// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GeeksforGeeks profile scraper.
//!
//! GFG has no public API, so the numbers come from the profile HTML
//! page: first from the embedded `__NEXT_DATA__` JSON blob, then from
//! plain-text patterns. Any markup change silently degrades the
//! affected fields to zero; nothing here is allowed to fail the request.

use regex::Regex;
use serde_json::Value;

use crate::error::AppError;

const PLATFORM: &str = "gfg";

/// Pass-through counters scraped from a GFG profile. All best-effort,
/// zero when the markup does not match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GfgProfile {
    pub problems_solved: u64,
    pub coding_score: u64,
    pub school_solved: u64,
    pub basic_solved: u64,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
    pub institute_rank: u64,
    pub pod_streak_current: u64,
    pub pod_streak_longest: u64,
}

/// GeeksforGeeks profile client.
#[derive(Clone)]
pub struct GfgClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
}

impl GfgClient {
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

    /// Fetch and scrape the public profile page.
    pub async fn fetch_profile(&self) -> Result<GfgProfile, AppError> {
        let url = format!("{}/user/{}/", self.base_url, self.username);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::upstream(PLATFORM, e))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(
                PLATFORM,
                format!("HTTP {} from profile page", response.status()),
            ));
        }

        let html = response
            .text()
            .await
            .map_err(|e| AppError::upstream(PLATFORM, e))?;

        let profile = extract_profile(&html);
        tracing::debug!(
            username = %self.username,
            problems_solved = profile.problems_solved,
            coding_score = profile.coding_score,
            "GFG profile scraped"
        );
        Ok(profile)
    }
}

/// Extract profile numbers from the page HTML.
fn extract_profile(html: &str) -> GfgProfile {
    let mut profile = GfgProfile::default();

    if let Some(data) = next_data_json(html) {
        let user = data.pointer("/props/pageProps/userInfo");
        profile.problems_solved = u64_at(user, "/total_problems_solved");
        profile.coding_score = u64_at(user, "/score");
        profile.institute_rank = u64_at(user, "/institute_rank");
        profile.pod_streak_current = u64_at(user, "/pod_solved_current_streak");
        profile.pod_streak_longest = u64_at(user, "/pod_solved_longest_streak");

        // Submissions are grouped by difficulty; the per-difficulty
        // solved count is the number of problem entries.
        let submissions = data.pointer("/props/pageProps/userSubmissionsInfo");
        profile.school_solved = entry_count(submissions, "School");
        profile.basic_solved = entry_count(submissions, "Basic");
        profile.easy_solved = entry_count(submissions, "Easy");
        profile.medium_solved = entry_count(submissions, "Medium");
        profile.hard_solved = entry_count(submissions, "Hard");
    }

    // Plain-text patterns for the headline numbers, in case the Next.js
    // payload moves.
    if profile.problems_solved == 0 {
        profile.problems_solved = text_number(html, r"(?i)problems?\s+solved\D{0,40}?(\d+)");
    }
    if profile.coding_score == 0 {
        profile.coding_score = text_number(html, r"(?i)coding\s+score\D{0,40}?(\d+)");
    }
    if profile.pod_streak_current == 0 && profile.pod_streak_longest == 0 {
        if let Some((current, longest)) = streak_pair(html) {
            profile.pod_streak_current = current;
            profile.pod_streak_longest = longest;
        }
    }

    profile
}

/// Pull the `__NEXT_DATA__` JSON blob out of the page, if present.
fn next_data_json(html: &str) -> Option<Value> {
    let re =
        Regex::new(r#"(?s)<script id="__NEXT_DATA__"[^>]*>(.*?)</script>"#).ok()?;
    let captured = re.captures(html)?.get(1)?;
    serde_json::from_str(captured.as_str()).ok()
}

/// Numeric field lookup relative to an optional JSON node. Accepts both
/// numbers and numeric strings; anything else is 0.
fn u64_at(node: Option<&Value>, pointer: &str) -> u64 {
    let Some(value) = node.and_then(|n| n.pointer(pointer)) else {
        return 0;
    };
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
        .unwrap_or(0)
}

/// Number of entries under a keyed object node.
fn entry_count(node: Option<&Value>, key: &str) -> u64 {
    node.and_then(|n| n.get(key))
        .and_then(Value::as_object)
        .map(|m| m.len() as u64)
        .unwrap_or(0)
}

/// First captured number for a pattern, 0 when absent.
fn text_number(html: &str, pattern: &str) -> u64 {
    Regex::new(pattern)
        .ok()
        .and_then(|re| re.captures(html))
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// The profile renders the problem-of-the-day streak as `current/longest`.
fn streak_pair(html: &str) -> Option<(u64, u64)> {
    let re = Regex::new(r"(?i)streak\D{0,40}?(\d+)\s*/\s*(\d+)").ok()?;
    let captures = re.captures(html)?;
    Some((
        captures.get(1)?.as_str().parse().ok()?,
        captures.get(2)?.as_str().parse().ok()?,
    ))
}
