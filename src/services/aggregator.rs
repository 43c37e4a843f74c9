// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Statistics aggregation service.
//!
//! Fans out the three platform clients concurrently, joins their
//! results, and wraps every failure in a well-typed zero-default shape.
//! A short-lived in-memory cache sits in front of the fan-out so
//! repeated dashboard views do not hammer the third-party APIs.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::models::{GfgStats, GithubStats, LeetCodeStats, PlatformStats, StatsResponse};
use crate::services::{GfgClient, GithubClient, LeetCodeClient};
use crate::time_utils;

/// Cached aggregation with its fetch time.
#[derive(Clone)]
struct CachedStats {
    response: StatsResponse,
    fetched_at: DateTime<Utc>,
}

/// Aggregates statistics across all configured platforms.
pub struct StatsService {
    github: GithubClient,
    leetcode: LeetCodeClient,
    gfg: GfgClient,
    /// Cache key: platform usernames for this deployment.
    cache_key: String,
    cache_ttl: Duration,
    cache: DashMap<String, CachedStats>,
    /// Serializes cache refreshes so concurrent misses do not duplicate
    /// the upstream fan-out.
    refresh_lock: Mutex<()>,
}

impl StatsService {
    pub fn new(
        github: GithubClient,
        leetcode: LeetCodeClient,
        gfg: GfgClient,
        cache_key: String,
        cache_ttl_minutes: u64,
    ) -> Self {
        Self {
            github,
            leetcode,
            gfg,
            cache_key,
            cache_ttl: Duration::minutes(cache_ttl_minutes as i64),
            cache: DashMap::new(),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Aggregated statistics, served from cache while fresh.
    pub async fn get_stats(&self) -> StatsResponse {
        if let Some(hit) = self.cache_get() {
            return hit;
        }

        let _guard = self.refresh_lock.lock().await;

        // Re-check after acquiring the lock: another task may have
        // refreshed while we were waiting.
        if let Some(hit) = self.cache_get() {
            return hit;
        }

        let response = self.fetch_all().await;

        if self.cache_ttl > Duration::zero() {
            self.cache.insert(
                self.cache_key.clone(),
                CachedStats {
                    response: response.clone(),
                    fetched_at: Utc::now(),
                },
            );
        }

        response
    }

    fn cache_get(&self) -> Option<StatsResponse> {
        if self.cache_ttl <= Duration::zero() {
            return None;
        }
        let cached = self.cache.get(&self.cache_key)?;
        if Utc::now() < cached.fetched_at + self.cache_ttl {
            return Some(cached.response.clone());
        }
        None
    }

    /// Run the full fan-out. Each platform degrades independently: a
    /// failed fetch contributes its zero-default stats, never an error.
    async fn fetch_all(&self) -> StatsResponse {
        let today = time_utils::today();

        let (github, leetcode, gfg) = tokio::join!(
            self.github.fetch_activity(),
            self.leetcode.fetch_activity(),
            self.gfg.fetch_profile(),
        );

        let github = match github {
            Ok(activity) => GithubStats {
                activity: PlatformStats::from_calendar(&activity.calendar, today),
                total_contributions: activity.total_contributions,
            },
            Err(e) => {
                tracing::warn!(error = %e, platform = "github", "fetch failed, returning empty stats");
                GithubStats::empty(today)
            }
        };

        let leetcode = match leetcode {
            Ok(activity) => LeetCodeStats {
                activity: PlatformStats::from_calendar(&activity.calendar, today),
                total_solved: activity.profile.total_solved,
                easy_solved: activity.profile.easy_solved,
                medium_solved: activity.profile.medium_solved,
                hard_solved: activity.profile.hard_solved,
                ranking: activity.profile.ranking,
            },
            Err(e) => {
                tracing::warn!(error = %e, platform = "leetcode", "fetch failed, returning empty stats");
                LeetCodeStats::empty(today)
            }
        };

        let gfg = match gfg {
            Ok(profile) => GfgStats {
                // GFG exposes no per-day calendar: activity stays at the
                // zero defaults, scraped counters pass through.
                activity: PlatformStats::empty(today),
                problems_solved: profile.problems_solved,
                coding_score: profile.coding_score,
                school_solved: profile.school_solved,
                basic_solved: profile.basic_solved,
                easy_solved: profile.easy_solved,
                medium_solved: profile.medium_solved,
                hard_solved: profile.hard_solved,
                institute_rank: profile.institute_rank,
                pod_streak_current: profile.pod_streak_current,
                pod_streak_longest: profile.pod_streak_longest,
            },
            Err(e) => {
                tracing::warn!(error = %e, platform = "gfg", "fetch failed, returning empty stats");
                GfgStats::empty(today)
            }
        };

        StatsResponse {
            github,
            leetcode,
            gfg,
            fetched_at: time_utils::format_utc_rfc3339(Utc::now()),
        }
    }
}
