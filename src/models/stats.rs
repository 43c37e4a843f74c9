//! Per-platform statistics aggregates returned by the stats endpoint.
//!
//! Every platform always serializes fully populated: a failed fetch
//! contributes the zero-default shape, never a null, so the dashboard
//! can render an explicit empty state.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Calendar, DayBucket, Streak};

/// Derived activity summary shared by every platform: the canonical
/// calendar plus streaks computed from it.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformStats {
    pub calendar: Vec<DayBucket>,
    pub total_active_days: u64,
    pub current_streak: Streak,
    pub longest_streak: Streak,
}

impl PlatformStats {
    /// Compute streaks and flatten the calendar for one platform.
    pub fn from_calendar(calendar: &Calendar, today: NaiveDate) -> Self {
        Self {
            calendar: calendar.day_buckets(),
            total_active_days: calendar.total_active_days(),
            current_streak: Streak::current(calendar, today),
            longest_streak: Streak::longest(calendar, today),
        }
    }

    /// Zero-default shape for a platform that contributed no data.
    pub fn empty(today: NaiveDate) -> Self {
        Self::from_calendar(&Calendar::new(), today)
    }
}

/// GitHub aggregate: contribution calendar plus the pass-through total.
#[derive(Debug, Clone, Serialize)]
pub struct GithubStats {
    #[serde(flatten)]
    pub activity: PlatformStats,
    pub total_contributions: u64,
}

impl GithubStats {
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            activity: PlatformStats::empty(today),
            total_contributions: 0,
        }
    }
}

/// LeetCode aggregate: submission calendar plus profile counters.
#[derive(Debug, Clone, Serialize)]
pub struct LeetCodeStats {
    #[serde(flatten)]
    pub activity: PlatformStats,
    pub total_solved: u64,
    pub easy_solved: u64,
    pub medium_solved: u64,
    pub hard_solved: u64,
    pub ranking: u64,
}

impl LeetCodeStats {
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            activity: PlatformStats::empty(today),
            total_solved: 0,
            easy_solved: 0,
            medium_solved: 0,
            hard_solved: 0,
            ranking: 0,
        }
    }
}

/// GeeksforGeeks aggregate.
///
/// GFG exposes no per-day calendar, so the activity summary stays at its
/// zero defaults and the scraped streak counts pass through as counters.
#[derive(Debug, Clone, Serialize)]
pub struct GfgStats {
    #[serde(flatten)]
    pub activity: PlatformStats,
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

impl GfgStats {
    pub fn empty(today: NaiveDate) -> Self {
        Self {
            activity: PlatformStats::empty(today),
            problems_solved: 0,
            coding_score: 0,
            school_solved: 0,
            basic_solved: 0,
            easy_solved: 0,
            medium_solved: 0,
            hard_solved: 0,
            institute_rank: 0,
            pod_streak_current: 0,
            pod_streak_longest: 0,
        }
    }
}

/// Aggregated response for the stats endpoint, keyed by platform.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub github: GithubStats,
    pub leetcode: LeetCodeStats,
    pub gfg: GfgStats,
    /// When this aggregation was computed (RFC3339, UTC).
    pub fetched_at: String,
}
