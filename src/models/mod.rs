// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod calendar;
pub mod stats;
pub mod streak;

pub use calendar::{ActivitySample, Calendar, DayBucket};
pub use stats::{GfgStats, GithubStats, LeetCodeStats, PlatformStats, StatsResponse};
pub use streak::Streak;
