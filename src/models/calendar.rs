// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Canonical per-day activity calendar.
//!
//! Raw platform samples arrive as UNIX timestamps (LeetCode) or already
//! dated buckets (GitHub), possibly split across several fetch windows.
//! The calendar merges them all by local calendar date, summing counts,
//! so overlapping or abutting windows cannot double-count across a day
//! boundary. The date is always the merge key, never the raw timestamp.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::time_utils;

/// One raw observation from a platform, before date-bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivitySample {
    /// UNIX timestamp, seconds.
    pub timestamp: i64,
    pub count: u64,
}

/// One day of activity, as serialized for the dashboard heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub count: u64,
}

/// Canonical date→count mapping for one platform.
///
/// Dates are calendar dates in the reference timezone, kept in
/// chronological order. Zero-count days are retained for the heatmap but
/// never count as active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Calendar {
    days: BTreeMap<NaiveDate, u64>,
}

impl Calendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dated sample, summing with any existing count for that date.
    pub fn add(&mut self, date: NaiveDate, count: u64) {
        *self.days.entry(date).or_insert(0) += count;
    }

    /// Add a raw timestamped sample. Out-of-range timestamps are dropped.
    pub fn add_sample(&mut self, sample: ActivitySample) {
        if let Some(date) = time_utils::local_date_of_timestamp(sample.timestamp) {
            self.add(date, sample.count);
        }
    }

    /// Build a calendar from raw timestamped samples.
    pub fn from_samples<I>(samples: I) -> Self
    where
        I: IntoIterator<Item = ActivitySample>,
    {
        let mut calendar = Self::new();
        for sample in samples {
            calendar.add_sample(sample);
        }
        calendar
    }

    /// Merge another calendar into this one, summing counts per date.
    pub fn merge(&mut self, other: &Calendar) {
        for (&date, &count) in &other.days {
            self.add(date, count);
        }
    }

    /// Count recorded for a date; 0 when absent.
    pub fn count_on(&self, date: NaiveDate) -> u64 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of day buckets, zero-count days included.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Number of days with a non-zero count.
    pub fn total_active_days(&self) -> u64 {
        self.days.values().filter(|&&count| count > 0).count() as u64
    }

    /// Dates with a non-zero count, ascending.
    pub fn active_dates(&self) -> Vec<NaiveDate> {
        self.days
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&date, _)| date)
            .collect()
    }

    /// All buckets in chronological order.
    pub fn day_buckets(&self) -> Vec<DayBucket> {
        self.days
            .iter()
            .map(|(&date, &count)| DayBucket { date, count })
            .collect()
    }
}
