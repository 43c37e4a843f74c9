// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Streak derivation over canonical calendars.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::models::Calendar;
use crate::time_utils;

/// A maximal run of consecutive active days.
///
/// Invariant: `count == days_between_inclusive(start_date, end_date)`
/// when `count > 0`. A zero streak is anchored at today on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub count: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Streak {
    /// Zero-length sentinel anchored at `today`.
    fn none(today: NaiveDate) -> Self {
        Self {
            count: 0,
            start_date: today,
            end_date: today,
        }
    }

    fn spanning(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            // The date span is ground truth for the reported count.
            count: time_utils::days_between_inclusive(start, end),
            start_date: start,
            end_date: end,
        }
    }

    /// Streak of consecutive active days ending at `today` or, by grace
    /// period, yesterday: a streak is not broken until a full day has
    /// passed with no activity.
    pub fn current(calendar: &Calendar, today: NaiveDate) -> Self {
        let anchor = if calendar.count_on(today) > 0 {
            today
        } else {
            match today.pred_opt() {
                Some(yesterday) if calendar.count_on(yesterday) > 0 => yesterday,
                _ => return Self::none(today),
            }
        };

        let mut start = anchor;
        while let Some(prev) = start.pred_opt() {
            if calendar.count_on(prev) == 0 {
                break;
            }
            start = prev;
        }

        Self::spanning(start, anchor)
    }

    /// Longest run of consecutive active days over the whole history.
    ///
    /// Ties keep the earliest run: the maximum only moves on strict
    /// improvement during the ascending scan.
    pub fn longest(calendar: &Calendar, today: NaiveDate) -> Self {
        let active = calendar.active_dates();
        let Some((&first, rest)) = active.split_first() else {
            return Self::none(today);
        };

        let mut best = (first, first);
        let mut run_start = first;
        let mut run_end = first;

        for &date in rest {
            if date == run_end + Days::new(1) {
                run_end = date;
            } else {
                run_start = date;
                run_end = date;
            }
            if time_utils::days_between_inclusive(run_start, run_end)
                > time_utils::days_between_inclusive(best.0, best.1)
            {
                best = (run_start, run_end);
            }
        }

        Self::spanning(best.0, best.1)
    }
}
