// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date arithmetic in the reference timezone.
//!
//! Every "local date" in the engine is derived with a fixed UTC+5:30
//! offset (the site owner's timezone), independent of server or visitor
//! location. All components go through this module so the
//! today/yesterday boundary is computed identically everywhere.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};

/// Fixed reference offset from UTC, in seconds (UTC+5:30).
const REFERENCE_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// The fixed reference timezone offset.
pub fn reference_offset() -> FixedOffset {
    FixedOffset::east_opt(REFERENCE_OFFSET_SECS).expect("reference offset is in range")
}

/// Today's calendar date in the reference timezone.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&reference_offset()).date_naive()
}

/// Convert a UNIX timestamp (seconds) to its calendar date in the
/// reference timezone. Returns `None` for out-of-range timestamps.
pub fn local_date_of_timestamp(secs: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|dt| dt.with_timezone(&reference_offset()).date_naive())
}

/// Number of days spanned by `[start, end]`, inclusive of both endpoints.
///
/// A single-day span is 1. Returns 0 when `end` precedes `start`.
pub fn days_between_inclusive(start: NaiveDate, end: NaiveDate) -> u64 {
    if end < start {
        return 0;
    }
    end.signed_duration_since(start).num_days() as u64 + 1
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}
