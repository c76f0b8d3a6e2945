// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Heterogeneous "time-like" input.
//!
//! [`TimeLike`] is what every query in the crate accepts. It is normalised to
//! an instant (seconds since the Unix epoch) by
//! [`TimeContext::to_instant`](crate::TimeContext::to_instant), which is the
//! single choke point for comparisons and formatting.
//!
//! Falsy inputs (`None`, `0`, `""`, `"0"`) mean *now*.

use chrono::{DateTime, TimeZone, Utc};

/// A value that can be resolved to an instant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeLike {
    /// The current instant of the resolving context.
    #[default]
    Now,
    /// Seconds since 1970-01-01T00:00:00Z.
    Unix(i64),
    /// A structured date/time that already carries its instant.
    DateTime(DateTime<Utc>),
    /// Free-form text handed to the date parser.
    Text(String),
}

impl TimeLike {
    /// `true` when this value resolves to "now" without looking at the clock
    /// twice: the explicit [`TimeLike::Now`] and the falsy `0`, `""`, `"0"`.
    pub fn is_now(&self) -> bool {
        match self {
            TimeLike::Now => true,
            TimeLike::Unix(secs) => *secs == 0,
            TimeLike::DateTime(_) => false,
            TimeLike::Text(text) => {
                let text = text.trim();
                text.is_empty() || text == "0"
            }
        }
    }
}

// ── From conversions ──────────────────────────────────────────────────────

impl From<i64> for TimeLike {
    #[inline]
    fn from(secs: i64) -> Self {
        TimeLike::Unix(secs)
    }
}

impl From<i32> for TimeLike {
    #[inline]
    fn from(secs: i32) -> Self {
        TimeLike::Unix(secs.into())
    }
}

impl From<u32> for TimeLike {
    #[inline]
    fn from(secs: u32) -> Self {
        TimeLike::Unix(secs.into())
    }
}

impl From<f64> for TimeLike {
    /// Truncates toward zero. The cast saturates, and NaN maps to `0` (now).
    #[inline]
    fn from(secs: f64) -> Self {
        TimeLike::Unix(secs as i64)
    }
}

impl From<&str> for TimeLike {
    #[inline]
    fn from(text: &str) -> Self {
        TimeLike::Text(text.to_owned())
    }
}

impl From<String> for TimeLike {
    #[inline]
    fn from(text: String) -> Self {
        TimeLike::Text(text)
    }
}

impl From<&String> for TimeLike {
    #[inline]
    fn from(text: &String) -> Self {
        TimeLike::Text(text.clone())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TimeLike {
    #[inline]
    fn from(datetime: DateTime<Tz>) -> Self {
        TimeLike::DateTime(datetime.with_timezone(&Utc))
    }
}

impl<T: Into<TimeLike>> From<Option<T>> for TimeLike {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(TimeLike::Now, Into::into)
    }
}
