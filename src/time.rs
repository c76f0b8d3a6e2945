// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instant normalisation and calendar classification.
//!
//! Every query funnels its inputs through [`TimeContext::to_instant`] and then
//! compares *calendar labels* rendered in the context timezone, not raw
//! distances between instants:
//!
//! | Query family | Label |
//! |--------------|-------|
//! | today / tomorrow / yesterday | `%Y%m%d` |
//! | this week / last week | ISO week, `%G-W%V` |
//! | this month / last month | `%Y-%m` |
//! | this year / last year | `%Y` |
//!
//! Because weeks use ISO numbering, 2024-12-31 and 2025-01-01 are "the same
//! week" (2025-W01) while being in different years.
//!
//! # Span queries
//!
//! [`TimeContext::is_within_next`] and [`TimeContext::was_within_last`] take
//! the bound as another *time-like* value (`"+1 week"`, an instant, ...), not
//! as a length. [`TimeContext::is_within_next_span`] and
//! [`TimeContext::was_within_last_span`] are the duration-based variants.

use crate::context::TimeContext;
use crate::error::{Error, Result};
use crate::time_like::TimeLike;
use chrono::DateTime;
use chrono_tz::Tz;
use qtty::Seconds;

/// One minute in seconds.
pub const MINUTE: i64 = 60;
/// One hour in seconds.
pub const HOUR: i64 = 3_600;
/// One day in seconds.
pub const DAY: i64 = 86_400;
/// One week in seconds.
pub const WEEK: i64 = 604_800;

/// Calendar granularity for label comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarUnit {
    /// Calendar date, `%Y%m%d`.
    Day,
    /// ISO 8601 week together with its week-numbering year.
    IsoWeek,
    /// Month of the year, `%Y-%m`.
    Month,
    /// Calendar year, `%Y`.
    Year,
}

impl CalendarUnit {
    const fn pattern(self) -> &'static str {
        match self {
            CalendarUnit::Day => "%Y%m%d",
            CalendarUnit::IsoWeek => "%G-W%V",
            CalendarUnit::Month => "%Y-%m",
            CalendarUnit::Year => "%Y",
        }
    }

    /// Label of `datetime` at this granularity, e.g. `2025-W01`.
    pub fn label(self, datetime: &DateTime<Tz>) -> String {
        datetime.format(self.pattern()).to_string()
    }
}

impl TimeContext {
    // ── normalisation ─────────────────────────────────────────────────

    /// Seconds since the epoch for any time-like value.
    ///
    /// Falsy input (`None`, `0`, `""`, `"0"`) is the current instant, text is
    /// resolved by [`TimeContext::parse`], numbers are taken as-is.
    ///
    /// # Errors
    ///
    /// [`Error::UnparseableTime`] when text cannot be resolved. It is never
    /// replaced by "now" or zero.
    pub fn to_instant(&self, time: impl Into<TimeLike>) -> Result<i64> {
        let time = time.into();
        if time.is_now() {
            return Ok(self.now_instant());
        }
        match time {
            TimeLike::Now => Ok(self.now_instant()),
            TimeLike::Unix(secs) => Ok(secs),
            TimeLike::DateTime(datetime) => Ok(datetime.timestamp()),
            TimeLike::Text(text) => Ok(self.parse(&text)?.timestamp()),
        }
    }

    /// `a - b` in seconds; positive when `a` is later.
    ///
    /// # Errors
    ///
    /// Whatever [`TimeContext::to_instant`] reports for either operand, and
    /// [`Error::DifferenceOverflow`] with both instants when the subtraction
    /// does not fit in `i64`.
    pub fn difference(&self, a: impl Into<TimeLike>, b: impl Into<TimeLike>) -> Result<i64> {
        let a = self.to_instant(a)?;
        let b = self.to_instant(b)?;
        a.checked_sub(b).ok_or(Error::DifferenceOverflow(a, b))
    }

    /// [`TimeContext::difference`] as a [`Seconds`] quantity.
    pub fn difference_span(
        &self,
        a: impl Into<TimeLike>,
        b: impl Into<TimeLike>,
    ) -> Result<Seconds> {
        let a = self.to_instant(a)?;
        let b = self.to_instant(b)?;
        Ok(Seconds::new(a as f64 - b as f64))
    }

    // ── calendar labels ───────────────────────────────────────────────

    /// Whether `time` falls in the same `unit` as `reference`, both seen in
    /// the context timezone.
    pub fn same_calendar_unit(
        &self,
        time: impl Into<TimeLike>,
        reference: impl Into<TimeLike>,
        unit: CalendarUnit,
    ) -> Result<bool> {
        let reference = self.localize(self.to_instant(reference)?)?;
        self.matches_label(time, &reference, unit)
    }

    fn matches_label(
        &self,
        time: impl Into<TimeLike>,
        reference: &DateTime<Tz>,
        unit: CalendarUnit,
    ) -> Result<bool> {
        let datetime = self.localize(self.to_instant(time)?)?;
        Ok(unit.label(&datetime) == unit.label(reference))
    }

    /// Same label as the phrase `reference` (`"yesterday"`, `"last week"`, ...)
    /// resolves to.
    fn matches_phrase(
        &self,
        time: impl Into<TimeLike>,
        reference: &str,
        unit: CalendarUnit,
    ) -> Result<bool> {
        let reference = self.parse(reference)?;
        self.matches_label(time, &reference, unit)
    }

    // ── "is" family ───────────────────────────────────────────────────

    /// Same calendar day as now.
    pub fn is_today(&self, time: impl Into<TimeLike>) -> Result<bool> {
        self.matches_label(time, &self.now(), CalendarUnit::Day)
    }

    /// Same calendar day as the start of tomorrow.
    pub fn is_tomorrow(&self, time: impl Into<TimeLike>) -> Result<bool> {
        self.matches_phrase(time, "tomorrow", CalendarUnit::Day)
    }

    /// Same ISO week and week-numbering year as now.
    pub fn is_this_week(&self, time: impl Into<TimeLike>) -> Result<bool> {
        self.matches_label(time, &self.now(), CalendarUnit::IsoWeek)
    }

    /// Same calendar month as now.
    pub fn is_this_month(&self, time: impl Into<TimeLike>) -> Result<bool> {
        self.matches_label(time, &self.now(), CalendarUnit::Month)
    }

    /// Same calendar year as now.
    pub fn is_this_year(&self, time: impl Into<TimeLike>) -> Result<bool> {
        self.matches_label(time, &self.now(), CalendarUnit::Year)
    }

    // ── "was" family ──────────────────────────────────────────────────

    /// Same calendar day as the start of yesterday.
    pub fn was_yesterday(&self, time: impl Into<TimeLike>) -> Result<bool> {
        self.matches_phrase(time, "yesterday", CalendarUnit::Day)
    }

    /// Same ISO week as seven days ago.
    pub fn was_last_week(&self, time: impl Into<TimeLike>) -> Result<bool> {
        self.matches_phrase(time, "last week", CalendarUnit::IsoWeek)
    }

    /// Same month as one calendar month ago (clamped to month end).
    pub fn was_last_month(&self, time: impl Into<TimeLike>) -> Result<bool> {
        self.matches_phrase(time, "last month", CalendarUnit::Month)
    }

    /// Same calendar year as one year ago.
    pub fn was_last_year(&self, time: impl Into<TimeLike>) -> Result<bool> {
        self.matches_phrase(time, "last year", CalendarUnit::Year)
    }

    // ── spans ─────────────────────────────────────────────────────────

    /// `now < time < span`, where `span` is itself a time-like bound such as
    /// `"+1 week"`, not a duration.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use tempofmt::TimeContext;
    ///
    /// let ctx = TimeContext::utc().with_fixed_now(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    /// assert!(ctx.is_within_next("+2 days", "+1 week").unwrap());
    /// assert!(!ctx.is_within_next("+2 weeks", "+1 week").unwrap());
    /// ```
    pub fn is_within_next(
        &self,
        time: impl Into<TimeLike>,
        span: impl Into<TimeLike>,
    ) -> Result<bool> {
        let time = self.to_instant(time)?;
        let span = self.to_instant(span)?;
        Ok(time < span && time > self.now_instant())
    }

    /// `span < time < now`, where `span` is a time-like bound such as
    /// `"-1 week"`.
    pub fn was_within_last(
        &self,
        time: impl Into<TimeLike>,
        span: impl Into<TimeLike>,
    ) -> Result<bool> {
        let time = self.to_instant(time)?;
        let span = self.to_instant(span)?;
        Ok(time > span && time < self.now_instant())
    }

    /// `time` is in the future and less than `span` away.
    pub fn is_within_next_span(&self, time: impl Into<TimeLike>, span: Seconds) -> Result<bool> {
        let time = self.to_instant(time)?;
        let now = self.now_instant();
        Ok(time > now && ((time as f64) - (now as f64)) < span.value())
    }

    /// `time` is in the past and less than `span` ago.
    pub fn was_within_last_span(&self, time: impl Into<TimeLike>, span: Seconds) -> Result<bool> {
        let time = self.to_instant(time)?;
        let now = self.now_instant();
        Ok(time < now && ((now as f64) - (time as f64)) < span.value())
    }
}
