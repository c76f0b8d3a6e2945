// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date/time string resolution.
//!
//! Resolves free-form text against an anchor ("now" in a timezone). Parsers
//! are tried from the most specific to the most general:
//!
//! | Form | Example |
//! |------|---------|
//! | epoch | `@1700000000` |
//! | RFC 3339 / RFC 2822 | `2026-03-15T14:00:00Z`, `Sun, 06 Nov 1994 08:49:37 GMT` |
//! | naive absolute | `2024-06-01 12:30:00`, `2024-06-01 12:30:00.250`, `2024-06-01`, `06/01/2024` |
//! | month names | `June 1, 2024`, `1 June 2024`, `Jun 1 2024` |
//! | anchors | `now`, `today`, `midnight`, `noon`, `tomorrow`, `yesterday` |
//! | clock times | `10:30`, `14:00:00`, `2pm`, `9:15 am` (today) |
//! | anchor + time | `tomorrow noon`, `tomorrow 09:00`, `yesterday at 6pm` |
//! | weekdays | `friday`, `next monday`, `last sunday`, `this wednesday` |
//! | relative | `+1 week 2 days`, `last month`, `in 3 hours`, `2 days ago` |
//!
//! Naive forms are read in the anchor's timezone. Month and year steps clamp
//! to the end of the month; day and week steps keep the wall-clock time. A
//! day that starts inside a timezone gap starts at the first instant after
//! the gap, even when the gap swallows the whole date.

use crate::context::TimeContext;
use crate::error::{Error, Result};
use chrono::offset::LocalResult;
use chrono::{
    DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Weekday,
};
use chrono_tz::Tz;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%b %d %Y",
];

const CLOCK_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Upper bound when scanning forward out of a timezone gap.
const MAX_GAP_HOURS: i64 = 48;

const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%z"];

impl TimeContext {
    /// Resolve `text` against this context's clock and default timezone.
    ///
    /// # Errors
    ///
    /// [`Error::UnparseableTime`] when no parser accepts the text.
    pub fn parse(&self, text: &str) -> Result<DateTime<Tz>> {
        resolve(text, &self.now())
    }
}

/// Resolve `input` relative to `anchor`; the result is in the anchor's timezone.
pub(crate) fn resolve(input: &str, anchor: &DateTime<Tz>) -> Result<DateTime<Tz>> {
    let raw = input.trim();
    let normalized = normalize(raw);
    let tz = anchor.timezone();

    let resolved = try_epoch(&normalized)
        .or_else(|| try_rfc(raw))
        .map(|dt| dt.with_timezone(&tz))
        .or_else(|| try_naive_absolute(raw, &tz))
        .or_else(|| try_anchored(&normalized, anchor))
        .or_else(|| try_clock_time(&normalized, anchor))
        .or_else(|| try_anchor_with_time(&normalized, anchor))
        .or_else(|| try_weekday(&normalized, anchor))
        .or_else(|| try_relative(&normalized, anchor));

    match resolved {
        Some(dt) => {
            tracing::trace!(input = raw, resolved = %dt, "resolved time string");
            Ok(dt)
        }
        None => {
            tracing::debug!(input = raw, "unparseable time string");
            Err(Error::UnparseableTime(raw.to_owned()))
        }
    }
}

/// Lower-case and collapse runs of whitespace.
fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Map a local wall-clock time to an instant.
///
/// Ambiguous times (DST fold) take the earlier offset; times inside a DST gap
/// are pushed forward by one hour, or to the end of the gap when it is longer.
fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => naive
            .checked_add_signed(Duration::hours(1))
            .and_then(|later| tz.from_local_datetime(&later).earliest())
            .or_else(|| earliest_at_or_after(tz, naive)),
    }
}

/// Earliest instant whose wall-clock reading is at or after `naive`.
///
/// Scans forward hour by hour to leave the gap, then bisects down to the
/// second the gap ends.
fn earliest_at_or_after(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    let exists = |local: &NaiveDateTime| tz.from_local_datetime(local).earliest().is_some();
    if exists(&naive) {
        return tz.from_local_datetime(&naive).earliest();
    }

    let mut hi = (1..=MAX_GAP_HOURS)
        .filter_map(|hours| naive.checked_add_signed(Duration::hours(hours)))
        .find(|local| exists(local))?;
    let mut lo = hi.checked_sub_signed(Duration::hours(1))?;

    while (hi - lo).num_seconds() > 1 {
        let mid = lo + Duration::seconds((hi - lo).num_seconds() / 2);
        if exists(&mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    tz.from_local_datetime(&hi).earliest()
}

fn start_of_day(tz: &Tz, date: NaiveDate) -> Option<DateTime<Tz>> {
    earliest_at_or_after(tz, date.and_time(NaiveTime::MIN))
}

// ── absolute forms ────────────────────────────────────────────────────────

fn try_epoch(s: &str) -> Option<DateTime<chrono::FixedOffset>> {
    let secs = s.strip_prefix('@')?.parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0).map(|dt| dt.fixed_offset())
}

fn try_rfc(s: &str) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_rfc2822(s))
        .ok()
        .or_else(|| {
            OFFSET_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        })
}

fn try_naive_absolute(s: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return localize(tz, naive);
    }
    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|date| start_of_day(tz, date))
}

// ── anchors & weekdays ────────────────────────────────────────────────────

fn try_anchored(s: &str, anchor: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let tz = anchor.timezone();
    let today = anchor.date_naive();
    match s {
        "now" => Some(*anchor),
        "today" | "midnight" => start_of_day(&tz, today),
        "noon" => localize(&tz, today.and_hms_opt(12, 0, 0)?),
        "tomorrow" => start_of_day(&tz, today.succ_opt()?),
        "yesterday" => start_of_day(&tz, today.pred_opt()?),
        _ => None,
    }
}

fn parse_meridiem(s: &str) -> Option<NaiveTime> {
    let compact = s.replace(' ', "");
    let (clock, pm) = match compact.strip_suffix("pm") {
        Some(clock) => (clock, true),
        None => (compact.strip_suffix("am")?, false),
    };
    let (hour, minute) = match clock.split_once(':') {
        Some((hour, minute)) => (hour.parse::<u32>().ok()?, minute.parse::<u32>().ok()?),
        None => (clock.parse::<u32>().ok()?, 0),
    };
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour = hour % 12 + if pm { 12 } else { 0 };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// `14:00`, `14:00:00`, `2pm`, `2:30 pm`.
fn parse_clock(s: &str) -> Option<NaiveTime> {
    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .or_else(|| parse_meridiem(s))
}

fn parse_time_of_day(s: &str) -> Option<NaiveTime> {
    match s {
        "noon" => NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => Some(NaiveTime::MIN),
        _ => parse_clock(s),
    }
}

/// A bare clock time on the anchor's date.
fn try_clock_time(s: &str, anchor: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let time = parse_clock(s)?;
    localize(&anchor.timezone(), anchor.date_naive().and_time(time))
}

/// `today`, `tomorrow` or `yesterday` followed by an optional `at` and a time.
fn try_anchor_with_time(s: &str, anchor: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let (day, time) = s.split_once(' ')?;
    let time = time.strip_prefix("at ").unwrap_or(time);
    let today = anchor.date_naive();
    let date = match day {
        "today" => today,
        "tomorrow" => today.succ_opt()?,
        "yesterday" => today.pred_opt()?,
        _ => return None,
    };
    localize(&anchor.timezone(), date.and_time(parse_time_of_day(time)?))
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// `friday` is the next Friday (today included), `next`/`last` skip today,
/// `this` stays within the current ISO week.
fn try_weekday(s: &str, anchor: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let (modifier, name) = s.split_once(' ').unwrap_or(("", s));
    let weekday = parse_weekday(name)?;
    let today = anchor.date_naive();
    let current = i64::from(today.weekday().num_days_from_monday());
    let target = i64::from(weekday.num_days_from_monday());

    let offset = match modifier {
        "" => (target - current).rem_euclid(7),
        "next" => match (target - current).rem_euclid(7) {
            0 => 7,
            ahead => ahead,
        },
        "last" | "previous" => match (current - target).rem_euclid(7) {
            0 => -7,
            back => -back,
        },
        "this" => target - current,
        _ => return None,
    };

    start_of_day(&anchor.timezone(), today + Duration::days(offset))
}

// ── relative offsets ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Fortnight,
    Month,
    Year,
}

fn parse_unit(s: &str) -> Option<Unit> {
    match s {
        "sec" | "secs" | "second" | "seconds" => Some(Unit::Second),
        "min" | "mins" | "minute" | "minutes" => Some(Unit::Minute),
        "hour" | "hours" => Some(Unit::Hour),
        "day" | "days" => Some(Unit::Day),
        "week" | "weeks" => Some(Unit::Week),
        "fortnight" | "fortnights" => Some(Unit::Fortnight),
        "month" | "months" => Some(Unit::Month),
        "year" | "years" => Some(Unit::Year),
        _ => None,
    }
}

/// Accumulated calendar and clock steps of a relative expression.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Offset {
    months: i64,
    days: i64,
    seconds: i64,
}

impl Offset {
    fn push(&mut self, count: i64, unit: Unit) -> Option<()> {
        match unit {
            Unit::Second => self.seconds = self.seconds.checked_add(count)?,
            Unit::Minute => self.seconds = self.seconds.checked_add(count.checked_mul(60)?)?,
            Unit::Hour => self.seconds = self.seconds.checked_add(count.checked_mul(3600)?)?,
            Unit::Day => self.days = self.days.checked_add(count)?,
            Unit::Week => self.days = self.days.checked_add(count.checked_mul(7)?)?,
            Unit::Fortnight => self.days = self.days.checked_add(count.checked_mul(14)?)?,
            Unit::Month => self.months = self.months.checked_add(count)?,
            Unit::Year => self.months = self.months.checked_add(count.checked_mul(12)?)?,
        }
        Some(())
    }

    fn negate(self) -> Option<Self> {
        Some(Self {
            months: self.months.checked_neg()?,
            days: self.days.checked_neg()?,
            seconds: self.seconds.checked_neg()?,
        })
    }

    fn apply(self, anchor: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let months = Months::new(u32::try_from(self.months.unsigned_abs()).ok()?);
        let local = anchor.naive_local();
        let local = if self.months >= 0 {
            local.checked_add_months(months)?
        } else {
            local.checked_sub_months(months)?
        };
        let local = local.checked_add_signed(Duration::try_days(self.days)?)?;
        localize(&anchor.timezone(), local)?
            .checked_add_signed(Duration::try_seconds(self.seconds)?)
    }
}

fn parse_count(token: &str) -> Option<i64> {
    match token {
        "a" | "an" => Some(1),
        _ => {
            let digits = token.strip_prefix('+').unwrap_or(token);
            if digits.is_empty() || digits.starts_with('+') {
                return None;
            }
            digits.parse().ok()
        }
    }
}

fn try_relative(s: &str, anchor: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let (s, ago) = match s.strip_suffix(" ago") {
        Some(rest) => (rest, true),
        None => (s, false),
    };
    let s = s.strip_prefix("in ").unwrap_or(s);

    let mut offset = Offset::default();
    let mut tokens = s.split(' ');
    let mut terms = 0usize;

    while let Some(token) = tokens.next() {
        let count = match token {
            "next" => 1,
            "last" | "previous" => -1,
            "this" => 0,
            other => parse_count(other)?,
        };
        let unit = parse_unit(tokens.next()?)?;
        offset.push(count, unit)?;
        terms += 1;
    }

    if terms == 0 {
        return None;
    }
    let offset = if ago { offset.negate()? } else { offset };
    offset.apply(anchor)
}
