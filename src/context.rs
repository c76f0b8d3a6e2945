// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Explicit time context: default timezone and clock.
//!
//! Every query that depends on "now" or on a local calendar reads it from a
//! [`TimeContext`] value instead of process-wide state. Tests pin the clock
//! with [`ClockSource::Fixed`]; applications usually build one context at
//! start-up (see [`TimeContext::from_env`]) and pass it around by copy.

use crate::error::{Error, Result};
use crate::time_like::TimeLike;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Environment variable consulted by [`TimeContext::from_env`].
pub const TZ_ENV: &str = "TZ";

/// Where a [`TimeContext`] reads the current instant from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClockSource {
    /// The host wall clock.
    #[default]
    System,
    /// A pinned instant.
    Fixed(DateTime<Utc>),
}

impl ClockSource {
    /// Current instant according to this source.
    #[inline]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            ClockSource::System => Utc::now(),
            ClockSource::Fixed(at) => *at,
        }
    }
}

/// Default timezone plus clock, threaded through every time query.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tempofmt::TimeContext;
///
/// let ctx = TimeContext::new(chrono_tz::Europe::Madrid)
///     .with_fixed_now(Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap());
///
/// assert!(ctx.is_today("2024-06-01 23:30:00").unwrap());
/// assert!(ctx.was_yesterday("2024-05-31").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeContext {
    #[cfg_attr(feature = "serde", serde(default = "default_timezone"))]
    timezone: Tz,
    #[cfg_attr(feature = "serde", serde(default))]
    clock: ClockSource,
}

#[cfg(feature = "serde")]
fn default_timezone() -> Tz {
    Tz::UTC
}

impl Default for TimeContext {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimeContext {
    // ── constructors ──────────────────────────────────────────────────

    /// Context in `timezone`, reading the system clock.
    #[inline]
    pub const fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            clock: ClockSource::System,
        }
    }

    /// Context in UTC, reading the system clock.
    #[inline]
    pub const fn utc() -> Self {
        Self::new(Tz::UTC)
    }

    /// Context whose default timezone comes from the `TZ` environment variable.
    ///
    /// An unset or empty variable selects UTC. A leading `:` (glibc style,
    /// `TZ=:Europe/Paris`) is accepted. A name unknown to the IANA database
    /// is an error, not a silent fallback.
    pub fn from_env() -> Result<Self> {
        Self::from_tz_var(std::env::var(TZ_ENV).ok().as_deref())
    }

    fn from_tz_var(value: Option<&str>) -> Result<Self> {
        let name = value
            .map(|v| v.trim().trim_start_matches(':'))
            .filter(|v| !v.is_empty());
        let ctx = match name {
            Some(name) => Self::new(parse_timezone(name)?),
            None => Self::utc(),
        };
        tracing::debug!(timezone = %ctx.timezone.name(), "time context from environment");
        Ok(ctx)
    }

    // ── builders ──────────────────────────────────────────────────────

    /// Same clock, different default timezone.
    #[inline]
    pub fn with_timezone(self, timezone: Tz) -> Self {
        Self { timezone, ..self }
    }

    /// Same timezone, a different clock.
    #[inline]
    pub fn with_clock(self, clock: ClockSource) -> Self {
        Self { clock, ..self }
    }

    /// Pin "now" to `now`.
    #[inline]
    pub fn with_fixed_now(self, now: DateTime<Utc>) -> Self {
        self.with_clock(ClockSource::Fixed(now))
    }

    /// Pin "now" to an instant given in seconds since the epoch.
    pub fn with_fixed_instant(self, instant: i64) -> Result<Self> {
        let now = DateTime::from_timestamp(instant, 0).ok_or(Error::OutOfRange(instant))?;
        Ok(self.with_fixed_now(now))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Default timezone of this context.
    #[inline]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Where "now" comes from.
    #[inline]
    pub const fn clock(&self) -> ClockSource {
        self.clock
    }

    /// Current date/time in the default timezone.
    #[inline]
    pub fn now(&self) -> DateTime<Tz> {
        self.clock.now().with_timezone(&self.timezone)
    }

    /// Current instant, seconds since the epoch.
    #[inline]
    pub fn now_instant(&self) -> i64 {
        self.clock.now().timestamp()
    }

    // ── timezone & factory ────────────────────────────────────────────

    /// Resolve a named timezone, or the default one when `name` is `None`
    /// or blank.
    pub fn timezone_of(&self, name: Option<&str>) -> Result<Tz> {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => parse_timezone(name),
            None => Ok(self.timezone),
        }
    }

    /// Build a structured date/time from a time-like value and an optional
    /// timezone name (both default to the context's own).
    ///
    /// Text input is resolved in the requested timezone, so
    /// `date_time_factory("2024-01-01", Some("Asia/Tokyo"))` is midnight in
    /// Tokyo, not midnight in the default timezone.
    pub fn date_time_factory(
        &self,
        time: impl Into<TimeLike>,
        timezone: Option<&str>,
    ) -> Result<DateTime<Tz>> {
        let scoped = self.with_timezone(self.timezone_of(timezone)?);
        let instant = scoped.to_instant(time)?;
        scoped.localize(instant)
    }

    /// Instant as a date/time in the default timezone.
    pub(crate) fn localize(&self, instant: i64) -> Result<DateTime<Tz>> {
        DateTime::from_timestamp(instant, 0)
            .map(|utc| utc.with_timezone(&self.timezone))
            .ok_or(Error::OutOfRange(instant))
    }
}

/// Look up an IANA timezone name.
fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>().map_err(|_| {
        tracing::debug!(name, "unknown timezone");
        Error::InvalidTimezone(name.to_owned())
    })
}
