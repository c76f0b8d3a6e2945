// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Date formatting: feed/HTTP standards and strftime-style patterns.
//!
//! | Method | Standard | Example | Zone |
//! |--------|----------|---------|------|
//! | [`to_atom_string`](TimeContext::to_atom_string) | Atom (RFC 3339) | `2024-06-01T12:00:00+02:00` | context |
//! | [`to_rss_string`](TimeContext::to_rss_string) | RSS (RFC 822) | `Sat, 01 Jun 2024 12:00:00 +0200` | context |
//! | [`to_http_string`](TimeContext::to_http_string) | HTTP-date | `Sat, 01 Jun 2024 10:00:00 GMT` | always GMT |
//!
//! Pattern-based methods accept any chrono strftime directive sequence plus
//! `%o`, the ISO week-numbering year (chrono's `%G`). An unknown directive is
//! reported as [`Error::InvalidFormat`].

use crate::context::TimeContext;
use crate::error::{Error, Result};
use crate::time_like::TimeLike;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use chrono_humanize::HumanTime;
use chrono_tz::Tz;
use std::borrow::Cow;

/// Default pattern of [`TimeContext::to_date_string`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Default pattern of [`TimeContext::to_time_string`].
pub const TIME_FORMAT: &str = "%H:%M:%S";
/// Default pattern of [`TimeContext::to_date_time_string`].
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// RSS 2.0 `pubDate` layout.
pub const RSS_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";
/// HTTP `Date` header layout; only meaningful for UTC values.
pub const HTTP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Rewrite directives chrono spells differently (`%o` becomes `%G`).
fn translate_directives(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains("%o") {
        return Cow::Borrowed(pattern);
    }
    let mut translated = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        translated.push(c);
        if c == '%' {
            match chars.next() {
                Some('o') => translated.push('G'),
                Some(next) => translated.push(next),
                None => {}
            }
        }
    }
    Cow::Owned(translated)
}

/// Parse a strftime pattern up-front so formatting cannot fail later.
fn compile(pattern: &str) -> Result<Vec<Item<'_>>> {
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        tracing::debug!(pattern, "rejected strftime pattern");
        return Err(Error::InvalidFormat(pattern.to_owned()));
    }
    Ok(items)
}

impl TimeContext {
    fn local(&self, time: impl Into<TimeLike>) -> Result<DateTime<Tz>> {
        self.localize(self.to_instant(time)?)
    }

    /// Atom feed timestamp in the context timezone, numeric offset included.
    pub fn to_atom_string(&self, time: impl Into<TimeLike>) -> Result<String> {
        Ok(self
            .local(time)?
            .to_rfc3339_opts(SecondsFormat::Secs, false))
    }

    /// RSS feed timestamp in the context timezone.
    pub fn to_rss_string(&self, time: impl Into<TimeLike>) -> Result<String> {
        Ok(self.local(time)?.format(RSS_FORMAT).to_string())
    }

    /// HTTP-date, always rendered in GMT whatever the context timezone.
    pub fn to_http_string(&self, time: impl Into<TimeLike>) -> Result<String> {
        let utc = self.local(time)?.with_timezone(&Utc);
        Ok(utc.format(HTTP_FORMAT).to_string())
    }

    /// Format `time` with an arbitrary strftime pattern in the context timezone.
    pub fn strftime(&self, time: impl Into<TimeLike>, pattern: &str) -> Result<String> {
        let translated = translate_directives(pattern);
        let items =
            compile(&translated).map_err(|_| Error::InvalidFormat(pattern.to_owned()))?;
        Ok(self
            .local(time)?
            .format_with_items(items.iter())
            .to_string())
    }

    /// Date part, [`DATE_FORMAT`] unless `pattern` is given.
    pub fn to_date_string(
        &self,
        time: impl Into<TimeLike>,
        pattern: Option<&str>,
    ) -> Result<String> {
        self.strftime(time, pattern.unwrap_or(DATE_FORMAT))
    }

    /// Time-of-day part, [`TIME_FORMAT`] unless `pattern` is given.
    pub fn to_time_string(
        &self,
        time: impl Into<TimeLike>,
        pattern: Option<&str>,
    ) -> Result<String> {
        self.strftime(time, pattern.unwrap_or(TIME_FORMAT))
    }

    /// Date and time, [`DATE_TIME_FORMAT`] unless `pattern` is given.
    pub fn to_date_time_string(
        &self,
        time: impl Into<TimeLike>,
        pattern: Option<&str>,
    ) -> Result<String> {
        self.strftime(time, pattern.unwrap_or(DATE_TIME_FORMAT))
    }

    /// Rough English distance from now: `"2 hours ago"`, `"in 3 days"`,
    /// `"now"` (within ten seconds either way).
    pub fn relative_time_in_words(&self, time: impl Into<TimeLike>) -> Result<String> {
        let instant = self.to_instant(time)?;
        let delta = instant
            .checked_sub(self.now_instant())
            .and_then(Duration::try_seconds)
            .ok_or(Error::OutOfRange(instant))?;
        Ok(HumanTime::from(delta).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Madrid;

    /// Saturday 2024-06-01 10:00:00 UTC.
    const NOW: i64 = 1_717_236_000;

    fn ctx() -> TimeContext {
        TimeContext::utc().with_fixed_instant(NOW).unwrap()
    }

    #[test]
    fn atom() {
        assert_eq!(ctx().to_atom_string(NOW).unwrap(), "2024-06-01T10:00:00+00:00");
        assert_eq!(
            ctx().with_timezone(Madrid).to_atom_string(NOW).unwrap(),
            "2024-06-01T12:00:00+02:00"
        );
    }

    #[test]
    fn rss() {
        assert_eq!(ctx().to_rss_string(NOW).unwrap(), "Sat, 01 Jun 2024 10:00:00 +0000");
        assert_eq!(
            ctx().with_timezone(Madrid).to_rss_string("2024-01-05 09:03:00").unwrap(),
            "Fri, 05 Jan 2024 09:03:00 +0100"
        );
    }

    #[test]
    fn http_is_always_gmt() {
        let expected = "Sat, 01 Jun 2024 10:00:00 GMT";
        assert_eq!(ctx().to_http_string(NOW).unwrap(), expected);
        for tz in [Madrid, chrono_tz::America::Los_Angeles, chrono_tz::Asia::Kolkata] {
            let s = ctx().with_timezone(tz).to_http_string(NOW).unwrap();
            assert_eq!(s, expected);
            assert!(s.ends_with(" GMT"));
        }
    }

    #[test]
    fn default_patterns() {
        let ctx = ctx().with_timezone(Madrid);
        assert_eq!(ctx.to_date_string(NOW, None).unwrap(), "2024-06-01");
        assert_eq!(ctx.to_time_string(NOW, None).unwrap(), "12:00:00");
        assert_eq!(ctx.to_date_time_string(NOW, None).unwrap(), "2024-06-01 12:00:00");
    }

    #[test]
    fn custom_patterns() {
        let ctx = ctx();
        assert_eq!(ctx.to_date_string(NOW, Some("%d/%m/%Y")).unwrap(), "01/06/2024");
        assert_eq!(ctx.to_time_string(NOW, Some("%I:%M %p")).unwrap(), "10:00 AM");
        assert_eq!(ctx.strftime(NOW, "%G-W%V %A").unwrap(), "2024-W22 Saturday");
        assert_eq!(ctx.strftime("2024-12-31", "%W %j").unwrap(), "53 366");
    }

    #[test]
    fn iso_year_directive() {
        let ctx = ctx();
        assert_eq!(ctx.strftime("2024-12-31", "%o-W%V").unwrap(), "2025-W01");
        assert_eq!(ctx.to_date_string(NOW, Some("%o/%Y")).unwrap(), "2024/2024");
        assert_eq!(ctx.strftime(NOW, "100%%o").unwrap(), "100%o");
        assert_eq!(
            ctx.strftime(NOW, "%o-%Q"),
            Err(Error::InvalidFormat("%o-%Q".into()))
        );
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert_eq!(
            ctx().to_date_string(NOW, Some("%Y-%Q")),
            Err(Error::InvalidFormat("%Y-%Q".into()))
        );
    }

    #[test]
    fn formatting_propagates_parse_errors() {
        assert!(matches!(
            ctx().to_atom_string("whenever"),
            Err(Error::UnparseableTime(_))
        ));
    }

    #[test]
    fn date_string_round_trips_through_parser() {
        let ctx = ctx().with_timezone(Madrid);
        let instant = ctx.to_instant("2024-02-29 21:45:00").unwrap();
        let text = ctx.to_date_string(instant, None).unwrap();
        let reparsed = ctx.to_instant(text.as_str()).unwrap();
        assert_eq!(ctx.to_date_string(reparsed, None).unwrap(), "2024-02-29");
        assert!(ctx.same_calendar_unit(reparsed, instant, crate::CalendarUnit::Day).unwrap());
    }

    #[test]
    fn relative_words() {
        let ctx = ctx();
        assert_eq!(ctx.relative_time_in_words(TimeLike::Now).unwrap(), "now");
        assert_eq!(ctx.relative_time_in_words("-2 hours").unwrap(), "2 hours ago");
        assert_eq!(ctx.relative_time_in_words("+3 days").unwrap(), "in 3 days");
        assert!(ctx.relative_time_in_words(i64::MIN).is_err());
    }
}
