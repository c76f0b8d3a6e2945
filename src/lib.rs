// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time Utilities
//!
//! Small, stateless helpers for classifying points in time and rendering
//! values as strings.
//!
//! # Core types
//!
//! - [`TimeContext`] — default timezone + clock, threaded through every time query.
//! - [`TimeLike`] — anything that resolves to an instant (now, seconds, date/time, text).
//! - [`CalendarUnit`] — day / ISO week / month / year label used for comparisons.
//! - [`PhoneFormat`] — one masking pattern, or [`PhonePatterns`] keyed by digit count.
//! - [`Error`] — failure of a parse, timezone lookup or strftime pattern.
//!
//! # Time queries
//!
//! | Method | True when `t` … |
//! |--------|-----------------|
//! | [`is_today`](TimeContext::is_today) | has today's date |
//! | [`is_tomorrow`](TimeContext::is_tomorrow) | has tomorrow's date |
//! | [`is_this_week`](TimeContext::is_this_week) | is in the current ISO week |
//! | [`is_this_month`](TimeContext::is_this_month) | is in the current month |
//! | [`is_this_year`](TimeContext::is_this_year) | is in the current year |
//! | [`was_yesterday`](TimeContext::was_yesterday) | has yesterday's date |
//! | [`was_last_week`](TimeContext::was_last_week) | is in the previous ISO week |
//! | [`was_last_month`](TimeContext::was_last_month) | is in the previous month |
//! | [`was_last_year`](TimeContext::was_last_year) | is in the previous year |
//! | [`is_within_next`](TimeContext::is_within_next) | is between now and a later time-like bound |
//! | [`was_within_last`](TimeContext::was_within_last) | is between an earlier time-like bound and now |
//!
//! # Formatting
//!
//! Dates: [`to_atom_string`](TimeContext::to_atom_string),
//! [`to_rss_string`](TimeContext::to_rss_string),
//! [`to_http_string`](TimeContext::to_http_string),
//! [`to_date_string`](TimeContext::to_date_string),
//! [`to_time_string`](TimeContext::to_time_string),
//! [`to_date_time_string`](TimeContext::to_date_time_string),
//! [`relative_time_in_words`](TimeContext::relative_time_in_words).
//!
//! Masks: [`mask_format`], [`format_phone`], [`format_ssn`].
//!
//! # Quick example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use tempofmt::{format_phone, PhoneFormat, TimeContext};
//!
//! let ctx = TimeContext::utc().with_fixed_now(Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap());
//!
//! assert!(ctx.is_tomorrow("2024-06-02 08:00:00")?);
//! assert_eq!(ctx.to_http_string("yesterday")?, "Fri, 31 May 2024 00:00:00 GMT");
//! assert_eq!(format_phone("555.123.4567", &PhoneFormat::from("(###) ###-####")), "(555) 123-4567");
//! # Ok::<(), tempofmt::Error>(())
//! ```

mod context;
mod error;
mod format;
mod mask;
mod parse;
mod time;
mod time_like;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use context::{ClockSource, TimeContext, TZ_ENV};
pub use error::{Error, Result};
pub use format::{DATE_FORMAT, DATE_TIME_FORMAT, HTTP_FORMAT, RSS_FORMAT, TIME_FORMAT};
pub use mask::{format_phone, format_ssn, mask_format, PhoneFormat, PhonePatterns, MASK, REVEAL};
pub use time::{CalendarUnit, DAY, HOUR, MINUTE, WEEK};
pub use time_like::TimeLike;

pub use chrono_tz::Tz;
