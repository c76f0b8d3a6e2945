// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Failures raised while resolving, classifying or formatting time values.
///
/// Masking never fails; only operations that touch the date parser, the
/// timezone database or a strftime pattern return this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A string could not be resolved to an instant.
    #[error("unparseable time string: '{0}'")]
    UnparseableTime(String),

    /// A timezone name is not in the IANA database.
    #[error("invalid timezone: '{0}'")]
    InvalidTimezone(String),

    /// A strftime-style pattern contains an unknown directive.
    #[error("invalid format pattern: '{0}'")]
    InvalidFormat(String),

    /// The instant cannot be represented as a calendar date.
    #[error("instant out of range: {0}")]
    OutOfRange(i64),

    /// Subtracting the second instant from the first overflows `i64` seconds.
    #[error("difference overflows: {0} - {1}")]
    DifferenceOverflow(i64, i64),
}

pub type Result<T> = std::result::Result<T, Error>;
