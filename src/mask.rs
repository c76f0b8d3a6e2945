// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Positional placeholder masking for phone numbers, SSNs, card numbers, ...
//!
//! A pattern mixes literal characters with two placeholders:
//!
//! - `#` reveals the next unconsumed input character,
//! - `*` consumes the next input character and renders a literal `*`.
//!
//! Substitution is positional: the output always has exactly as many
//! characters as the pattern. Once the input runs out, the remaining
//! placeholders are left as they are.
//!
//! ```
//! use tempofmt::mask_format;
//!
//! assert_eq!(mask_format(1234567890, "(###) ###-####"), "(123) 456-7890");
//! assert_eq!(mask_format("1234567890123456", "****-****-####-####"), "****-****-9012-3456");
//! assert_eq!(mask_format("12", "###-###"), "12#-###");
//! ```

use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reveals the next input character.
pub const REVEAL: char = '#';
/// Consumes the next input character and hides it.
pub const MASK: char = '*';

/// Substitute `value`'s characters into the placeholders of `pattern`.
///
/// Characters, not bytes, are the unit on both sides.
pub fn mask_format(value: impl Display, pattern: &str) -> String {
    let value = value.to_string();
    let mut input = value.chars();

    pattern
        .chars()
        .map(|c| match c {
            REVEAL | MASK => match input.next() {
                Some(v) if c == REVEAL => v,
                Some(_) => MASK,
                None => c,
            },
            literal => literal,
        })
        .collect()
}

/// Patterns selected by how many digits a phone number has.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhonePatterns {
    /// Fewer than 10 digits, e.g. `###-####`.
    pub local: String,
    /// Exactly 10 digits, e.g. `(###) ###-####`.
    pub national: String,
    /// 11 digits or more, e.g. `# (###) ###-####`.
    pub international: String,
}

impl PhonePatterns {
    /// Patterns for local, national and international numbers, in that order.
    pub fn new(
        local: impl Into<String>,
        national: impl Into<String>,
        international: impl Into<String>,
    ) -> Self {
        Self {
            local: local.into(),
            national: national.into(),
            international: international.into(),
        }
    }

    /// Pattern for a number with `digits` digits.
    pub fn select(&self, digits: usize) -> &str {
        match digits {
            11.. => &self.international,
            10 => &self.national,
            _ => &self.local,
        }
    }
}

/// Either one pattern for every number, or one per digit-count bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PhoneFormat {
    /// One pattern whatever the number of digits.
    Single(String),
    /// Pattern chosen by [`PhonePatterns::select`].
    ByDigitCount(PhonePatterns),
}

impl PhoneFormat {
    fn pattern_for(&self, digits: usize) -> &str {
        match self {
            PhoneFormat::Single(pattern) => pattern,
            PhoneFormat::ByDigitCount(patterns) => patterns.select(digits),
        }
    }
}

impl From<&str> for PhoneFormat {
    fn from(pattern: &str) -> Self {
        PhoneFormat::Single(pattern.to_owned())
    }
}

impl From<String> for PhoneFormat {
    fn from(pattern: String) -> Self {
        PhoneFormat::Single(pattern)
    }
}

impl From<PhonePatterns> for PhoneFormat {
    fn from(patterns: PhonePatterns) -> Self {
        PhoneFormat::ByDigitCount(patterns)
    }
}

/// Keep the ASCII digits of `value`, then mask them into the selected pattern.
///
/// A value without digits leaves every placeholder untouched.
pub fn format_phone(value: impl Display, format: &PhoneFormat) -> String {
    let digits: String = value
        .to_string()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    mask_format(&digits, format.pattern_for(digits.len()))
}

/// Mask a social security number; a plain alias of [`mask_format`].
pub fn format_ssn(value: impl Display, pattern: &str) -> String {
    mask_format(value, pattern)
}
