//! The delimited text form of ranges and groups of ranges.
//!
//! A range serializes as `<minimum><SPLIT><maximum>`; a degenerate
//! range as just `<value>`. A group is range-strings joined by `GROUP`.
//! The "try" entry points are total: malformed input yields `None`,
//! never a panic, so batch parsing of many candidate strings is cheap.
//!
//! `SPLIT` doubles as the minus sign, so the text form is unambiguous
//! only for values that render without a sign; ranges over negative
//! values display fine but do not parse back.

use core::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::Domain;
use crate::range::Range;

/// Separates the segments of a single range.
pub const SPLIT: char = '-';

/// Separates the ranges of a group.
pub const GROUP: char = ',';

/// The typed face of the total "try" parsers, for `FromStr` callers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseRangeError {
    #[error("malformed range string")]
    Malformed,
    #[error("range minimum is greater than maximum")]
    Backwards,
    #[error("unrecognized unit segment")]
    UnknownUnit,
}

pub(crate) fn try_parse<T>(value: &str) -> Result<Range<T>, ParseRangeError>
where
    T: Domain + FromStr,
{
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseRangeError::Malformed);
    }
    match value.split_once(SPLIT) {
        None => {
            let point = value.parse().map_err(|_| ParseRangeError::Malformed)?;
            Ok(Range::point(point))
        }
        Some((minimum, maximum)) => {
            let minimum: T = minimum
                .trim()
                .parse()
                .map_err(|_| ParseRangeError::Malformed)?;
            let maximum: T = maximum
                .trim()
                .parse()
                .map_err(|_| ParseRangeError::Malformed)?;
            if !(minimum <= maximum) {
                return Err(ParseRangeError::Backwards);
            }
            Ok(Range::new(minimum, maximum))
        }
    }
}

/// Parses a single range string. Total: `None` on any malformed input,
/// including reversed bounds.
pub fn parse_range<T>(value: &str) -> Option<Range<T>>
where
    T: Domain + FromStr,
{
    try_parse(value).ok()
}

/// Parses a `GROUP`-joined group of range strings. Any malformed
/// member fails the whole group.
pub fn parse_group<T>(value: &str) -> Option<Vec<Range<T>>>
where
    T: Domain + FromStr,
{
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.split(GROUP).map(parse_range).collect()
}

pub fn is_well_formed_range<T>(value: &str) -> bool
where
    T: Domain + FromStr,
{
    parse_range::<T>(value).is_some()
}

pub fn is_well_formed_group<T>(value: &str) -> bool
where
    T: Domain + FromStr,
{
    parse_group::<T>(value).is_some()
}

/// Joins ranges into the group text form.
pub fn format_group<T>(ranges: &[Range<T>]) -> String
where
    T: Domain + fmt::Display,
{
    let mut out = String::new();
    for (i, range) in ranges.iter().enumerate() {
        if i > 0 {
            out.push(GROUP);
        }
        out.push_str(&range.to_string());
    }
    out
}

impl<T> fmt::Display for Range<T>
where
    T: Domain + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            Ok(())
        } else if self.is_range() {
            write!(f, "{}{}{}", self.minimum(), SPLIT, self.maximum())
        } else {
            write!(f, "{}", self.value())
        }
    }
}

impl<T> FromStr for Range<T>
where
    T: Domain + FromStr,
{
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        try_parse(s)
    }
}
