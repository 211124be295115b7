use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDateTime};

use crate::grammar::{ParseRangeError, GROUP, SPLIT};
use crate::range::Range;

#[cfg(feature = "serde1")]
use serde::{
    de::{Deserialize, Deserializer, Error as DeError, SeqAccess, Visitor},
    ser::{Serialize, SerializeSeq, Serializer},
};

/// The granularity at which a [`DateRange`]'s shift and inflate
/// operations are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl DateUnit {
    pub const ALL: [DateUnit; 7] = [
        DateUnit::Millisecond,
        DateUnit::Second,
        DateUnit::Minute,
        DateUnit::Hour,
        DateUnit::Day,
        DateUnit::Month,
        DateUnit::Year,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DateUnit::Millisecond => "millisecond",
            DateUnit::Second => "second",
            DateUnit::Minute => "minute",
            DateUnit::Hour => "hour",
            DateUnit::Day => "day",
            DateUnit::Month => "month",
            DateUnit::Year => "year",
        }
    }
}

impl fmt::Display for DateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateUnit {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DateUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str().eq_ignore_ascii_case(s))
            .ok_or(ParseRangeError::UnknownUnit)
    }
}

/// The serialized form of the date segments: digits and a dot only, so
/// the [`SPLIT`]/[`GROUP`] delimiters stay unambiguous. Serialized
/// precision is milliseconds, the finest [`DateUnit`]. Years outside
/// 1–9999 are not representable in this text form (parsing them fails
/// cleanly).
pub const DATE_FORMAT: &str = "%Y%m%d%H%M%S%.3f";

// Whole-millisecond factors for the fixed-length units.
const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

// Average Gregorian month and year, for converting a `Duration` into
// a whole number of calendar units.
const DAYS_PER_MONTH: f64 = 30.436875;
const DAYS_PER_YEAR: f64 = 365.2425;

/// `t` advanced by `amount` units, clamped to the representable
/// bounds of `NaiveDateTime` instead of overflowing. Month and year
/// steps follow calendar rules (a day-of-month that does not exist in
/// the target month clamps to its last day).
fn add_units_clamped(t: NaiveDateTime, unit: DateUnit, amount: i64) -> NaiveDateTime {
    if amount == 0 {
        return t;
    }
    let clamped = |shifted: Option<NaiveDateTime>| {
        shifted.unwrap_or(if amount > 0 {
            NaiveDateTime::MAX
        } else {
            NaiveDateTime::MIN
        })
    };
    match unit {
        DateUnit::Millisecond => clamped(add_fixed(t, amount, 1)),
        DateUnit::Second => clamped(add_fixed(t, amount, MILLIS_PER_SECOND)),
        DateUnit::Minute => clamped(add_fixed(t, amount, MILLIS_PER_MINUTE)),
        DateUnit::Hour => clamped(add_fixed(t, amount, MILLIS_PER_HOUR)),
        DateUnit::Day => clamped(add_fixed(t, amount, MILLIS_PER_DAY)),
        DateUnit::Month => clamped(add_months(t, amount)),
        DateUnit::Year => clamped(add_months(t, amount.saturating_mul(12))),
    }
}

fn add_fixed(t: NaiveDateTime, amount: i64, millis_per_unit: i64) -> Option<NaiveDateTime> {
    let millis = amount.checked_mul(millis_per_unit)?;
    t.checked_add_signed(Duration::milliseconds(millis))
}

fn add_months(t: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    if months >= 0 {
        let months = u32::try_from(months).ok()?;
        t.checked_add_months(Months::new(months))
    } else {
        let months = u32::try_from(months.unsigned_abs()).ok()?;
        t.checked_sub_months(Months::new(months))
    }
}

fn duration_in_units(duration: Duration, unit: DateUnit) -> i64 {
    match unit {
        DateUnit::Millisecond => duration.num_milliseconds(),
        DateUnit::Second => duration.num_seconds(),
        DateUnit::Minute => duration.num_minutes(),
        DateUnit::Hour => duration.num_hours(),
        DateUnit::Day => duration.num_days(),
        DateUnit::Month => (duration.num_days() as f64 / DAYS_PER_MONTH) as i64,
        DateUnit::Year => (duration.num_days() as f64 / DAYS_PER_YEAR) as i64,
    }
}

/// A [`Range`] over calendar time, carrying the [`DateUnit`] that its
/// shift and inflate vocabulary operates in.
///
/// The unit is fixed at construction. Containment, overlap, merging
/// and set difference reuse the core range semantics unchanged
/// (adjacency is at millisecond granularity, the discrete step of the
/// date domain); only the arithmetic vocabulary is calendar-specific.
/// Results of `union`/`exclude` carry the left operand's unit.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    inner: Range<NaiveDateTime>,
    unit: DateUnit,
}

impl DateRange {
    /// Makes a new date range over `[minimum, maximum]`.
    ///
    /// # Panics
    ///
    /// Panics if `minimum > maximum`.
    pub fn new(minimum: NaiveDateTime, maximum: NaiveDateTime, unit: DateUnit) -> Self {
        DateRange {
            inner: Range::new(minimum, maximum),
            unit,
        }
    }

    /// Makes a degenerate range holding the single instant `entry`.
    pub fn point(entry: NaiveDateTime, unit: DateUnit) -> Self {
        DateRange {
            inner: Range::point(entry),
            unit,
        }
    }

    /// Makes a range covering all representable time.
    pub fn full(unit: DateUnit) -> Self {
        DateRange {
            inner: Range::full(),
            unit,
        }
    }

    pub fn empty(unit: DateUnit) -> Self {
        DateRange {
            inner: Range::empty(),
            unit,
        }
    }

    pub fn unit(&self) -> DateUnit {
        self.unit
    }

    /// The unit-less view of the range.
    pub fn as_range(&self) -> &Range<NaiveDateTime> {
        &self.inner
    }

    pub fn minimum(&self) -> NaiveDateTime {
        self.inner.minimum()
    }

    pub fn maximum(&self) -> NaiveDateTime {
        self.inner.maximum()
    }

    pub fn value(&self) -> NaiveDateTime {
        self.inner.value()
    }

    pub fn set_minimum(&mut self, minimum: NaiveDateTime) {
        self.inner.set_minimum(minimum);
    }

    pub fn set_maximum(&mut self, maximum: NaiveDateTime) {
        self.inner.set_maximum(maximum);
    }

    pub fn set_value(&mut self, value: NaiveDateTime) {
        self.inner.set_value(value);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_range(&self) -> bool {
        self.inner.is_range()
    }

    pub fn is_iterable(&self) -> bool {
        self.inner.is_iterable()
    }

    pub fn has_one(&self) -> bool {
        self.inner.has_one()
    }

    pub fn has_many(&self) -> bool {
        self.inner.has_many()
    }

    pub fn contains(&self, value: NaiveDateTime) -> bool {
        self.inner.contains(value)
    }

    pub fn contains_range(&self, other: &DateRange) -> bool {
        self.inner.contains_range(&other.inner)
    }

    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.inner.overlaps(&other.inner)
    }

    pub fn is_previous_to(&self, other: &DateRange) -> bool {
        self.inner.is_previous_to(&other.inner)
    }

    pub fn is_next_to(&self, other: &DateRange) -> bool {
        self.inner.is_next_to(&other.inner)
    }

    /// Union in place; see [`Range::merge`]. The unit is unaffected.
    pub fn merge(&mut self, other: &DateRange) -> bool {
        self.inner.merge(&other.inner)
    }

    /// Pure union; the result carries `self`'s unit.
    pub fn union(&self, other: &DateRange) -> Option<DateRange> {
        self.inner.union(&other.inner).map(|inner| DateRange {
            inner,
            unit: self.unit,
        })
    }

    /// Set difference; see [`Range::exclude`]. The pieces carry
    /// `self`'s unit.
    pub fn exclude(&self, other: &DateRange) -> Vec<DateRange> {
        self.inner
            .exclude(&other.inner)
            .into_iter()
            .map(|inner| DateRange {
                inner,
                unit: self.unit,
            })
            .collect()
    }

    /// Translates both bounds by `amount` units of `self.unit`, each
    /// independently clamped to the representable bounds of the date
    /// domain.
    pub fn shift_by(&mut self, amount: i64) {
        if amount == 0 || self.is_empty() {
            return;
        }
        let minimum = add_units_clamped(self.minimum(), self.unit, amount);
        let maximum = add_units_clamped(self.maximum(), self.unit, amount);
        self.inner.set_minimum(minimum);
        self.inner.set_maximum(maximum);
    }

    /// Pure variant of [`shift_by`](DateRange::shift_by).
    pub fn shifted_by(&self, amount: i64) -> DateRange {
        let mut range = *self;
        range.shift_by(amount);
        range
    }

    /// Grows the range by `amount` units of `self.unit` on each side,
    /// clamped at the domain bounds. Negative `amount` shrinks;
    /// over-shrinking collapses to a single instant.
    pub fn inflate_by(&mut self, amount: i64) {
        if amount == 0 || self.is_empty() {
            return;
        }
        let minimum = add_units_clamped(self.minimum(), self.unit, amount.saturating_neg());
        let maximum = add_units_clamped(self.maximum(), self.unit, amount);
        self.inner.set_minimum(minimum);
        self.inner.set_maximum(maximum);
    }

    /// Pure variant of [`inflate_by`](DateRange::inflate_by).
    pub fn inflated_by(&self, amount: i64) -> DateRange {
        let mut range = *self;
        range.inflate_by(amount);
        range
    }

    /// Grows the range by one unit on each side.
    pub fn inflate(&mut self) {
        self.inflate_by(1);
    }

    /// Shrinks the range by one unit on each side.
    pub fn deflate(&mut self) {
        self.inflate_by(-1);
    }

    /// [`shift_by`](DateRange::shift_by), with the amount taken as the
    /// whole number of `self.unit`s in `duration` (average Gregorian
    /// month/year lengths for the calendar units).
    pub fn shift_by_duration(&mut self, duration: Duration) {
        self.shift_by(duration_in_units(duration, self.unit));
    }

    /// [`inflate_by`](DateRange::inflate_by), with the amount taken as
    /// the whole number of `self.unit`s in `duration`.
    pub fn inflate_by_duration(&mut self, duration: Duration) {
        self.inflate_by(duration_in_units(duration, self.unit));
    }

    /// A lazy iterator over the range, one `self.unit` step at a time,
    /// starting from the minimum.
    pub fn iter(&self) -> DateRangeIter {
        DateRangeIter {
            next: if self.is_empty() {
                None
            } else {
                Some(self.minimum())
            },
            maximum: self.maximum(),
            unit: self.unit,
        }
    }

    /// Parses `<min>-<max>-<unit>`, `<min>-<max>` (taking
    /// `default_unit`) or a bare `<value>` point. Total: `None` on any
    /// malformed input.
    pub fn parse(value: &str, default_unit: DateUnit) -> Option<DateRange> {
        DateRange::try_parse(value, default_unit).ok()
    }

    /// Parses a [`GROUP`]-joined group of date range strings. Any
    /// malformed member fails the whole group.
    pub fn parse_group(value: &str, default_unit: DateUnit) -> Option<Vec<DateRange>> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        value
            .split(GROUP)
            .map(|part| DateRange::parse(part, default_unit))
            .collect()
    }

    pub fn is_well_formed_range(value: &str) -> bool {
        DateRange::parse(value, DateUnit::Millisecond).is_some()
    }

    pub fn is_well_formed_group(value: &str) -> bool {
        DateRange::parse_group(value, DateUnit::Millisecond).is_some()
    }

    fn try_parse(value: &str, default_unit: DateUnit) -> Result<DateRange, ParseRangeError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ParseRangeError::Malformed);
        }
        let parts: Vec<&str> = value.split(SPLIT).collect();
        match parts.as_slice() {
            [point] => Ok(DateRange::point(parse_date(point)?, default_unit)),
            [minimum, maximum] => {
                DateRange::from_parts(parse_date(minimum)?, parse_date(maximum)?, default_unit)
            }
            [minimum, maximum, unit] => DateRange::from_parts(
                parse_date(minimum)?,
                parse_date(maximum)?,
                unit.parse()?,
            ),
            _ => Err(ParseRangeError::Malformed),
        }
    }

    fn from_parts(
        minimum: NaiveDateTime,
        maximum: NaiveDateTime,
        unit: DateUnit,
    ) -> Result<DateRange, ParseRangeError> {
        if minimum > maximum {
            return Err(ParseRangeError::Backwards);
        }
        Ok(DateRange::new(minimum, maximum, unit))
    }
}

fn parse_date(value: &str) -> Result<NaiveDateTime, ParseRangeError> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ParseRangeError::Malformed)
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            Ok(())
        } else if self.is_range() {
            write!(
                f,
                "{}{}{}{}{}",
                self.minimum().format(DATE_FORMAT),
                SPLIT,
                self.maximum().format(DATE_FORMAT),
                SPLIT,
                self.unit
            )
        } else {
            write!(f, "{}", self.value().format(DATE_FORMAT))
        }
    }
}

impl FromStr for DateRange {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateRange::try_parse(s, DateUnit::Millisecond)
    }
}

// The comparer orders by the domain tag first, then minimum, then
// maximum; the cursor is excluded, exactly as for `Range`.

impl PartialEq for DateRange {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && self.inner == other.inner
    }
}

impl Eq for DateRange {}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        self.unit
            .cmp(&other.unit)
            .then_with(|| self.inner.cmp(&other.inner))
    }
}

impl Hash for DateRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unit.hash(state);
        self.inner.hash(state);
    }
}

/// Lazy unit-step iterator over a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DateRangeIter {
    next: Option<NaiveDateTime>,
    maximum: NaiveDateTime,
    unit: DateUnit,
}

impl Iterator for DateRangeIter {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<NaiveDateTime> {
        let current = self.next.take()?;
        let successor = add_units_clamped(current, self.unit, 1);
        // The clamp can stall at the domain edge; a non-advancing
        // successor ends iteration rather than looping forever.
        if successor > current && successor <= self.maximum {
            self.next = Some(successor);
        }
        Some(current)
    }
}

#[cfg(feature = "serde1")]
impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // `[unit]` for the empty sentinel; otherwise
        // `[unit, minimum, maximum, value]`.
        if self.is_empty() {
            let mut seq = serializer.serialize_seq(Some(1))?;
            seq.serialize_element(self.unit.as_str())?;
            seq.end()
        } else {
            let mut seq = serializer.serialize_seq(Some(4))?;
            seq.serialize_element(self.unit.as_str())?;
            seq.serialize_element(&self.minimum())?;
            seq.serialize_element(&self.maximum())?;
            seq.serialize_element(&self.value())?;
            seq.end()
        }
    }
}

#[cfg(feature = "serde1")]
impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(DateRangeVisitor)
    }
}

#[cfg(feature = "serde1")]
struct DateRangeVisitor;

#[cfg(feature = "serde1")]
impl<'de> Visitor<'de> for DateRangeVisitor {
    type Value = DateRange;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("DateRange")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let unit: String = access
            .next_element()?
            .ok_or_else(|| A::Error::custom("date range unit missing"))?;
        let unit: DateUnit = unit.parse().map_err(A::Error::custom)?;
        let Some(minimum) = access.next_element::<NaiveDateTime>()? else {
            return Ok(DateRange::empty(unit));
        };
        let maximum: NaiveDateTime = access
            .next_element()?
            .ok_or_else(|| A::Error::custom("date range maximum missing"))?;
        let mut range = DateRange::from_parts(minimum, maximum, unit).map_err(A::Error::custom)?;
        if let Some(value) = access.next_element::<NaiveDateTime>()? {
            range.set_value(value);
        }
        Ok(range)
    }
}
