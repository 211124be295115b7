use core::fmt;
use core::mem;
use std::str::FromStr;

use crate::domain::{Domain, StepLite};
use crate::grammar;
use crate::range::Range;

#[cfg(feature = "serde1")]
use core::marker::PhantomData;
#[cfg(feature = "serde1")]
use serde::{
    de::{Deserialize, Deserializer, SeqAccess, Visitor},
    ser::{Serialize, SerializeSeq, Serializer},
};

/// An ordered sequence of ranges with no uniqueness or disjointness
/// requirement on input.
///
/// [`simplify`](RangeCollection::simplify) coalesces the contents into
/// the minimal sorted set of disjoint, non-adjacent ranges covering the
/// same values.
#[derive(Debug, Clone)]
pub struct RangeCollection<T> {
    ranges: Vec<Range<T>>,
}

impl<T> PartialEq for RangeCollection<T>
where
    T: Domain,
{
    fn eq(&self, other: &Self) -> bool {
        self.ranges == other.ranges
    }
}

impl<T> Eq for RangeCollection<T> where T: Domain + Eq {}

impl<T> Default for RangeCollection<T> {
    fn default() -> Self {
        RangeCollection { ranges: Vec::new() }
    }
}

impl<T> RangeCollection<T>
where
    T: Domain,
{
    /// Makes a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, range: Range<T>) {
        self.ranges.push(range);
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Range<T>> {
        self.ranges.iter()
    }

    pub fn as_slice(&self) -> &[Range<T>] {
        &self.ranges
    }

    /// Whether any member contains the value.
    pub fn contains(&self, value: T) -> bool {
        self.ranges.iter().any(|range| range.contains(value))
    }
}

impl<T> RangeCollection<T>
where
    T: Domain + FromStr,
{
    /// Parses a `GROUP`-joined group of range strings. Total: `None`
    /// on any malformed member.
    pub fn parse(value: &str) -> Option<Self> {
        grammar::parse_group(value).map(|ranges| RangeCollection { ranges })
    }
}

impl<T> RangeCollection<T>
where
    T: Domain + StepLite + Ord,
{
    /// Coalesces the collection into the minimal set of disjoint
    /// ranges covering the same values: sort by minimum (ties broken
    /// by maximum), then sweep left to right merging every range that
    /// overlaps or is immediately adjacent the running accumulator.
    ///
    /// Empty sentinels are dropped. Afterwards the collection is
    /// sorted ascending, pairwise non-overlapping and non-adjacent.
    pub fn simplify(&mut self) {
        self.ranges.retain(|range| !range.is_empty());
        if self.ranges.len() < 2 {
            return;
        }
        self.ranges.sort();

        let mut simplified = Vec::with_capacity(self.ranges.len());
        let mut drained = mem::take(&mut self.ranges).into_iter();
        let Some(mut current) = drained.next() else {
            return;
        };
        for next in drained {
            // `merge` covers both overlap and adjacency; failure means
            // the accumulated range is final.
            if !current.merge(&next) {
                simplified.push(current);
                current = next;
            }
        }
        simplified.push(current);
        self.ranges = simplified;
    }
}

impl<T> FromIterator<Range<T>> for RangeCollection<T>
where
    T: Domain,
{
    fn from_iter<I: IntoIterator<Item = Range<T>>>(iter: I) -> Self {
        RangeCollection {
            ranges: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<Range<T>> for RangeCollection<T>
where
    T: Domain,
{
    fn extend<I: IntoIterator<Item = Range<T>>>(&mut self, iter: I) {
        self.ranges.extend(iter);
    }
}

impl<T> From<Vec<Range<T>>> for RangeCollection<T>
where
    T: Domain,
{
    fn from(ranges: Vec<Range<T>>) -> Self {
        RangeCollection { ranges }
    }
}

impl<T> IntoIterator for RangeCollection<T> {
    type Item = Range<T>;
    type IntoIter = std::vec::IntoIter<Range<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RangeCollection<T> {
    type Item = &'a Range<T>;
    type IntoIter = std::slice::Iter<'a, Range<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

impl<T> fmt::Display for RangeCollection<T>
where
    T: Domain + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&grammar::format_group(&self.ranges))
    }
}

#[cfg(feature = "serde1")]
impl<T> Serialize for RangeCollection<T>
where
    T: Domain + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.ranges.len()))?;
        for range in &self.ranges {
            seq.serialize_element(range)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde1")]
impl<'de, T> Deserialize<'de> for RangeCollection<T>
where
    T: Domain + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RangeCollectionVisitor::new())
    }
}

#[cfg(feature = "serde1")]
struct RangeCollectionVisitor<T> {
    marker: PhantomData<fn() -> RangeCollection<T>>,
}

#[cfg(feature = "serde1")]
impl<T> RangeCollectionVisitor<T> {
    fn new() -> Self {
        RangeCollectionVisitor {
            marker: PhantomData,
        }
    }
}

#[cfg(feature = "serde1")]
impl<'de, T> Visitor<'de> for RangeCollectionVisitor<T>
where
    T: Domain + Deserialize<'de>,
{
    type Value = RangeCollection<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("RangeCollection")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut collection = RangeCollection::default();
        while let Some(range) = access.next_element()? {
            collection.ranges.push(range);
        }
        Ok(collection)
    }
}
