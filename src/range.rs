use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::domain::{ClampedArith, Domain, StepLite};
use crate::lister::{IndexError, RangeLister};

#[cfg(feature = "serde1")]
use core::marker::PhantomData;
#[cfg(feature = "serde1")]
use serde::{
    de::{Deserialize, Deserializer, Error as DeError, SeqAccess, Visitor},
    ser::{Serialize, SerializeSeq, Serializer},
};

/// Returns `a` if `b` is not comparable.
pub(crate) fn pmin<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

/// Returns `a` if `b` is not comparable.
pub(crate) fn pmax<T: PartialOrd + Copy>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

/// A closed interval `[minimum, maximum]` over an ordered, bounded
/// scalar domain, carrying a cursor value inside the interval.
///
/// A `Range` is an independent value: it owns its bounds and cursor and
/// holds no references to other ranges. The invariant `minimum <= maximum`
/// holds after every operation; the designated _empty_ sentinel
/// (see [`Range::empty`]) is the only state that represents "no values".
///
/// Equality, ordering and hashing consider the bounds (and the sentinel
/// flag) only — the cursor is deliberately excluded, so two ranges over
/// the same interval compare equal no matter where their cursors sit.
#[derive(Debug, Clone, Copy)]
pub struct Range<T> {
    minimum: T,
    maximum: T,
    value: T,
    empty: bool,
}

impl<T> Range<T>
where
    T: Domain,
{
    /// Makes a new range over `[minimum, maximum]`.
    ///
    /// The cursor starts at `minimum`.
    ///
    /// # Panics
    ///
    /// Panics if `minimum > maximum`.
    pub fn new(minimum: T, maximum: T) -> Self {
        // Backwards ranges don't make sense, and we don't want weird
        // explosions further down if someone gives us such a range.
        assert!(
            minimum <= maximum,
            "range minimum can not be greater than maximum"
        );
        Range {
            minimum,
            maximum,
            value: minimum,
            empty: false,
        }
    }

    /// Makes a degenerate range holding the single value `entry`.
    pub fn point(entry: T) -> Self {
        Range {
            minimum: entry,
            maximum: entry,
            value: entry,
            empty: false,
        }
    }

    /// Makes a range covering the whole domain.
    pub fn full() -> Self {
        Range::new(T::min_value(), T::max_value())
    }

    /// Makes the empty sentinel range: no values, both bounds parked at
    /// the domain minimum.
    pub fn empty() -> Self {
        Range {
            minimum: T::min_value(),
            maximum: T::min_value(),
            value: T::min_value(),
            empty: true,
        }
    }

    pub fn minimum(&self) -> T {
        self.minimum
    }

    pub fn maximum(&self) -> T {
        self.maximum
    }

    /// The cursor value. Always within `[minimum, maximum]`.
    pub fn value(&self) -> T {
        self.value
    }

    /// Moves the lower bound. If the new minimum passes the current
    /// maximum, the maximum is dragged along so the bounds invariant
    /// holds. The cursor is re-clamped. Ignored on the empty sentinel.
    pub fn set_minimum(&mut self, minimum: T) {
        if self.empty {
            return;
        }
        self.minimum = minimum;
        if self.maximum < minimum {
            self.maximum = minimum;
        }
        self.value = self.clamp(self.value);
    }

    /// Moves the upper bound, dragging the minimum along if it would be
    /// passed. The cursor is re-clamped. Ignored on the empty sentinel.
    pub fn set_maximum(&mut self, maximum: T) {
        if self.empty {
            return;
        }
        self.maximum = maximum;
        if self.minimum > maximum {
            self.minimum = maximum;
        }
        self.value = self.clamp(self.value);
    }

    /// Moves the cursor, clamped into `[minimum, maximum]`.
    /// Ignored on the empty sentinel.
    pub fn set_value(&mut self, value: T) {
        if self.empty {
            return;
        }
        self.value = self.clamp(value);
    }

    /// `true` for the sentinel "no value" construction.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// `true` when the range spans more than a single value.
    pub fn is_range(&self) -> bool {
        !self.empty && self.minimum != self.maximum
    }

    pub fn has_one(&self) -> bool {
        !self.empty && self.minimum == self.maximum
    }

    pub fn has_many(&self) -> bool {
        self.is_range()
    }

    /// Forces `value` into `[minimum, maximum]`. Returns the minimum
    /// for the empty sentinel.
    pub fn clamp(&self, value: T) -> T {
        if self.empty || value < self.minimum {
            self.minimum
        } else if value > self.maximum {
            self.maximum
        } else {
            value
        }
    }

    /// `minimum <= value <= maximum`.
    pub fn contains(&self, value: T) -> bool {
        !self.empty && value >= self.minimum && value <= self.maximum
    }

    /// Whether `other` lies entirely within this range.
    pub fn contains_range(&self, other: &Range<T>) -> bool {
        !self.empty
            && !other.empty
            && other.minimum >= self.minimum
            && other.maximum <= self.maximum
    }

    /// Closed-interval intersection test.
    pub fn overlaps(&self, other: &Range<T>) -> bool {
        !self.empty
            && !other.empty
            && self.minimum <= other.maximum
            && other.minimum <= self.maximum
    }
}

impl<T> Range<T>
where
    T: ClampedArith,
{
    /// Translates both bounds by `steps`, each independently clamped
    /// against the domain bounds; a bound already at the domain edge
    /// stays put instead of wrapping. The cursor is re-clamped.
    pub fn shift_by(&mut self, steps: T) {
        if self.empty || steps == T::zero() {
            return;
        }
        // Clamped translation is monotonic, so the bounds can't cross.
        self.minimum = self.minimum.clamped_add(steps);
        self.maximum = self.maximum.clamped_add(steps);
        self.value = self.clamp(self.value);
    }

    /// Pure variant of [`shift_by`](Range::shift_by).
    pub fn shifted_by(&self, steps: T) -> Self {
        let mut range = *self;
        range.shift_by(steps);
        range
    }

    /// Grows the interval symmetrically: the minimum moves down by
    /// `steps` and the maximum up, each independently clamped at the
    /// domain bounds. Negative `steps` shrink instead; shrinking past
    /// the point where the bounds meet collapses the range to a single
    /// value.
    pub fn inflate_by(&mut self, steps: T) {
        if self.empty || steps == T::zero() {
            return;
        }
        let minimum = self.minimum.clamped_sub(steps);
        let maximum = self.maximum.clamped_add(steps);
        self.set_minimum(minimum);
        self.set_maximum(maximum);
    }

    /// Pure variant of [`inflate_by`](Range::inflate_by).
    pub fn inflated_by(&self, steps: T) -> Self {
        let mut range = *self;
        range.inflate_by(steps);
        range
    }
}

impl<T> Range<T>
where
    T: Domain + StepLite,
{
    /// `true` when the range holds at least one discrete value that
    /// iteration can produce.
    pub fn is_iterable(&self) -> bool {
        !self.empty
    }

    /// Whether the immediate successor of this range's maximum is
    /// `other`'s minimum.
    ///
    /// Guards the successor computation at the domain edge: a range
    /// ending at the domain maximum precedes nothing.
    pub fn is_previous_to(&self, other: &Range<T>) -> bool {
        !self.empty
            && !other.empty
            && self.maximum != T::max_value()
            && self.maximum.add_one() == other.minimum
    }

    /// Symmetric adjacency test using the predecessor of this range's
    /// minimum.
    pub fn is_next_to(&self, other: &Range<T>) -> bool {
        !self.empty
            && !other.empty
            && self.minimum != T::min_value()
            && self.minimum.sub_one() == other.maximum
    }

    /// Union in place. Succeeds only when the union is itself
    /// representable as a single interval: `other` is empty or already
    /// contained, the two overlap, or they are immediately adjacent.
    /// Returns `false` (leaving `self` unchanged) for disjoint,
    /// non-adjacent ranges — the caller must keep both.
    pub fn merge(&mut self, other: &Range<T>) -> bool {
        if other.empty || self.contains_range(other) {
            return true;
        }
        if self.empty {
            *self = *other;
            return true;
        }
        if self.overlaps(other) {
            let minimum = pmin(self.minimum, other.minimum);
            let maximum = pmax(self.maximum, other.maximum);
            self.set_minimum(minimum);
            self.set_maximum(maximum);
            return true;
        }
        if self.is_previous_to(other) {
            self.set_maximum(other.maximum);
            return true;
        }
        if self.is_next_to(other) {
            self.set_minimum(other.minimum);
            return true;
        }
        false
    }

    /// Pure variant of [`merge`](Range::merge): `None` when the union
    /// is not a single interval.
    pub fn union(&self, other: &Range<T>) -> Option<Range<T>> {
        let mut range = *self;
        if range.merge(other) {
            Some(range)
        } else {
            None
        }
    }

    /// Set difference, yielding 0, 1 or 2 pieces.
    ///
    /// The surviving pieces stop one discrete step short of `other`:
    /// `[1,10].exclude([4,6])` is `{[1,3], [7,10]}`. If the two don't
    /// overlap the result is `self` unchanged; if `other` covers `self`
    /// entirely the result is empty.
    pub fn exclude(&self, other: &Range<T>) -> Vec<Range<T>> {
        if self.empty {
            return Vec::new();
        }
        if other.empty || !self.overlaps(other) {
            return vec![*self];
        }
        if other.minimum <= self.minimum && other.maximum >= self.maximum {
            // Fully covered; nothing survives.
            return Vec::new();
        }
        if self.minimum < other.minimum && self.maximum > other.maximum {
            // `other` splits the interior.
            // The cut points are strictly inside `self`, so stepping
            // off them can't leave the domain.
            return vec![
                Range::new(self.minimum, other.minimum.sub_one()),
                Range::new(other.maximum.add_one(), self.maximum),
            ];
        }
        if other.minimum <= self.minimum {
            // The low side is covered; trim the left edge.
            vec![Range::new(other.maximum.add_one(), self.maximum)]
        } else {
            // The high side is covered; trim the right edge.
            vec![Range::new(self.minimum, other.minimum.sub_one())]
        }
    }

    /// A fresh lazy iterator over the discrete values of the range.
    ///
    /// Each call makes an independent lister; listers never alias the
    /// range they came from.
    pub fn iter(&self) -> RangeLister<T> {
        RangeLister::new(self)
    }

    /// The number of discrete values between the bounds, inclusive.
    ///
    /// Fully materializes an internal lister; prefer
    /// [`has_one`](Range::has_one)/[`has_many`](Range::has_many) when
    /// the exact count is not needed.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// The `index`-th discrete value of the range.
    pub fn get(&self, index: usize) -> Result<T, IndexError> {
        self.iter().get(index)
    }
}

// Equality and ordering exclude the cursor: two ranges over the same
// interval are the same range. Empty sentinels sort before everything.

impl<T> PartialEq for Range<T>
where
    T: Domain,
{
    fn eq(&self, other: &Self) -> bool {
        match (self.empty, other.empty) {
            (true, true) => true,
            (false, false) => self.minimum == other.minimum && self.maximum == other.maximum,
            _ => false,
        }
    }
}

impl<T> Eq for Range<T> where T: Domain + Eq {}

impl<T> PartialOrd for Range<T>
where
    T: Domain,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.empty, other.empty) {
            (true, true) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (false, false) => match self.minimum.partial_cmp(&other.minimum) {
                Some(Ordering::Equal) => self.maximum.partial_cmp(&other.maximum),
                ordering => ordering,
            },
        }
    }
}

impl<T> Ord for Range<T>
where
    T: Domain + Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.empty, other.empty) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .minimum
                .cmp(&other.minimum)
                .then_with(|| self.maximum.cmp(&other.maximum)),
        }
    }
}

impl<T> Hash for Range<T>
where
    T: Domain + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.empty.hash(state);
        if !self.empty {
            self.minimum.hash(state);
            self.maximum.hash(state);
        }
    }
}

#[cfg(feature = "serde1")]
impl<T> Serialize for Range<T>
where
    T: Domain + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // The empty sentinel is an empty sequence; otherwise
        // `[minimum, maximum, value]`.
        if self.empty {
            serializer.serialize_seq(Some(0))?.end()
        } else {
            let mut seq = serializer.serialize_seq(Some(3))?;
            seq.serialize_element(&self.minimum)?;
            seq.serialize_element(&self.maximum)?;
            seq.serialize_element(&self.value)?;
            seq.end()
        }
    }
}

#[cfg(feature = "serde1")]
impl<'de, T> Deserialize<'de> for Range<T>
where
    T: Domain + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RangeVisitor::new())
    }
}

#[cfg(feature = "serde1")]
struct RangeVisitor<T> {
    marker: PhantomData<fn() -> Range<T>>,
}

#[cfg(feature = "serde1")]
impl<T> RangeVisitor<T> {
    fn new() -> Self {
        RangeVisitor {
            marker: PhantomData,
        }
    }
}

#[cfg(feature = "serde1")]
impl<'de, T> Visitor<'de> for RangeVisitor<T>
where
    T: Domain + Deserialize<'de>,
{
    type Value = Range<T>;

    fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
        formatter.write_str("Range")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let Some(minimum) = access.next_element::<T>()? else {
            return Ok(Range::empty());
        };
        let maximum: T = access
            .next_element()?
            .ok_or_else(|| A::Error::custom("range maximum missing"))?;
        if !(minimum <= maximum) {
            return Err(A::Error::custom("range minimum greater than maximum"));
        }
        let mut range = Range::new(minimum, maximum);
        if let Some(value) = access.next_element::<T>()? {
            range.set_value(value);
        }
        Ok(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bounds<T: Domain>(range: &Range<T>) -> (T, T) {
        (range.minimum(), range.maximum())
    }

    //
    // Construction and cursor
    //

    #[test]
    #[should_panic(expected = "minimum can not be greater")]
    fn backwards_construction_panics() {
        let _ = Range::new(5u32, 1);
    }

    #[test]
    fn point_has_one_value() {
        let range = Range::point(7u32);
        assert!(range.has_one());
        assert!(!range.has_many());
        assert!(!range.is_range());
        assert_eq!(range.value(), 7);
    }

    #[test]
    fn empty_sentinel() {
        let range: Range<u32> = Range::empty();
        assert!(range.is_empty());
        assert!(!range.is_iterable());
        assert!(!range.contains(0));
        assert_eq!(range.count(), 0);
    }

    #[test]
    fn cursor_defaults_to_minimum_and_clamps() {
        let mut range = Range::new(10u32, 20);
        assert_eq!(range.value(), 10);
        range.set_value(15);
        assert_eq!(range.value(), 15);
        range.set_value(99);
        assert_eq!(range.value(), 20);
        range.set_value(0);
        assert_eq!(range.value(), 10);
    }

    #[test]
    fn setters_normalize_bounds_and_cursor() {
        let mut range = Range::new(10u32, 20);
        range.set_value(20);
        range.set_minimum(25);
        // Maximum got dragged along, cursor re-clamped.
        assert_eq!(bounds(&range), (25, 25));
        assert_eq!(range.value(), 25);

        let mut range = Range::new(10u32, 20);
        range.set_maximum(5);
        assert_eq!(bounds(&range), (5, 5));
    }

    //
    // Containment and overlap
    //

    #[test]
    fn contains_is_closed_on_both_ends() {
        let range = Range::new(1u32, 5);
        assert!(range.contains(1));
        assert!(range.contains(5));
        assert!(!range.contains(0));
        assert!(!range.contains(6));
    }

    #[test]
    fn contains_range_and_overlaps() {
        let outer = Range::new(1u32, 10);
        let inner = Range::new(3u32, 7);
        assert!(outer.contains_range(&inner));
        assert!(!inner.contains_range(&outer));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));

        let left = Range::new(1u32, 5);
        let right = Range::new(5u32, 9);
        assert!(left.overlaps(&right));

        let apart = Range::new(8u32, 10);
        assert!(!left.overlaps(&apart));
        assert!(!left.overlaps(&Range::empty()));
    }

    //
    // Adjacency
    //

    #[test]
    fn adjacency() {
        let a = Range::new(1u32, 5);
        let b = Range::new(6u32, 10);
        assert!(a.is_previous_to(&b));
        assert!(b.is_next_to(&a));
        assert!(!a.is_next_to(&b));
        assert!(!a.is_previous_to(&Range::new(7u32, 10)));
    }

    #[test]
    fn adjacency_does_not_overflow_at_domain_extremes() {
        let high = Range::new(250u8, 255);
        let low = Range::new(0u8, 5);
        assert!(!high.is_previous_to(&low));
        assert!(!low.is_next_to(&high));
    }

    //
    // Merge
    //

    #[test]
    fn merge_is_idempotent() {
        let mut a = Range::new(1u32, 5);
        let b = a;
        assert!(a.merge(&b));
        assert_eq!(bounds(&a), (1, 5));
    }

    #[test]
    fn merge_overlapping() {
        let mut a = Range::new(1u32, 5);
        let b = Range::new(3u32, 8);
        assert!(a.merge(&b));
        assert_eq!(bounds(&a), (1, 8));
    }

    #[test]
    fn merge_adjacent() {
        let mut a = Range::new(1u32, 5);
        let b = Range::new(6u32, 10);
        assert!(a.is_previous_to(&b));
        assert!(a.merge(&b));
        assert_eq!(bounds(&a), (1, 10));

        let mut c = Range::new(6u32, 10);
        assert!(c.merge(&Range::new(1u32, 5)));
        assert_eq!(bounds(&c), (1, 10));
    }

    #[test]
    fn merge_disjoint_fails_and_leaves_receiver_unchanged() {
        let mut a = Range::new(1u32, 5);
        let b = Range::new(8u32, 10);
        assert!(!a.merge(&b));
        assert_eq!(bounds(&a), (1, 5));
    }

    #[test]
    fn merge_with_empty_is_a_no_op_success() {
        let mut a = Range::new(1u32, 5);
        assert!(a.merge(&Range::empty()));
        assert_eq!(bounds(&a), (1, 5));

        let mut e: Range<u32> = Range::empty();
        assert!(e.merge(&a));
        assert_eq!(bounds(&e), (1, 5));
        assert!(!e.is_empty());
    }

    #[test]
    fn union_is_pure() {
        let a = Range::new(1u32, 5);
        let b = Range::new(3u32, 8);
        assert_eq!(a.union(&b), Some(Range::new(1u32, 8)));
        assert_eq!(bounds(&a), (1, 5));
        assert_eq!(a.union(&Range::new(8u32, 10)), None);
    }

    //
    // Exclude
    //

    #[test]
    fn exclude_split() {
        let a = Range::new(1u32, 10);
        let b = Range::new(4u32, 6);
        assert_eq!(a.exclude(&b), vec![Range::new(1u32, 3), Range::new(7u32, 10)]);
    }

    #[test]
    fn exclude_full_cover_is_empty() {
        let a = Range::new(3u32, 5);
        let b = Range::new(1u32, 10);
        assert_eq!(a.exclude(&b), vec![]);
        assert_eq!(a.exclude(&a), vec![]);
    }

    #[test]
    fn exclude_disjoint_is_identity() {
        let a = Range::new(1u32, 5);
        assert_eq!(a.exclude(&Range::new(7u32, 9)), vec![a]);
        assert_eq!(a.exclude(&Range::empty()), vec![a]);
    }

    #[test]
    fn exclude_trims_one_edge() {
        let a = Range::new(1u32, 10);
        // Low side covered.
        assert_eq!(a.exclude(&Range::new(0u32, 4)), vec![Range::new(5u32, 10)]);
        // High side covered.
        assert_eq!(a.exclude(&Range::new(7u32, 12)), vec![Range::new(1u32, 6)]);
        // Touching exactly one edge loses exactly that edge.
        assert_eq!(a.exclude(&Range::new(10u32, 12)), vec![Range::new(1u32, 9)]);
        assert_eq!(a.exclude(&Range::new(0u32, 1)), vec![Range::new(2u32, 10)]);
    }

    #[test]
    fn exclude_at_domain_extremes() {
        let a = Range::new(0u8, 255);
        assert_eq!(
            a.exclude(&Range::new(1u8, 254)),
            vec![Range::point(0u8), Range::point(255u8)]
        );
    }

    //
    // Shift and inflate
    //

    #[test]
    fn shift_translates_both_bounds() {
        let mut range = Range::new(10i32, 20);
        range.shift_by(5);
        assert_eq!(bounds(&range), (15, 25));
        range.shift_by(-10);
        assert_eq!(bounds(&range), (5, 15));
    }

    #[test]
    fn shift_clamps_independently_at_domain_maximum() {
        let mut range = Range::new(250u8, 255);
        range.shift_by(10);
        // Maximum already at the edge stays put; minimum advances as
        // far as the domain allows.
        assert_eq!(bounds(&range), (255, 255));

        let mut range = Range::new(250u8, 253);
        range.shift_by(10);
        assert_eq!(bounds(&range), (255, 255));
    }

    #[test]
    fn shift_clamps_at_domain_minimum_for_negative_steps() {
        let mut range = Range::new(i8::MIN, -120);
        range.shift_by(-10);
        assert_eq!(bounds(&range), (i8::MIN, i8::MIN));
    }

    #[test]
    fn shift_at_edge_is_a_no_op_on_the_pinned_bound() {
        let mut range = Range::new(0u8, u8::MAX);
        range.shift_by(40);
        assert_eq!(range.maximum(), u8::MAX);
        assert_eq!(range.minimum(), 40);
    }

    #[test]
    fn inflate_grows_symmetrically_with_clamping() {
        let mut range = Range::new(10i32, 20);
        range.inflate_by(5);
        assert_eq!(bounds(&range), (5, 25));

        let mut range = Range::new(2u8, 250);
        range.inflate_by(10);
        assert_eq!(bounds(&range), (0, 255));
    }

    #[test]
    fn inflate_negative_shrinks_and_collapses_to_a_point() {
        let mut range = Range::new(10i32, 20);
        range.inflate_by(-3);
        assert_eq!(bounds(&range), (13, 17));

        let mut range = Range::new(10i32, 20);
        range.inflate_by(-50);
        assert!(range.has_one());
    }

    #[test]
    fn pure_arith_variants_leave_receiver_unchanged() {
        let range = Range::new(10i32, 20);
        assert_eq!(bounds(&range.shifted_by(5)), (15, 25));
        assert_eq!(bounds(&range.inflated_by(5)), (5, 25));
        assert_eq!(bounds(&range), (10, 20));
    }

    //
    // Comparer
    //

    #[test]
    fn equality_excludes_the_cursor() {
        let a = Range::new(1u32, 5);
        let mut b = Range::new(1u32, 5);
        b.set_value(4);
        assert_eq!(a, b);

        let empty_a: Range<u32> = Range::empty();
        let empty_b: Range<u32> = Range::empty();
        assert_eq!(empty_a, empty_b);
        assert_ne!(empty_a, a);
    }

    #[test]
    fn ordering_is_minimum_then_maximum_with_empty_first() {
        let mut ranges = vec![
            Range::new(3u32, 9),
            Range::new(1u32, 8),
            Range::empty(),
            Range::new(1u32, 5),
        ];
        ranges.sort();
        assert_eq!(
            ranges,
            vec![
                Range::empty(),
                Range::new(1u32, 5),
                Range::new(1u32, 8),
                Range::new(3u32, 9),
            ]
        );
    }

    //
    // Properties
    //

    fn arb_range() -> impl Strategy<Value = Range<i32>> {
        (any::<i32>(), any::<i32>()).prop_map(|(a, b)| {
            if a <= b {
                Range::new(a, b)
            } else {
                Range::new(b, a)
            }
        })
    }

    proptest! {
        #[test]
        fn bounds_invariant_survives_arithmetic(
            range in arb_range(),
            other in arb_range(),
            steps in any::<i32>(),
        ) {
            let mut shifted = range;
            shifted.shift_by(steps);
            prop_assert!(shifted.minimum() <= shifted.maximum());

            let mut inflated = range;
            inflated.inflate_by(steps);
            prop_assert!(inflated.minimum() <= inflated.maximum());

            let mut merged = range;
            merged.merge(&other);
            prop_assert!(merged.minimum() <= merged.maximum());
        }

        #[test]
        fn comparer_equality_implies_zero_ordering(
            a in arb_range(),
            b in arb_range(),
        ) {
            if a == b {
                prop_assert_eq!(a.cmp(&b), core::cmp::Ordering::Equal);
            } else {
                prop_assert_ne!(a.cmp(&b), core::cmp::Ordering::Equal);
            }
        }

        #[test]
        fn exclude_pieces_never_contain_excluded_values(
            range in arb_range(),
            other in arb_range(),
        ) {
            for piece in range.exclude(&other) {
                prop_assert!(range.contains_range(&piece));
                prop_assert!(!piece.overlaps(&other));
            }
        }
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn serde_round_trip() {
        let mut range = Range::new(1u32, 9);
        range.set_value(4);
        let json = serde_json::to_string(&range).expect("failed to serialize");
        assert_eq!(json, "[1,9,4]");
        let back: Range<u32> = serde_json::from_str(&json).expect("failed to deserialize");
        assert_eq!(back, range);
        assert_eq!(back.value(), 4);

        let empty: Range<u32> = Range::empty();
        let json = serde_json::to_string(&empty).expect("failed to serialize");
        assert_eq!(json, "[]");
        let back: Range<u32> = serde_json::from_str(&json).expect("failed to deserialize");
        assert!(back.is_empty());
    }

    #[cfg(feature = "serde1")]
    #[test]
    fn serde_rejects_backwards_ranges() {
        let result: Result<Range<u32>, _> = serde_json::from_str("[9,1,1]");
        assert!(result.is_err());
    }
}
