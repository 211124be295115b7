/*!
Closed-interval ranges with a movable cursor, set-style operations,
overflow-safe arithmetic, and a compact delimited text form.

[`Range`] keeps three values in order at all times: a minimum, a
maximum, and a cursor value clamped between them. On top of that single
invariant the crate builds containment and overlap tests, adjacency
detection and coalescing ([`merge`], [`union`], [`exclude`]), clamped
translation and resizing ([`shift_by`], [`inflate_by`]), lazy
materializing iteration ([`RangeLister`]), and bulk simplification of
range collections ([`RangeCollection::simplify`]).


# Closed ranges and discrete domains

Every range here is closed on both ends: `Range::new(3, 10)` covers
both 3 and 10, and a range ending at `255u8` is representable without
widening the key type. The price of closed ranges is that adjacency
can not be detected by comparing ends for equality; it needs a
_successor_ function. That is the [`StepLite`] trait, implemented for
the primitive integers and for [`chrono::NaiveDateTime`] (at one
millisecond). Continuous domains like `f64` still get construction,
containment, and clamped arithmetic; only the adjacency-based
operations and iteration are gated behind `StepLite`.

Bounds arithmetic never wraps and never panics: [`shift_by`] and
[`inflate_by`] clamp each bound at the edge of the domain, as defined
by the [`Domain`] trait.

```rust
use rangekit::{Range, RangeCollection};

let mut shift = Range::new(9u32, 17);
assert!(shift.contains(12));
shift.shift_by(3);
assert_eq!((shift.minimum(), shift.maximum()), (12, 20));

// `T-T` per range, `,`-separated groups; parsing is total.
let mut pages: RangeCollection<u32> = RangeCollection::parse("1-3,2-5,8-10,9").unwrap();
pages.simplify();
assert_eq!(pages.to_string(), "1-5,8-10");
assert_eq!(RangeCollection::<u32>::parse("1-3,bogus"), None);
```


# Example: calendar ranges

[`DateRange`] is a range over [`chrono::NaiveDateTime`] carrying a
[`DateUnit`], so shifting and inflating speak in calendar units —
month and year steps follow calendar rules rather than a fixed number
of milliseconds.

```rust
use chrono::NaiveDate;
use rangekit::{DateRange, DateUnit};

let day_one = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
let last_day = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap().and_hms_opt(0, 0, 0).unwrap();

let june = DateRange::new(day_one, last_day, DateUnit::Month);
let july = june.shifted_by(1);
assert_eq!(july.minimum().date(), NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
assert_eq!(july.maximum().date(), NaiveDate::from_ymd_opt(2026, 7, 30).unwrap());
```


## Crate features

If you enable the **serde1** feature it will introduce a dependency on
the _serde_ crate and provide `Serialize` and `Deserialize`
implementations for [`Range`], [`RangeCollection`] and [`DateRange`].

You can enable the **serde1** feature in your _Cargo.toml_ file like so:

```toml
[dependencies]
rangekit = { version = "0.1", features = ["serde1"] }
```


[`merge`]: Range::merge
[`union`]: Range::union
[`exclude`]: Range::exclude
[`shift_by`]: Range::shift_by
[`inflate_by`]: Range::inflate_by

*/

pub mod collection;
pub mod date;
pub mod domain;
pub mod grammar;
pub mod lister;
pub mod range;

pub use collection::RangeCollection;
pub use date::{DateRange, DateRangeIter, DateUnit};
pub use domain::{ClampedArith, Domain, StepLite};
pub use grammar::ParseRangeError;
pub use lister::{IndexError, RangeLister};
pub use range::Range;
