use chrono::{Duration, NaiveDateTime};
use num_traits::{Bounded, Zero};

/// The representable bounds of a scalar domain.
///
/// Every range in this crate lives over a type with a known minimum and
/// maximum value, so that arithmetic on range bounds can be clamped to
/// the domain edge instead of wrapping or panicking.
///
/// Implemented for all primitive integers and floats (delegating to
/// [`num_traits::Bounded`]) and for [`chrono::NaiveDateTime`].
pub trait Domain: Copy + PartialOrd {
    fn min_value() -> Self;
    fn max_value() -> Self;
}

/// Scalar arithmetic that saturates at the domain bounds.
///
/// `clamped_add`/`clamped_sub` advance a value by at most the distance
/// to the domain edge; shifting a bound that already sits at the edge
/// is a no-op rather than an overflow.
pub trait ClampedArith: Domain {
    fn zero() -> Self;

    /// `self + steps`, clamped to `[min_value, max_value]`.
    fn clamped_add(self, steps: Self) -> Self;

    /// `self - steps`, clamped to `[min_value, max_value]`.
    fn clamped_sub(self, steps: Self) -> Self;
}

/// Minimal version of the unstable [Step](std::iter::Step) trait
/// from the Rust standard library.
///
/// Needed wherever ranges interact through _adjacency_ rather than
/// overlap: two closed ranges coalesce when the end of one is the
/// immediate successor of the start of the other, and that requires a
/// concept of successor and predecessor values, not just equality.
//
// TODO: Deprecate and then eventually remove once
// https://github.com/rust-lang/rust/issues/42168 is stabilized.
pub trait StepLite {
    fn add_one(&self) -> Self;
    fn sub_one(&self) -> Self;
}

macro_rules! domain_int {
    ($($t:ty)*) => {$(
        impl Domain for $t {
            fn min_value() -> Self {
                <$t as Bounded>::min_value()
            }

            fn max_value() -> Self {
                <$t as Bounded>::max_value()
            }
        }

        impl ClampedArith for $t {
            fn zero() -> Self {
                <$t as Zero>::zero()
            }

            fn clamped_add(self, steps: Self) -> Self {
                self.saturating_add(steps)
            }

            fn clamped_sub(self, steps: Self) -> Self {
                self.saturating_sub(steps)
            }
        }

        impl StepLite for $t {
            fn add_one(&self) -> Self {
                self + 1
            }

            fn sub_one(&self) -> Self {
                self - 1
            }
        }
    )*};
}

domain_int!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);

macro_rules! domain_float {
    ($($t:ty)*) => {$(
        impl Domain for $t {
            fn min_value() -> Self {
                <$t as Bounded>::min_value()
            }

            fn max_value() -> Self {
                <$t as Bounded>::max_value()
            }
        }

        impl ClampedArith for $t {
            fn zero() -> Self {
                <$t as Zero>::zero()
            }

            fn clamped_add(self, steps: Self) -> Self {
                (self + steps).clamp(<$t as Bounded>::min_value(), <$t as Bounded>::max_value())
            }

            fn clamped_sub(self, steps: Self) -> Self {
                (self - steps).clamp(<$t as Bounded>::min_value(), <$t as Bounded>::max_value())
            }
        }
    )*};
}

domain_float!(f32 f64);

impl Domain for NaiveDateTime {
    fn min_value() -> Self {
        NaiveDateTime::MIN
    }

    fn max_value() -> Self {
        NaiveDateTime::MAX
    }
}

// The discrete step of the date domain is one millisecond, the finest
// granularity named by `DateUnit`. Successor/predecessor stick at the
// domain edge instead of overflowing.
impl StepLite for NaiveDateTime {
    fn add_one(&self) -> Self {
        self.checked_add_signed(Duration::milliseconds(1))
            .unwrap_or(NaiveDateTime::MAX)
    }

    fn sub_one(&self) -> Self {
        self.checked_sub_signed(Duration::milliseconds(1))
            .unwrap_or(NaiveDateTime::MIN)
    }
}
