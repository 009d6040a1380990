use std::ops::Range;

use chrono::{DateTime, NaiveDateTime, TimeZone};

pub type Timestamp = i64;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Conversion of a caller's notion of time into whole epoch seconds.
///
/// Returns `None` when the value is absent or cannot be represented, which
/// interval construction reports as a missing endpoint. Fractional values are
/// rounded to the nearest second, ties away from zero.
pub trait IntoTimestamp {
    fn into_timestamp(self) -> Option<Timestamp>;
}

/// Anything with a start and an end that can be validated into an
/// [`Interval`](crate::Interval).
pub trait TimeSpan {
    type Instant: IntoTimestamp;

    fn started_at(&self) -> Self::Instant;
    fn ended_at(&self) -> Self::Instant;
}

macro_rules! lossless {
    ($($ty:ty),*) => {
        $(
            impl IntoTimestamp for $ty {
                #[inline]
                fn into_timestamp(self) -> Option<Timestamp> {
                    Some(Timestamp::from(self))
                }
            }
        )*
    };
}

macro_rules! checked {
    ($($ty:ty),*) => {
        $(
            impl IntoTimestamp for $ty {
                #[inline]
                fn into_timestamp(self) -> Option<Timestamp> {
                    Timestamp::try_from(self).ok()
                }
            }
        )*
    };
}

lossless!(i8, i16, i32, i64, u8, u16, u32);
checked!(u64, usize, isize, i128, u128);

impl IntoTimestamp for f64 {
    fn into_timestamp(self) -> Option<Timestamp> {
        let rounded = self.round();
        // i64::MAX is not exactly representable as f64, the bound is 2^63.
        let bound = -(Timestamp::MIN as f64);
        if rounded.is_finite() && rounded >= -bound && rounded < bound {
            Some(rounded as Timestamp)
        } else {
            None
        }
    }
}

impl IntoTimestamp for f32 {
    #[inline]
    fn into_timestamp(self) -> Option<Timestamp> {
        f64::from(self).into_timestamp()
    }
}

impl<T: IntoTimestamp> IntoTimestamp for Option<T> {
    #[inline]
    fn into_timestamp(self) -> Option<Timestamp> {
        self.and_then(IntoTimestamp::into_timestamp)
    }
}

impl<Tz: TimeZone> IntoTimestamp for DateTime<Tz> {
    fn into_timestamp(self) -> Option<Timestamp> {
        round_subsec(self.timestamp(), self.timestamp_subsec_nanos())
    }
}

impl<Tz: TimeZone> IntoTimestamp for &DateTime<Tz> {
    fn into_timestamp(self) -> Option<Timestamp> {
        round_subsec(self.timestamp(), self.timestamp_subsec_nanos())
    }
}

impl IntoTimestamp for NaiveDateTime {
    fn into_timestamp(self) -> Option<Timestamp> {
        self.and_utc().into_timestamp()
    }
}

/// `seconds` is floored and `nanos` is the non-negative remainder, so a tie
/// only rounds up for non-negative values.
fn round_subsec(seconds: i64, nanos: u32) -> Option<Timestamp> {
    // Leap seconds are reported as nanos past a full second.
    let (seconds, nanos) = if nanos >= NANOS_PER_SECOND {
        (seconds.checked_add(1)?, nanos - NANOS_PER_SECOND)
    } else {
        (seconds, nanos)
    };

    let half = NANOS_PER_SECOND / 2;
    if nanos > half || (nanos == half && seconds >= 0) {
        seconds.checked_add(1)
    } else {
        Some(seconds)
    }
}

impl<T: IntoTimestamp + Clone> TimeSpan for Range<T> {
    type Instant = T;

    fn started_at(&self) -> T {
        self.start.clone()
    }

    fn ended_at(&self) -> T {
        self.end.clone()
    }
}

impl<T: IntoTimestamp + Clone> TimeSpan for (T, T) {
    type Instant = T;

    fn started_at(&self) -> T {
        self.0.clone()
    }

    fn ended_at(&self) -> T {
        self.1.clone()
    }
}
