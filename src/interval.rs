use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use crate::error::InvalidInterval;
use crate::format::{bracketed, Calendar, TimestampFormat};
use crate::timestamp::{IntoTimestamp, TimeSpan, Timestamp};

/// A half-open span of time `[started_at, ended_at)` in whole seconds.
///
/// Intervals order by start time, and by *descending* end time when the starts
/// are equal, so the longest interval at a given start sorts first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    started_at: Timestamp,
    ended_at: Timestamp,
}

impl Interval {
    /// Creates an interval, rounding both endpoints to whole seconds.
    ///
    /// ```
    /// use time_intervals::{Interval, InvalidInterval};
    ///
    /// let interval = Interval::new(0.025, 60.875).unwrap();
    /// assert_eq!(interval, Interval::new(0, 61).unwrap());
    ///
    /// assert_eq!(Interval::new(None::<i64>, 5), Err(InvalidInterval::MissingEndpoint));
    /// assert!(Interval::new(5, 4).is_err());
    /// ```
    pub fn new<S, E>(started_at: S, ended_at: E) -> Result<Self, InvalidInterval>
    where
        S: IntoTimestamp,
        E: IntoTimestamp,
    {
        let started_at = started_at
            .into_timestamp()
            .ok_or(InvalidInterval::MissingEndpoint)?;
        let ended_at = ended_at
            .into_timestamp()
            .ok_or(InvalidInterval::MissingEndpoint)?;

        if ended_at < started_at {
            return Err(InvalidInterval::EndsBeforeStart {
                started_at,
                ended_at,
            });
        }

        Ok(Self::spanning(started_at, ended_at))
    }

    pub fn from_span<T>(span: &T) -> Result<Self, InvalidInterval>
    where
        T: TimeSpan + ?Sized,
    {
        Self::new(span.started_at(), span.ended_at())
    }

    /// Endpoints already known to be ordered, e.g. derived from other intervals.
    #[inline]
    pub(crate) fn spanning(started_at: Timestamp, ended_at: Timestamp) -> Self {
        debug_assert!(started_at <= ended_at);
        Interval {
            started_at,
            ended_at,
        }
    }

    #[inline]
    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    #[inline]
    pub fn ended_at(&self) -> Timestamp {
        self.ended_at
    }

    /// Unsigned, so spans across the whole `i64` range still have a length.
    #[inline]
    pub fn length_in_seconds(&self) -> u64 {
        self.ended_at.abs_diff(self.started_at)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.started_at == self.ended_at
    }

    /// True if this interval ends no later than `other` starts.
    #[inline]
    pub fn is_before(&self, other: Self) -> bool {
        self.ended_at <= other.started_at
    }

    /// True if `other` ends no later than this interval starts.
    #[inline]
    pub fn is_after(&self, other: Self) -> bool {
        other.ended_at <= self.started_at
    }

    #[inline]
    pub fn is_disjoint(&self, other: Self) -> bool {
        self.is_before(other) || self.is_after(other)
    }

    /// Adjacent intervals (one ends where the other starts) do not overlap.
    #[inline]
    pub fn overlaps(&self, other: Self) -> bool {
        !self.is_disjoint(other)
    }

    pub fn overlap_duration_in_seconds(&self, other: Self) -> u64 {
        self.intersection(other)
            .map_or(0, |overlap| overlap.length_in_seconds())
    }

    /// The common part of two overlapping intervals.
    ///
    /// A zero-length interval strictly inside the other yields itself, while
    /// one sitting on the other's start is disjoint from it and yields `None`.
    pub fn intersection(&self, other: Self) -> Option<Self> {
        if self.is_disjoint(other) {
            return None;
        }
        Some(Self::spanning(
            self.started_at.max(other.started_at),
            self.ended_at.min(other.ended_at),
        ))
    }

    /// Half-open instant test: `ended_at` itself is excluded.
    #[inline]
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.started_at <= instant && instant < self.ended_at
    }

    /// Renders `[start, end]` with each endpoint passed through `format`.
    pub fn display_with<F>(&self, format: &F) -> String
    where
        F: TimestampFormat + ?Sized,
    {
        bracketed(format, self.started_at, self.ended_at)
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.started_at
            .cmp(&other.started_at)
            .then_with(|| other.ended_at.cmp(&self.ended_at))
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// `[YYYY-MM-DD HH:MM:SS, YYYY-MM-DD HH:MM:SS]` in UTC.
///
/// The closing bracket is cosmetic, the end remains exclusive.
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(&Calendar::utc()))
    }
}

impl TimeSpan for Interval {
    type Instant = Timestamp;

    fn started_at(&self) -> Timestamp {
        self.started_at
    }

    fn ended_at(&self) -> Timestamp {
        self.ended_at
    }
}

impl TryFrom<(Timestamp, Timestamp)> for Interval {
    type Error = InvalidInterval;

    fn try_from(i: (Timestamp, Timestamp)) -> Result<Self, Self::Error> {
        Interval::new(i.0, i.1)
    }
}

impl TryFrom<Range<Timestamp>> for Interval {
    type Error = InvalidInterval;

    fn try_from(range: Range<Timestamp>) -> Result<Self, Self::Error> {
        Interval::new(range.start, range.end)
    }
}
