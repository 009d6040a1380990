use std::ops::Index;
use std::slice;
use std::vec;

use tracing::trace;

use crate::error::InvalidInterval;
use crate::interval::Interval;
use crate::timestamp::TimeSpan;

pub const ONE_HOUR_IN_SECONDS: u64 = 60 * 60;

/// An ordered, immutable sequence of [`Interval`]s.
///
/// Members are sorted on construction and may overlap or repeat. Every
/// operation returns a new value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Collection {
    intervals: Vec<Interval>,
}

/// The intervals a [`Collection`] is intersected with: nothing, a single
/// interval, or a sequence assumed to be pairwise disjoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slices<'a> {
    None,
    Single(Interval),
    Many(&'a [Interval]),
}

impl<'a> Slices<'a> {
    pub fn as_slice(&self) -> &[Interval] {
        match self {
            Slices::None => &[],
            Slices::Single(interval) => slice::from_ref(interval),
            Slices::Many(intervals) => *intervals,
        }
    }
}

impl Collection {
    pub fn new<I>(intervals: I) -> Self
    where
        I: IntoIterator<Item = Interval>,
    {
        let mut intervals: Vec<Interval> = intervals.into_iter().collect();
        intervals.sort();
        Collection { intervals }
    }

    pub fn empty() -> Self {
        Collection {
            intervals: Vec::new(),
        }
    }

    /// Copies any interval-like values into a collection, validating each.
    pub fn wrap<I>(spans: I) -> Result<Self, InvalidInterval>
    where
        I: IntoIterator,
        I::Item: TimeSpan,
    {
        let intervals = spans
            .into_iter()
            .map(|span| Interval::from_span(&span))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(intervals))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn get(&self, index: usize) -> Option<&Interval> {
        self.intervals.get(index)
    }

    pub fn first(&self) -> Option<&Interval> {
        self.intervals.first()
    }

    pub fn last(&self) -> Option<&Interval> {
        self.intervals.last()
    }

    pub fn into_vec(self) -> Vec<Interval> {
        self.intervals
    }

    /// True if every member lies within `bounding`, judged by total length:
    /// nothing may be lost when intersecting with it.
    pub fn all_intervals_within(&self, bounding: Interval) -> bool {
        self.length_in_seconds() == self.intersect(bounding).length_in_seconds()
    }

    /// True if merging the members loses length, i.e. some members share time.
    /// Members that merely touch do not count.
    pub fn has_overlapping_intervals(&self) -> bool {
        self.coalesce().length_in_seconds() < self.length_in_seconds()
    }

    /// Merges members that overlap or are adjacent into maximal spans.
    ///
    /// ```text
    /// members  [-----)   [---)      [-----)
    ///              [-----)       [-----)
    ///
    /// result   [-------------)   [--------)
    /// ```
    pub fn coalesce(&self) -> Collection {
        let mut members = self.intervals.iter();
        let mut coalescing = match members.next() {
            Some(first) => *first,
            None => return Collection::empty(),
        };

        let mut output = vec![];
        for current in members {
            if coalescing.ended_at() < current.started_at() {
                output.push(coalescing);
                coalescing = *current;
            } else {
                coalescing = Interval::spanning(
                    coalescing.started_at(),
                    coalescing.ended_at().max(current.ended_at()),
                );
            }
        }
        output.push(coalescing);

        trace!(
            members = self.len(),
            coalesced = output.len(),
            "coalesced intervals"
        );

        // Already sorted: starts strictly increase.
        Collection { intervals: output }
    }

    /// Clips the members to each of `slices`, keeping one fragment per
    /// overlapping (slice, member) pair.
    ///
    /// The slices are assumed to be pairwise disjoint. This is not checked;
    /// overlapping slices produce overlapping fragments. The result is not
    /// coalesced.
    ///
    /// ```text
    /// members  [-----)   [---)      [-----)
    ///              [-----)       [-----)
    /// slices     [---------)   [-----)
    ///
    /// result     [---)   [-)        [)
    ///              [-----)       [---)
    /// ```
    pub fn intersect<'a, S>(&self, slices: S) -> Collection
    where
        S: Into<Slices<'a>>,
    {
        let slices: Slices<'a> = slices.into();
        let mut output = vec![];

        for slice in slices.as_slice() {
            output.extend(
                self.intervals
                    .iter()
                    .filter_map(|member| slice.intersection(*member)),
            );
        }

        trace!(
            members = self.len(),
            slices = slices.as_slice().len(),
            fragments = output.len(),
            "intersected intervals"
        );

        Collection::new(output)
    }

    /// Pairs each slice, in the given order, with the number of members
    /// overlapping it.
    pub fn intersect_count<'a, S>(&self, slices: S) -> Vec<(Interval, usize)>
    where
        S: Into<Slices<'a>>,
    {
        let slices: Slices<'a> = slices.into();
        slices
            .as_slice()
            .iter()
            .map(|slice| {
                let count = self
                    .intervals
                    .iter()
                    .filter(|member| slice.overlaps(**member))
                    .count();
                (*slice, count)
            })
            .collect()
    }

    /// Splits the covered time at every distinct endpoint.
    ///
    /// ```text
    /// members  [--------)   [-----)   [---)
    ///                [------)
    ///                   [----)
    ///
    /// result   [-----)  [---)[----)   [---)
    ///                [--)   [)    [---)
    /// ```
    ///
    /// Gaps between members appear as slices too. Fewer than two distinct
    /// endpoints yield an empty partition.
    pub fn partition(&self) -> Collection {
        let mut points: Vec<_> = self
            .intervals
            .iter()
            .flat_map(|interval| [interval.started_at(), interval.ended_at()])
            .collect();
        points.sort_unstable();
        points.dedup();

        let intervals: Vec<_> = points
            .windows(2)
            .map(|pair| Interval::spanning(pair[0], pair[1]))
            .collect();

        trace!(
            members = self.len(),
            partitions = intervals.len(),
            "partitioned intervals"
        );

        Collection { intervals }
    }

    /// A histogram of concurrency: every partition slice with the number of
    /// members overlapping it.
    pub fn partition_count(&self) -> Vec<(Interval, usize)> {
        let partition = self.partition();
        self.intersect_count(&partition)
    }

    /// Summed in `u128`: member lengths are each below `2^64`.
    pub fn length_in_seconds(&self) -> u128 {
        self.intervals
            .iter()
            .map(|interval| u128::from(interval.length_in_seconds()))
            .sum()
    }

    pub fn length_in_hours(&self) -> f64 {
        self.length_in_seconds() as f64 / ONE_HOUR_IN_SECONDS as f64
    }
}

impl From<Vec<Interval>> for Collection {
    fn from(intervals: Vec<Interval>) -> Self {
        Collection::new(intervals)
    }
}

impl From<Interval> for Collection {
    fn from(interval: Interval) -> Self {
        Collection {
            intervals: vec![interval],
        }
    }
}

impl From<Option<Interval>> for Collection {
    fn from(interval: Option<Interval>) -> Self {
        interval.map_or_else(Collection::empty, Collection::from)
    }
}

impl FromIterator<Interval> for Collection {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Collection::new(iter)
    }
}

impl Index<usize> for Collection {
    type Output = Interval;

    fn index(&self, index: usize) -> &Interval {
        &self.intervals[index]
    }
}

impl IntoIterator for Collection {
    type Item = Interval;
    type IntoIter = vec::IntoIter<Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Interval;
    type IntoIter = slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

impl<'a> From<Option<Interval>> for Slices<'a> {
    fn from(interval: Option<Interval>) -> Self {
        interval.map_or(Slices::None, Slices::Single)
    }
}

impl<'a> From<Interval> for Slices<'a> {
    fn from(interval: Interval) -> Self {
        Slices::Single(interval)
    }
}

impl<'a> From<&'a Interval> for Slices<'a> {
    fn from(interval: &'a Interval) -> Self {
        Slices::Single(*interval)
    }
}

impl<'a> From<&'a [Interval]> for Slices<'a> {
    fn from(intervals: &'a [Interval]) -> Self {
        Slices::Many(intervals)
    }
}

impl<'a> From<&'a Vec<Interval>> for Slices<'a> {
    fn from(intervals: &'a Vec<Interval>) -> Self {
        Slices::Many(intervals)
    }
}

impl<'a> From<&'a Collection> for Slices<'a> {
    fn from(collection: &'a Collection) -> Self {
        Slices::Many(&collection.intervals)
    }
}
