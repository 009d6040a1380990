use proptest::{collection::vec, prelude::*};
use time_intervals::{Collection, Interval, Timestamp};

const HORIZON: Timestamp = 600;

prop_compose! {
    /// An interval within the horizon, possibly zero-length
    fn interval()(start in 0..HORIZON - 100, length in 0..100i64) -> Interval {
        Interval::new(start, start + length).unwrap()
    }
}

prop_compose! {
    fn positive_interval()(start in 0..HORIZON - 100, length in 1..100i64) -> Interval {
        Interval::new(start, start + length).unwrap()
    }
}

prop_compose! {
    fn collection()(intervals in vec(interval(), 0..40)) -> Collection {
        Collection::new(intervals)
    }
}

/// Brute-force reference: answers questions one instant at a time.
struct Baseline<'a> {
    intervals: &'a [Interval],
}

impl<'a> Baseline<'a> {
    fn new(collection: &'a Collection) -> Self {
        Self {
            intervals: collection.as_slice(),
        }
    }

    fn covers(&self, instant: Timestamp) -> bool {
        self.intervals.iter().any(|interval| interval.contains(instant))
    }

    fn concurrency(&self, instant: Timestamp) -> usize {
        self.intervals
            .iter()
            .filter(|interval| interval.contains(instant))
            .count()
    }

    fn shares_time(&self) -> bool {
        self.intervals.iter().enumerate().any(|(i, a)| {
            self.intervals[i + 1..]
                .iter()
                .any(|b| a.overlap_duration_in_seconds(*b) > 0)
        })
    }
}

proptest! {
    #[test]
    fn coalesce_is_idempotent(subject in collection()) {
        let coalesced = subject.coalesce();
        prop_assert_eq!(coalesced.coalesce(), coalesced);
    }

    #[test]
    fn coalesce_is_disjoint_and_separated(subject in collection()) {
        let coalesced = subject.coalesce();
        for pair in coalesced.as_slice().windows(2) {
            prop_assert!(pair[0].ended_at() < pair[1].started_at());
        }
    }

    #[test]
    fn coalesce_preserves_coverage(subject in collection()) {
        let coalesced = subject.coalesce();
        let before = Baseline::new(&subject);
        let after = Baseline::new(&coalesced);
        for instant in 0..HORIZON {
            prop_assert_eq!(before.covers(instant), after.covers(instant));
        }
    }

    #[test]
    fn coalesce_loses_length_only_on_shared_time(subject in collection()) {
        let merged = subject.coalesce().length_in_seconds();
        prop_assert!(merged <= subject.length_in_seconds());
        prop_assert_eq!(
            merged == subject.length_in_seconds(),
            !Baseline::new(&subject).shares_time()
        );
        prop_assert_eq!(
            subject.has_overlapping_intervals(),
            merged < subject.length_in_seconds()
        );
    }

    #[test]
    fn construction_sorts(intervals in vec(interval(), 0..40)) {
        let subject = Collection::new(intervals.clone());
        prop_assert_eq!(subject.len(), intervals.len());
        for pair in subject.as_slice().windows(2) {
            prop_assert!(pair[0] <= pair[1]);
            if pair[0].started_at() == pair[1].started_at() {
                prop_assert!(pair[0].ended_at() >= pair[1].ended_at());
            }
        }
    }

    #[test]
    fn intersect_length_is_total_overlap(subject in collection(), slice in interval()) {
        let expected: u128 = subject
            .iter()
            .map(|member| u128::from(member.overlap_duration_in_seconds(slice)))
            .sum();
        let fragments = subject.intersect(slice);
        prop_assert_eq!(fragments.length_in_seconds(), expected);
        for fragment in &fragments {
            prop_assert!(fragment.started_at() >= slice.started_at());
            prop_assert!(fragment.ended_at() <= slice.ended_at());
        }
    }

    #[test]
    fn all_within_matches_containment(
        members in vec(positive_interval(), 0..20),
        bounding in positive_interval()
    ) {
        let subject = Collection::new(members.clone());
        let contained = members.iter().all(|member| {
            member.started_at() >= bounding.started_at()
                && member.ended_at() <= bounding.ended_at()
        });
        prop_assert_eq!(subject.all_intervals_within(bounding), contained);
    }

    #[test]
    fn partition_is_contiguous(subject in collection()) {
        let partition = subject.partition();
        for pair in partition.as_slice().windows(2) {
            prop_assert_eq!(pair[0].ended_at(), pair[1].started_at());
        }
        for slice in &partition {
            prop_assert!(slice.length_in_seconds() > 0);
        }
        if let (Some(first), Some(last)) = (partition.first(), partition.last()) {
            let earliest = subject.iter().map(Interval::started_at).min();
            let latest = subject.iter().map(Interval::ended_at).max();
            prop_assert_eq!(Some(first.started_at()), earliest);
            prop_assert_eq!(Some(last.ended_at()), latest);
        }
    }

    #[test]
    fn partition_count_matches_baseline(subject in collection()) {
        let baseline = Baseline::new(&subject);
        let histogram = subject.partition_count();
        prop_assert_eq!(histogram.len(), subject.partition().len());
        for (slice, count) in histogram {
            prop_assert_eq!(count, baseline.concurrency(slice.started_at()));
        }
    }
}
