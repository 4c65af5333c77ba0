//! Free-function interval-set algebra.
//!
//! These mirror the operators used throughout feasibility precomputation and
//! candidate construction: concatenation, filtering, shifting, clamping,
//! unique extraction, and a column-keyed intersection ("join") between two
//! interval sets carrying different label types.

use super::error::IntervalSetError;
use super::interval::Interval;
use super::interval_set::IntervalSet;
use super::label::RowLabel;
use crate::time::{Duration, Instant};

/// Concatenates two interval sets of the same label type.
///
/// # Panics
///
/// Panics if the combined set violates per-label disjointness.
pub fn concat<L: RowLabel>(a: &IntervalSet<L>, b: &IntervalSet<L>) -> IntervalSet<L> {
    let mut rows: Vec<Interval<L>> = a.iter().cloned().collect();
    rows.extend(b.iter().cloned());
    IntervalSet::from(rows)
}

/// Keeps only the rows for which `predicate` returns true.
pub fn filter_predicate<L: RowLabel>(
    set: &IntervalSet<L>,
    predicate: impl Fn(&Interval<L>) -> bool,
) -> IntervalSet<L> {
    IntervalSet::from_sorted_unchecked(set.iter().cloned().filter(|i| predicate(i)).collect())
}

/// Keeps only the rows whose label key equals `key`.
pub fn filter_column<L: RowLabel>(set: &IntervalSet<L>, key: &L::Key) -> IntervalSet<L> {
    filter_predicate(set, |i| &i.label().key() == key)
}

/// Shifts every row's start and/or end by `shift(label)`. `shift` must
/// depend only on the label, never on the current time bounds, so that
/// per-label disjointness is preserved.
pub fn shift_by<L: RowLabel>(
    set: &IntervalSet<L>,
    shift: impl Fn(&L) -> Duration,
    shift_start: bool,
    shift_end: bool,
) -> IntervalSet<L> {
    let rows = set
        .iter()
        .map(|i| {
            let delta = shift(i.label());
            let start = if shift_start { i.start() + delta } else { i.start() };
            let end = if shift_end { i.end() + delta } else { i.end() };
            Interval::new(start, end, i.label().clone())
        })
        .collect();
    IntervalSet::from(rows)
}

/// Clamps every row to `[lo, hi)`, dropping rows that become empty.
pub fn limit_time<L: RowLabel>(set: &IntervalSet<L>, lo: Instant, hi: Instant) -> IntervalSet<L> {
    let rows = set.iter().filter_map(|i| i.clamped(lo, hi)).collect();
    IntervalSet::from_sorted_unchecked(rows)
}

/// Removes and returns the unique row whose bounds contain `[start, end)`.
///
/// Returns `NotFound` if no row covers the range, `NotUnique` if more than
/// one does.
pub fn extract_interval<L: RowLabel>(
    set: &IntervalSet<L>,
    start: Instant,
    end: Instant,
) -> Result<(IntervalSet<L>, Interval<L>), IntervalSetError> {
    let matches: Vec<usize> = set
        .iter()
        .enumerate()
        .filter(|(_, i)| i.start() <= start && end <= i.end())
        .map(|(idx, _)| idx)
        .collect();

    match matches.as_slice() {
        [] => Err(IntervalSetError::NotFound {
            start: start.seconds(),
            end: end.seconds(),
        }),
        [idx] => {
            let mut rows: Vec<Interval<L>> = set.iter().cloned().collect();
            let extracted = rows.remove(*idx);
            Ok((IntervalSet::from_sorted_unchecked(rows), extracted))
        }
        _ => Err(IntervalSetError::NotUnique {
            start: start.seconds(),
            end: end.seconds(),
            count: matches.len(),
        }),
    }
}

/// Earliest start time in the set, if non-empty.
pub fn earliest<L: RowLabel>(set: &IntervalSet<L>) -> Option<Instant> {
    set.first().map(|i| i.start())
}

/// Latest end time in the set, if non-empty.
pub fn latest<L: RowLabel>(set: &IntervalSet<L>) -> Option<Instant> {
    set.iter().map(|i| i.end()).max()
}

/// Column-keyed intersection ("join"): for each row `r` in `self`, selects
/// rows of `other` whose key equals `self_key(r)` and whose time bounds
/// intersect `r`'s, clips them to `r`'s bounds, and combines the pair into
/// a row of a new label type via `combine`.
///
/// Mirrors `Intervals.intersect_on_column` from the original design: the
/// result carries data from both operands without requiring either to share
/// a concrete label type.
pub fn intersect_on_column<A: RowLabel, B: RowLabel, K: PartialEq, M: RowLabel>(
    this: &IntervalSet<A>,
    other: &IntervalSet<B>,
    self_key: impl Fn(&A) -> K,
    other_key: impl Fn(&B) -> K,
    combine: impl Fn(&A, &B) -> M,
) -> IntervalSet<M> {
    let mut rows = Vec::new();
    for r in this.iter() {
        let k = self_key(r.label());
        for o in other.iter() {
            if other_key(o.label()) != k {
                continue;
            }
            if let Some((start, end)) = r.intersection_bounds(o) {
                rows.push(Interval::new(start, end, combine(r.label(), o.label())));
            }
        }
    }
    IntervalSet::from(rows)
}
