//! A chain of end-to-end time periods.
//!
//! Membership is by contribution, not position: an added period donates its
//! elapsed length and is re-anchored onto the chain's current end, so
//! `periods[i].end == periods[i + 1].start` holds at all times. Edits in the
//! middle ripple through the tail by plain instant arithmetic, which keeps
//! every member's elapsed length intact.

use std::ops::{Index, IndexMut};

use crate::calendar::PeriodCalendar;
use crate::group::TimePeriodGroup;
use crate::period::TimePeriod;

#[derive(Debug, Clone, Default)]
pub struct TimePeriodChain {
    periods: Vec<TimePeriod>,
    calendar: PeriodCalendar,
}

impl TimePeriodChain {
    pub fn new(calendar: PeriodCalendar) -> Self {
        Self {
            periods: Vec::new(),
            calendar,
        }
    }

    /// Append a period, re-anchored to start where the chain currently
    /// ends. The first period of an empty chain keeps its own dates.
    pub fn add(&mut self, period: TimePeriod) {
        match self.periods.last() {
            Some(last) => {
                let length = period.end - period.start;
                let anchor = last.end;
                let mut linked = period;
                linked.start = anchor;
                linked.end = anchor + length;
                self.periods.push(linked);
            }
            None => self.periods.push(period),
        }
    }

    /// Insert a period at `index`, donating its elapsed length.
    ///
    /// Inserting at the front grows the chain backwards: the new period
    /// ends where the chain starts, and nothing else moves. Anywhere else,
    /// the new period starts at its predecessor's end and every later
    /// member shifts later by the inserted length. An index past the end
    /// is ignored.
    pub fn insert(&mut self, period: TimePeriod, index: usize) {
        if index > self.periods.len() {
            return;
        }
        if self.periods.is_empty() {
            self.periods.push(period);
            return;
        }
        let length = period.end - period.start;
        let mut linked = period;
        if index == 0 {
            linked.end = self.periods[0].start;
            linked.start = linked.end - length;
            self.periods.insert(0, linked);
        } else {
            linked.start = self.periods[index - 1].end;
            linked.end = linked.start + length;
            for later in &mut self.periods[index..] {
                later.shift_by(length);
            }
            self.periods.insert(index, linked);
        }
    }

    /// Remove and return the period at `index`, closing the gap by
    /// shifting every later member earlier by the removed length. Returns
    /// `None` when out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<TimePeriod> {
        if index >= self.periods.len() {
            return None;
        }
        let removed = self.periods.remove(index);
        let length = removed.end - removed.start;
        for later in &mut self.periods[index..] {
            later.shift_by(-length);
        }
        Some(removed)
    }

    /// Remove the first period; the rest of the chain slides earlier onto
    /// the chain's original start.
    pub fn remove_earliest(&mut self) -> Option<TimePeriod> {
        self.remove(0)
    }

    /// Remove the last period. Nothing shifts.
    pub fn remove_latest(&mut self) -> Option<TimePeriod> {
        self.periods.pop()
    }

    pub fn first(&self) -> Option<&TimePeriod> {
        self.periods.first()
    }

    pub fn last(&self) -> Option<&TimePeriod> {
        self.periods.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimePeriod> {
        self.periods.iter()
    }
}

impl TimePeriodGroup for TimePeriodChain {
    fn periods(&self) -> &[TimePeriod] {
        &self.periods
    }

    fn periods_mut(&mut self) -> &mut Vec<TimePeriod> {
        &mut self.periods
    }

    fn calendar(&self) -> PeriodCalendar {
        self.calendar
    }
}

impl Index<usize> for TimePeriodChain {
    type Output = TimePeriod;

    fn index(&self, index: usize) -> &TimePeriod {
        &self.periods[index]
    }
}

impl IndexMut<usize> for TimePeriodChain {
    fn index_mut(&mut self, index: usize) -> &mut TimePeriod {
        &mut self.periods[index]
    }
}

/// Position-sensitive member equality; a chain's order is structural.
impl PartialEq for TimePeriodChain {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, true)
    }
}

impl<'a> IntoIterator for &'a TimePeriodChain {
    type Item = &'a TimePeriod;
    type IntoIter = std::slice::Iter<'a, TimePeriod>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::TimeUnit;
    use crate::period::Anchor;
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    fn cal() -> PeriodCalendar {
        PeriodCalendar::utc()
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        cal().at(y, m, d, 0, 0, 0).unwrap()
    }

    fn months_from(start: DateTime<Utc>, amount: i64) -> TimePeriod {
        TimePeriod::starting_at(start, TimeUnit::Month, amount, cal()).unwrap()
    }

    // Same fixture periods as the collection tests; the chain re-anchors
    // them as they are added.
    fn chain() -> TimePeriodChain {
        let mut chain = TimePeriodChain::new(cal());
        chain.add(months_from(date(2010, 1, 1), 1));
        chain.add(months_from(date(2010, 1, 1), 2));
        chain.add(months_from(date(2010, 2, 1), 1));
        chain.add(months_from(date(2010, 1, 15), 2));
        chain
    }

    fn four_months_period() -> TimePeriod {
        months_from(date(2010, 1, 1), 4)
    }

    fn assert_contiguous(chain: &TimePeriodChain) {
        for pair in chain.periods().windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_add_links_periods_end_to_end() {
        let chain = chain();
        assert_eq!(chain[0].start, date(2010, 1, 1));
        assert_eq!(chain[0].end, date(2010, 2, 1));
        assert_eq!(chain[1].start, date(2010, 2, 1));
        assert_eq!(chain[1].end, date(2010, 4, 1));
        assert_eq!(chain[2].start, date(2010, 4, 1));
        assert_eq!(chain[2].end, date(2010, 4, 29));
        assert_eq!(chain[3].start, date(2010, 4, 29));
        assert_eq!(chain[3].end, date(2010, 6, 27));
        assert_contiguous(&chain);
    }

    #[test]
    fn test_span_covers_whole_chain() {
        let chain = chain();
        assert_eq!(chain.start_date(), Some(date(2010, 1, 1)));
        assert_eq!(chain.end_date(), Some(date(2010, 6, 27)));
        assert_eq!(chain.duration_in(TimeUnit::Day), 177);
    }

    #[test]
    fn test_insert_at_front_grows_chain_backwards() {
        let mut chain = chain();
        chain.insert(four_months_period(), 0);

        assert_eq!(chain.first().unwrap().start, date(2009, 9, 3));
        assert_eq!(chain.first().unwrap().end, date(2010, 1, 1));
        // The rest of the chain does not move.
        assert_eq!(chain.last().unwrap().end, date(2010, 6, 27));
        assert_contiguous(&chain);
    }

    #[test]
    fn test_insert_into_empty_chain_keeps_dates() {
        let mut chain = TimePeriodChain::new(cal());
        chain.insert(months_from(date(2010, 1, 1), 1), 0);

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.start_date(), Some(date(2010, 1, 1)));
        assert_eq!(chain.end_date(), Some(date(2010, 2, 1)));
    }

    #[test]
    fn test_insert_in_the_middle_shifts_the_tail_later() {
        let mut chain = chain();
        let one_day =
            TimePeriod::starting_at(date(2010, 1, 1), TimeUnit::Day, 1, cal()).unwrap();
        chain.insert(one_day, 2);

        assert_eq!(chain[0].start, date(2010, 1, 1));
        assert_eq!(chain[1].end, date(2010, 4, 1));
        assert_eq!(chain[2].end, date(2010, 4, 2));
        assert_eq!(chain[3].end, date(2010, 4, 30));
        assert_eq!(chain[4].end, date(2010, 6, 28));
        assert_contiguous(&chain);
    }

    #[test]
    fn test_insert_at_the_end_appends() {
        let mut chain = chain();
        let one_day =
            TimePeriod::starting_at(date(2010, 6, 27), TimeUnit::Day, 1, cal()).unwrap();
        chain.insert(one_day, 4);

        assert_eq!(chain[2].end, date(2010, 4, 29));
        assert_eq!(chain[3].end, date(2010, 6, 27));
        assert_eq!(chain[4].end, date(2010, 6, 28));
        assert_contiguous(&chain);
    }

    #[test]
    fn test_insert_past_the_end_is_ignored() {
        let mut chain = chain();
        chain.insert(four_months_period(), 10);
        assert_eq!(chain.len(), 4);
    }

    #[test]
    fn test_remove_out_of_bounds_returns_none() {
        let mut chain = chain();
        assert_eq!(chain.remove(10), None);
        assert_eq!(chain.len(), 4);
    }

    #[test]
    fn test_remove_from_empty_chain_returns_none() {
        let mut chain = TimePeriodChain::default();
        assert_eq!(chain.remove_earliest(), None);
        assert_eq!(chain.remove_latest(), None);
    }

    #[test]
    fn test_remove_earliest_slides_chain_onto_original_start() {
        let mut chain = chain();
        let removed = chain.remove_earliest();

        assert!(removed.is_some());
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.start_date(), Some(date(2010, 1, 1)));
        assert_eq!(chain.end_date(), Some(date(2010, 5, 27)));
        assert_contiguous(&chain);
    }

    #[test]
    fn test_remove_middle_closes_the_gap() {
        let mut chain = chain();
        let removed = chain.remove(2);

        assert!(removed.is_some());
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.start_date(), Some(date(2010, 1, 1)));
        assert_eq!(chain.end_date(), Some(date(2010, 5, 30)));
        assert_contiguous(&chain);
    }

    #[test]
    fn test_remove_latest_does_not_shift() {
        let mut chain = chain();
        let removed = chain.remove_latest();

        assert!(removed.is_some());
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.start_date(), Some(date(2010, 1, 1)));
        assert_eq!(chain.end_date(), Some(date(2010, 4, 29)));
        assert_contiguous(&chain);
    }

    #[test]
    fn test_equality_against_copy() {
        let chain = chain();
        let copy = chain.clone();
        assert!(chain.equals(&copy, true));
        assert_eq!(chain, copy);
    }

    #[test]
    fn test_equality_rejects_longer_chain() {
        let chain = chain();
        let mut longer = chain.clone();
        longer.add(four_months_period());
        assert!(!chain.equals(&longer, true));
        assert_ne!(chain, longer);
    }

    #[test]
    fn test_equality_rejects_same_span_with_different_links() {
        let chain = chain();

        // Same overall span, but the two middle links trade a day.
        let mut second = months_from(date(2010, 1, 1), 2);
        second.shorten(Anchor::Start, TimeUnit::Day, 1).unwrap();
        let mut third = months_from(date(2010, 2, 1), 1);
        third.lengthen(Anchor::Start, TimeUnit::Day, 1).unwrap();

        let mut other = TimePeriodChain::new(cal());
        other.add(months_from(date(2010, 1, 1), 1));
        other.add(second);
        other.add(third);
        other.add(months_from(date(2010, 1, 15), 2));

        assert!(chain.has_same_characteristics_as(&other));
        assert!(!chain.equals(&other, true));
        assert_ne!(chain, other);
    }

    #[test]
    fn test_group_shift_moves_whole_chain() {
        let mut chain = chain();
        chain.shift_later(TimeUnit::Week, 1).unwrap();
        assert_eq!(chain.start_date(), Some(date(2010, 1, 8)));
        assert_eq!(chain.end_date(), Some(date(2010, 7, 4)));
        assert_contiguous(&chain);
    }

    // ── Properties ──────────────────────────────────────────────────────

    fn short_period_strategy() -> impl Strategy<Value = TimePeriod> {
        // Starts in 2000..2001, lengths up to a week.
        (0i64..31_536_000, 1i64..604_800).prop_map(|(offset, len)| {
            let start = date(2000, 1, 1) + chrono::Duration::seconds(offset);
            TimePeriod::new(start, start + chrono::Duration::seconds(len), cal())
        })
    }

    proptest! {
        #[test]
        fn prop_chain_stays_contiguous_under_edits(
            periods in proptest::collection::vec(short_period_strategy(), 1..8),
            insert_period in short_period_strategy(),
            insert_index in 0usize..8,
            remove_index in 0usize..8,
        ) {
            let mut chain = TimePeriodChain::new(cal());
            for p in periods {
                chain.add(p);
            }
            assert_contiguous(&chain);

            chain.insert(insert_period, insert_index);
            assert_contiguous(&chain);

            let _ = chain.remove(remove_index);
            assert_contiguous(&chain);
        }

        #[test]
        fn prop_add_preserves_elapsed_length(
            periods in proptest::collection::vec(short_period_strategy(), 1..8),
        ) {
            let lengths: Vec<_> = periods.iter().map(|p| p.end - p.start).collect();
            let mut chain = TimePeriodChain::new(cal());
            for p in periods {
                chain.add(p);
            }
            for (member, length) in chain.iter().zip(lengths) {
                prop_assert_eq!(member.end - member.start, length);
            }
        }

        #[test]
        fn prop_remove_shrinks_span_by_removed_length(
            periods in proptest::collection::vec(short_period_strategy(), 2..8),
            remove_index in 0usize..8,
        ) {
            let mut chain = TimePeriodChain::new(cal());
            for p in periods {
                chain.add(p);
            }
            let before = chain.end_date().unwrap() - chain.start_date().unwrap();
            let index = remove_index % chain.len();
            let removed = chain.remove(index).unwrap();
            let after = chain.end_date().unwrap() - chain.start_date().unwrap();
            prop_assert_eq!(before - after, removed.end - removed.start);
        }
    }
}
