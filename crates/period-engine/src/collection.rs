//! An ordered, duplicate-tolerant collection of time periods.
//!
//! Members are kept in insertion order and may overlap freely. Sorting is
//! in place and stable, so members with equal keys keep their relative
//! order. Relationship queries return a new collection holding clones of
//! the matching members, in this collection's current order.

use std::ops::{Index, IndexMut};

use chrono::{DateTime, Utc};

use crate::calendar::PeriodCalendar;
use crate::group::TimePeriodGroup;
use crate::period::{IntervalBounds, TimePeriod};

#[derive(Debug, Clone, Default)]
pub struct TimePeriodCollection {
    periods: Vec<TimePeriod>,
    calendar: PeriodCalendar,
}

impl TimePeriodCollection {
    pub fn new(calendar: PeriodCalendar) -> Self {
        Self {
            periods: Vec::new(),
            calendar,
        }
    }

    /// Append a period at the end.
    pub fn add(&mut self, period: TimePeriod) {
        self.periods.push(period);
    }

    /// Insert a period at `index`, moving later members back by one.
    /// An index past the end is ignored.
    pub fn insert(&mut self, period: TimePeriod, index: usize) {
        if index <= self.periods.len() {
            self.periods.insert(index, period);
        }
    }

    /// Remove and return the period at `index`, or `None` when out of
    /// bounds.
    pub fn remove(&mut self, index: usize) -> Option<TimePeriod> {
        if index < self.periods.len() {
            Some(self.periods.remove(index))
        } else {
            None
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimePeriod> {
        self.periods.iter()
    }

    // ── Sorting ─────────────────────────────────────────────────────────

    pub fn sort_by_start_ascending(&mut self) {
        self.periods.sort_by(|a, b| a.start.cmp(&b.start));
    }

    pub fn sort_by_start_descending(&mut self) {
        self.periods.sort_by(|a, b| b.start.cmp(&a.start));
    }

    pub fn sort_by_end_ascending(&mut self) {
        self.periods.sort_by(|a, b| a.end.cmp(&b.end));
    }

    pub fn sort_by_end_descending(&mut self) {
        self.periods.sort_by(|a, b| b.end.cmp(&a.end));
    }

    /// Sort by elapsed length, shortest first.
    pub fn sort_by_duration_ascending(&mut self) {
        self.periods.sort_by(|a, b| (a.end - a.start).cmp(&(b.end - b.start)));
    }

    /// Sort by elapsed length, longest first.
    pub fn sort_by_duration_descending(&mut self) {
        self.periods.sort_by(|a, b| (b.end - b.start).cmp(&(a.end - a.start)));
    }

    // ── Relationship queries ────────────────────────────────────────────

    /// Members lying entirely inside `period` (boundary contact counts).
    pub fn periods_inside(&self, period: &TimePeriod) -> TimePeriodCollection {
        self.filtered(|p| p.is_inside(period))
    }

    /// Members containing `instant` (endpoints included).
    pub fn periods_intersected_by_date(&self, instant: DateTime<Utc>) -> TimePeriodCollection {
        self.filtered(|p| p.contains_instant(instant, IntervalBounds::Closed))
    }

    /// Members sharing any time with `period`, endpoint contact included.
    pub fn periods_intersected_by(&self, period: &TimePeriod) -> TimePeriodCollection {
        self.filtered(|p| p.intersects(period))
    }

    /// Members sharing interior time with `period`; endpoint contact is
    /// not enough.
    pub fn periods_overlapped_by(&self, period: &TimePeriod) -> TimePeriodCollection {
        self.filtered(|p| p.overlaps_with(period))
    }

    fn filtered<F: Fn(&TimePeriod) -> bool>(&self, keep: F) -> TimePeriodCollection {
        TimePeriodCollection {
            periods: self.periods.iter().filter(|&p| keep(p)).cloned().collect(),
            calendar: self.calendar,
        }
    }
}

impl TimePeriodGroup for TimePeriodCollection {
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

impl Index<usize> for TimePeriodCollection {
    type Output = TimePeriod;

    fn index(&self, index: usize) -> &TimePeriod {
        &self.periods[index]
    }
}

impl IndexMut<usize> for TimePeriodCollection {
    fn index_mut(&mut self, index: usize) -> &mut TimePeriod {
        &mut self.periods[index]
    }
}

/// Order-insensitive member equality.
impl PartialEq for TimePeriodCollection {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, false)
    }
}

impl<'a> IntoIterator for &'a TimePeriodCollection {
    type Item = &'a TimePeriod;
    type IntoIter = std::slice::Iter<'a, TimePeriod>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
