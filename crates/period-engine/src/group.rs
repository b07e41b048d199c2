//! Shared behavior for period containers.
//!
//! [`TimePeriodGroup`] gives [`TimePeriodCollection`](crate::TimePeriodCollection)
//! and [`TimePeriodChain`](crate::TimePeriodChain) one vocabulary for span
//! queries, whole-unit durations, and bulk shifting, while each container
//! keeps its own membership rules.

use chrono::{DateTime, Utc};

use crate::calendar::{PeriodCalendar, TimeUnit};
use crate::error::PeriodError;
use crate::period::TimePeriod;

/// A container of [`TimePeriod`]s with a spanning interval.
///
/// The span runs from the earliest member start to the latest member end;
/// members need not be ordered or contiguous for the span to be defined.
pub trait TimePeriodGroup {
    fn periods(&self) -> &[TimePeriod];

    fn periods_mut(&mut self) -> &mut Vec<TimePeriod>;

    /// The calendar used for the group's component arithmetic.
    fn calendar(&self) -> PeriodCalendar;

    fn len(&self) -> usize {
        self.periods().len()
    }

    fn is_empty(&self) -> bool {
        self.periods().is_empty()
    }

    /// The earliest member start, or `None` when empty.
    fn start_date(&self) -> Option<DateTime<Utc>> {
        self.periods().iter().map(|p| p.start).min()
    }

    /// The latest member end, or `None` when empty.
    fn end_date(&self) -> Option<DateTime<Utc>> {
        self.periods().iter().map(|p| p.end).max()
    }

    /// Whole units of `unit` spanned by the group, truncated. Zero when
    /// empty or when the span is inverted.
    ///
    /// Unlike a single period's fractional hour/minute accessors, every
    /// granularity here is an integer count.
    fn duration_in(&self, unit: TimeUnit) -> i64 {
        let (start, end) = match (self.start_date(), self.end_date()) {
            (Some(start), Some(end)) => (start, end),
            _ => return 0,
        };
        match unit {
            TimeUnit::Second => (end - start).num_seconds().max(0),
            TimeUnit::Minute => (end - start).num_minutes().max(0),
            TimeUnit::Hour => (end - start).num_hours().max(0),
            TimeUnit::Day | TimeUnit::Week | TimeUnit::Month | TimeUnit::Year => {
                self.calendar().units_earlier(unit, start, end)
            }
        }
    }

    /// Shift every member later by `amount` × `unit`.
    ///
    /// # Errors
    ///
    /// Stops at the first member that overflows; members already shifted
    /// keep their new positions.
    fn shift_later(&mut self, unit: TimeUnit, amount: i64) -> Result<(), PeriodError> {
        for period in self.periods_mut() {
            period.shift_later(unit, amount)?;
        }
        Ok(())
    }

    /// Shift every member earlier by `amount` × `unit`.
    ///
    /// # Errors
    ///
    /// Stops at the first member that overflows; members already shifted
    /// keep their new positions.
    fn shift_earlier(&mut self, unit: TimeUnit, amount: i64) -> Result<(), PeriodError> {
        for period in self.periods_mut() {
            period.shift_earlier(unit, amount)?;
        }
        Ok(())
    }

    /// Whether two groups agree on member count and overall span. Cheap
    /// coarse comparison; element-level checks belong to each container's
    /// equality.
    fn has_same_characteristics_as<G: TimePeriodGroup>(&self, other: &G) -> bool {
        self.len() == other.len()
            && self.start_date() == other.start_date()
            && self.end_date() == other.end_date()
    }

    /// Member-level equality. With `consider_order` the comparison is
    /// positional; without it, every member of `self` must equal some
    /// member of `other` (same characteristics required either way).
    fn equals<G: TimePeriodGroup>(&self, other: &G, consider_order: bool) -> bool {
        if !self.has_same_characteristics_as(other) {
            return false;
        }
        if consider_order {
            self.periods() == other.periods()
        } else {
            self.periods()
                .iter()
                .all(|p| other.periods().contains(p))
        }
    }
}
