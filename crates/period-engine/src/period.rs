//! The core time period: a mutable `[start, end]` interval over UTC
//! instants, with relationship classification, duration accessors, and
//! anchored mutation.
//!
//! A period tolerates `start > end` — the degenerate case is classified
//! (as [`Relation::None`], zero durations) rather than rejected, because
//! mutations like an end-anchored shorten can legitimately pass through it.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::calendar::{distant_future, distant_past, seconds_between, PeriodCalendar, TimeUnit};
use crate::consts::{SECONDS_IN_HOUR, SECONDS_IN_MINUTE};
use crate::error::PeriodError;

// ── Classification enums ────────────────────────────────────────────────────

/// How one period relates to another: a total 14-way classification over
/// the orderings of the four boundary instants.
///
/// Produced by [`TimePeriod::relation_to`]. `None` covers the degenerate
/// case where either period has `start >= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Relation {
    After,
    StartTouching,
    StartInside,
    InsideStartTouching,
    EnclosingStartTouching,
    Enclosing,
    EnclosingEndTouching,
    ExactMatch,
    Inside,
    InsideEndTouching,
    EndInside,
    EndTouching,
    Before,
    None,
}

/// The endpoint held fixed during a lengthen/shorten mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Anchor {
    Start,
    Center,
    End,
}

/// Whether an instant-containment check includes the period's endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IntervalBounds {
    Open,
    Closed,
}

// ── TimePeriod ──────────────────────────────────────────────────────────────

/// A bounded time interval with a calendar for component arithmetic.
///
/// Value semantics: cloning yields an independent period sharing the same
/// (copyable) calendar configuration. Equality compares `start` and `end`
/// only — calendars are interchangeable configuration, not identity.
#[derive(Debug, Clone)]
pub struct TimePeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    calendar: PeriodCalendar,
}

impl PartialEq for TimePeriod {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl TimePeriod {
    /// A period from an explicit start and end.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, calendar: PeriodCalendar) -> Self {
        Self {
            start,
            end,
            calendar,
        }
    }

    /// A period of `amount` × `unit` beginning at `date`.
    ///
    /// A negative amount reverses direction, producing `end < start`.
    ///
    /// # Errors
    ///
    /// Propagates [`PeriodError::ArithmeticOverflow`] from the calendar.
    pub fn starting_at(
        date: DateTime<Utc>,
        unit: TimeUnit,
        amount: i64,
        calendar: PeriodCalendar,
    ) -> Result<Self, PeriodError> {
        let end = calendar.add(unit, amount, date)?;
        Ok(Self::new(date, end, calendar))
    }

    /// A period of `amount` × `unit` ending at `date`.
    ///
    /// # Errors
    ///
    /// Propagates [`PeriodError::ArithmeticOverflow`] from the calendar.
    pub fn ending_at(
        date: DateTime<Utc>,
        unit: TimeUnit,
        amount: i64,
        calendar: PeriodCalendar,
    ) -> Result<Self, PeriodError> {
        let start = calendar.add(unit, -amount, date)?;
        Ok(Self::new(start, date, calendar))
    }

    /// The largest representable period: distant past to distant future.
    pub fn all_time(calendar: PeriodCalendar) -> Self {
        Self::new(distant_past(), distant_future(), calendar)
    }

    /// The calendar used for this period's component arithmetic.
    pub fn calendar(&self) -> PeriodCalendar {
        self.calendar
    }

    /// Whether this period is a single instant (`start == end`).
    pub fn is_moment(&self) -> bool {
        self.start == self.end
    }

    // ── Durations ───────────────────────────────────────────────────────

    /// Duration in whole units of the given granularity.
    ///
    /// Year through day are calendar-aware whole-unit counts; hour, minute,
    /// and second truncate the fractional accessors below. All are zero
    /// when `start >= end`.
    pub fn duration_in(&self, unit: TimeUnit) -> i64 {
        match unit {
            TimeUnit::Second => self.duration_in_seconds() as i64,
            TimeUnit::Minute => self.duration_in_minutes() as i64,
            TimeUnit::Hour => self.duration_in_hours() as i64,
            TimeUnit::Day => self.duration_in_days(),
            TimeUnit::Week => self.duration_in_weeks(),
            TimeUnit::Month => self.duration_in_months(),
            TimeUnit::Year => self.duration_in_years(),
        }
    }

    pub fn duration_in_years(&self) -> i64 {
        self.calendar
            .units_earlier(TimeUnit::Year, self.start, self.end)
    }

    pub fn duration_in_months(&self) -> i64 {
        self.calendar
            .units_earlier(TimeUnit::Month, self.start, self.end)
    }

    pub fn duration_in_weeks(&self) -> i64 {
        self.calendar
            .units_earlier(TimeUnit::Week, self.start, self.end)
    }

    pub fn duration_in_days(&self) -> i64 {
        self.calendar
            .units_earlier(TimeUnit::Day, self.start, self.end)
    }

    /// Fractional hours, unlike the truncated integer a group reports.
    pub fn duration_in_hours(&self) -> f64 {
        self.duration_in_seconds() / SECONDS_IN_HOUR as f64
    }

    /// Fractional minutes, unlike the truncated integer a group reports.
    pub fn duration_in_minutes(&self) -> f64 {
        self.duration_in_seconds() / SECONDS_IN_MINUTE as f64
    }

    /// Elapsed seconds from start to end, clamped at zero when invalid.
    pub fn duration_in_seconds(&self) -> f64 {
        seconds_between(self.start, self.end).max(0.0)
    }

    // ── Relationships ───────────────────────────────────────────────────

    /// Classify how `other` relates to this period.
    ///
    /// Returns [`Relation::None`] when either period is not strictly valid
    /// (`start < end`). Branch order matters: boundary-equality checks win
    /// over strict inequalities, so single-point ties resolve to the
    /// touching variants.
    pub fn relation_to(&self, other: &TimePeriod) -> Relation {
        if !(self.start < self.end && other.start < other.end) {
            return Relation::None;
        }

        if other.end < self.start {
            Relation::After
        } else if other.end == self.start {
            Relation::StartTouching
        } else if other.start < self.start && other.end < self.end {
            Relation::StartInside
        } else if other.start == self.start && other.end > self.end {
            Relation::InsideStartTouching
        } else if other.start == self.start && other.end < self.end {
            Relation::EnclosingStartTouching
        } else if other.start > self.start && other.end < self.end {
            Relation::Enclosing
        } else if other.start > self.start && other.end == self.end {
            Relation::EnclosingEndTouching
        } else if other.start == self.start && other.end == self.end {
            Relation::ExactMatch
        } else if other.start < self.start && other.end > self.end {
            Relation::Inside
        } else if other.start < self.start && other.end == self.end {
            Relation::InsideEndTouching
        } else if other.start < self.end && other.end > self.end {
            Relation::EndInside
        } else if other.start == self.end && other.end > self.end {
            Relation::EndTouching
        } else if other.start > self.end {
            Relation::Before
        } else {
            Relation::None
        }
    }

    /// Whether this period lies inside `other` (closed: equal boundaries
    /// count as inside).
    pub fn is_inside(&self, other: &TimePeriod) -> bool {
        other.start <= self.start && other.end >= self.end
    }

    /// Whether this period contains `other` (closed, mirror of
    /// [`is_inside`](Self::is_inside)).
    pub fn contains_period(&self, other: &TimePeriod) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Whether the two periods share interior time. Touching at a single
    /// endpoint does not count.
    pub fn overlaps_with(&self, other: &TimePeriod) -> bool {
        (other.start < self.start && other.end > self.start)
            || (other.start >= self.start && other.end <= self.end)
            || (other.start < self.end && other.end > self.end)
    }

    /// Whether the two periods share any time at all. Touching at a single
    /// endpoint counts.
    pub fn intersects(&self, other: &TimePeriod) -> bool {
        (other.start < self.start && other.end >= self.start)
            || (other.start >= self.start && other.end <= self.end)
            || (other.start <= self.end && other.end > self.end)
    }

    /// The gap between two periods in seconds: zero when they intersect,
    /// otherwise the elapsed time between the nearer pair of endpoints.
    pub fn gap_between(&self, other: &TimePeriod) -> f64 {
        if self.end < other.start {
            seconds_between(self.end, other.start).abs()
        } else if other.end < self.start {
            seconds_between(other.end, self.start).abs()
        } else {
            0.0
        }
    }

    /// Whether `instant` falls within this period, with open bounds
    /// excluding the endpoints and closed bounds including them.
    pub fn contains_instant(&self, instant: DateTime<Utc>, bounds: IntervalBounds) -> bool {
        match bounds {
            IntervalBounds::Open => self.start < instant && self.end > instant,
            IntervalBounds::Closed => self.start <= instant && self.end >= instant,
        }
    }

    // ── Mutations ───────────────────────────────────────────────────────

    /// Move both endpoints earlier by `amount` × `unit`. Duration is
    /// invariant under shift.
    ///
    /// # Errors
    ///
    /// Propagates calendar overflow; the period is unchanged on error.
    pub fn shift_earlier(&mut self, unit: TimeUnit, amount: i64) -> Result<(), PeriodError> {
        self.relocate(unit, -amount, -amount)
    }

    /// Move both endpoints later by `amount` × `unit`.
    ///
    /// # Errors
    ///
    /// Propagates calendar overflow; the period is unchanged on error.
    pub fn shift_later(&mut self, unit: TimeUnit, amount: i64) -> Result<(), PeriodError> {
        self.relocate(unit, amount, amount)
    }

    /// Grow the period by `amount` × `unit`, holding `anchor` fixed.
    ///
    /// A center anchor moves both ends by half the amount, truncated toward
    /// zero (lengthening by 5 days moves each end by 2).
    ///
    /// # Errors
    ///
    /// Propagates calendar overflow; the period is unchanged on error.
    pub fn lengthen(
        &mut self,
        anchor: Anchor,
        unit: TimeUnit,
        amount: i64,
    ) -> Result<(), PeriodError> {
        match anchor {
            Anchor::Start => self.relocate_end(unit, amount),
            Anchor::Center => self.relocate(unit, -(amount / 2), amount / 2),
            Anchor::End => self.relocate_start(unit, -amount),
        }
    }

    /// Shrink the period by `amount` × `unit`, holding `anchor` fixed.
    ///
    /// Shrinking past zero length is permitted and produces an invalid
    /// (`start > end`) period.
    ///
    /// # Errors
    ///
    /// Propagates calendar overflow; the period is unchanged on error.
    pub fn shorten(
        &mut self,
        anchor: Anchor,
        unit: TimeUnit,
        amount: i64,
    ) -> Result<(), PeriodError> {
        match anchor {
            Anchor::Start => self.relocate_end(unit, -amount),
            Anchor::Center => self.relocate(unit, amount / 2, -(amount / 2)),
            Anchor::End => self.relocate_start(unit, amount),
        }
    }

    /// Translate both endpoints by a plain elapsed duration. Used by chain
    /// surgery, which re-links by instant difference rather than calendar
    /// components.
    pub(crate) fn shift_by(&mut self, delta: Duration) {
        self.start += delta;
        self.end += delta;
    }

    fn relocate(
        &mut self,
        unit: TimeUnit,
        start_amount: i64,
        end_amount: i64,
    ) -> Result<(), PeriodError> {
        let start = self.calendar.add(unit, start_amount, self.start)?;
        let end = self.calendar.add(unit, end_amount, self.end)?;
        self.start = start;
        self.end = end;
        Ok(())
    }

    fn relocate_start(&mut self, unit: TimeUnit, amount: i64) -> Result<(), PeriodError> {
        self.start = self.calendar.add(unit, amount, self.start)?;
        Ok(())
    }

    fn relocate_end(&mut self, unit: TimeUnit, amount: i64) -> Result<(), PeriodError> {
        self.end = self.calendar.add(unit, amount, self.end)?;
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
