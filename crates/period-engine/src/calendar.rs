//! Calendar-aware instant arithmetic.
//!
//! [`PeriodCalendar`] is the arithmetic collaborator behind every period
//! operation: it adds signed component amounts to instants and computes
//! whole-unit deltas between them. Instants are always `DateTime<Utc>`;
//! the calendar carries an IANA timezone so that day, month, and year
//! arithmetic is wall-clock correct across DST transitions (adding one day
//! to 09:00 local lands on 09:00 local, even when only 23 elapsed hours
//! separate the two instants).
//!
//! A `PeriodCalendar` is a `Copy` value — a [`Tz`] is an index into a static
//! table — so periods, collections, and chains share one calendar by plain
//! copying, never by deep-cloning configuration.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::consts::{SECONDS_IN_DAY, SECONDS_IN_HOUR, SECONDS_IN_MINUTE};
use crate::error::PeriodError;

// ── Granularities ───────────────────────────────────────────────────────────

/// The unit of a duration, shift, or resize computation.
///
/// `Second`/`Minute`/`Hour` are uniform elapsed time; `Day` through `Year`
/// are calendar components subject to DST, month-length, and leap-year
/// irregularities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

// ── Sentinel instants ───────────────────────────────────────────────────────

/// The start-of-all-time sentinel (0001-01-01T00:00:00Z).
///
/// Deliberately far inside chrono's representable range so that calendar
/// arithmetic on an all-time period cannot overflow.
pub fn distant_past() -> DateTime<Utc> {
    DateTime::from_timestamp(-62_135_596_800, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// The end-of-all-time sentinel (9999-12-31T23:59:59Z).
pub fn distant_future() -> DateTime<Utc> {
    DateTime::from_timestamp(253_402_300_799, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

// ── PeriodCalendar ──────────────────────────────────────────────────────────

/// Calendar configuration: an IANA timezone plus the component arithmetic
/// defined over it.
///
/// All methods are read-only; the calendar is immutable configuration and
/// safe to share freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCalendar {
    tz: Tz,
}

impl Default for PeriodCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl PeriodCalendar {
    /// A calendar computing in the given IANA timezone.
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// A calendar computing in UTC (no DST irregularities).
    pub fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// The timezone this calendar computes in.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// The current instant from the system clock.
    pub fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    /// Build an instant from local calendar components in this calendar's
    /// timezone.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::InvalidComponents`] for dates that do not
    /// exist (e.g. February 30), or [`PeriodError::UnresolvableLocalTime`]
    /// when the wall-clock time falls in a DST gap that cannot be resolved.
    pub fn at(
        &self,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<DateTime<Utc>, PeriodError> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                PeriodError::InvalidComponents(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            })?;
        self.resolve_local(naive)
    }

    /// Add a signed amount of `unit` to an instant.
    ///
    /// Sub-day units are uniform elapsed time. Days and weeks preserve the
    /// local wall-clock time across DST transitions. Months and years adjust
    /// the local date components, clamping the day-of-month when the target
    /// month is shorter (Jan 31 + 1 month = Feb 28).
    ///
    /// # Errors
    ///
    /// Returns [`PeriodError::ArithmeticOverflow`] when the result would
    /// leave the representable calendar range.
    pub fn add(
        &self,
        unit: TimeUnit,
        amount: i64,
        to: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, PeriodError> {
        match unit {
            TimeUnit::Second => self.add_seconds(amount, to),
            TimeUnit::Minute => {
                self.add_seconds(checked_mul(amount, SECONDS_IN_MINUTE, to)?, to)
            }
            TimeUnit::Hour => self.add_seconds(checked_mul(amount, SECONDS_IN_HOUR, to)?, to),
            TimeUnit::Day => self.add_days(amount, to),
            TimeUnit::Week => self.add_days(checked_mul(amount, 7, to)?, to),
            TimeUnit::Month => self.add_months(amount, to),
            TimeUnit::Year => self.add_months(checked_mul(amount, 12, to)?, to),
        }
    }

    /// The signed whole-unit calendar delta from `from` to `to`; positive
    /// when `to` is later.
    ///
    /// Months fold whole years in (13 months, not 1); weeks count whole
    /// 7-day groups of wall-clock days; sub-day units are truncated
    /// elapsed-time division.
    pub fn unit_delta(&self, unit: TimeUnit, from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
        if from <= to {
            self.whole_units(unit, from, to)
        } else {
            -self.whole_units(unit, to, from)
        }
    }

    /// How many whole units earlier `from` is than `than`; zero when `from`
    /// is not earlier.
    pub fn units_earlier(&self, unit: TimeUnit, from: DateTime<Utc>, than: DateTime<Utc>) -> i64 {
        self.unit_delta(unit, from, than).max(0)
    }

    /// Whether `year` is a leap year in the proleptic Gregorian calendar.
    pub fn is_leap_year(year: i32) -> bool {
        (year % 400 == 0) || (year % 4 == 0 && year % 100 != 0)
    }

    // ── Internal arithmetic ─────────────────────────────────────────────

    fn add_seconds(&self, seconds: i64, to: DateTime<Utc>) -> Result<DateTime<Utc>, PeriodError> {
        Duration::try_seconds(seconds)
            .and_then(|d| to.checked_add_signed(d))
            .ok_or_else(|| overflow(to))
    }

    fn add_days(&self, days: i64, to: DateTime<Utc>) -> Result<DateTime<Utc>, PeriodError> {
        let local = to.with_timezone(&self.tz).naive_local();
        let date = Duration::try_days(days)
            .and_then(|d| local.date().checked_add_signed(d))
            .ok_or_else(|| overflow(to))?;
        self.resolve_local(date.and_time(local.time()))
    }

    fn add_months(&self, months: i64, to: DateTime<Utc>) -> Result<DateTime<Utc>, PeriodError> {
        let local = to.with_timezone(&self.tz).naive_local();
        let total = (i64::from(local.year()) * 12 + i64::from(local.month0()))
            .checked_add(months)
            .ok_or_else(|| overflow(to))?;
        let year = i32::try_from(total.div_euclid(12)).map_err(|_| overflow(to))?;
        let month = total.rem_euclid(12) as u32 + 1;
        let day = local.day().min(days_in_month(year, month));
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| overflow(to))?;
        self.resolve_local(date.and_time(local.time()))
    }

    /// Whole units between `earliest` and `latest` (`earliest <= latest`),
    /// computed over local wall-clock components.
    fn whole_units(&self, unit: TimeUnit, earliest: DateTime<Utc>, latest: DateTime<Utc>) -> i64 {
        match unit {
            TimeUnit::Second => (latest - earliest).num_seconds(),
            TimeUnit::Minute => (latest - earliest).num_seconds() / SECONDS_IN_MINUTE,
            TimeUnit::Hour => (latest - earliest).num_seconds() / SECONDS_IN_HOUR,
            TimeUnit::Day => self.whole_days(earliest, latest),
            TimeUnit::Week => self.whole_days(earliest, latest) / 7,
            TimeUnit::Month => self.whole_months(earliest, latest),
            TimeUnit::Year => self.whole_months(earliest, latest) / 12,
        }
    }

    fn whole_days(&self, earliest: DateTime<Utc>, latest: DateTime<Utc>) -> i64 {
        let e = earliest.with_timezone(&self.tz).naive_local();
        let l = latest.with_timezone(&self.tz).naive_local();
        let mut days = l.date().signed_duration_since(e.date()).num_days();
        if l.time() < e.time() {
            days -= 1;
        }
        days.max(0)
    }

    fn whole_months(&self, earliest: DateTime<Utc>, latest: DateTime<Utc>) -> i64 {
        let e = earliest.with_timezone(&self.tz).naive_local();
        let l = latest.with_timezone(&self.tz).naive_local();
        let mut months = (i64::from(l.year()) - i64::from(e.year())) * 12
            + (i64::from(l.month()) - i64::from(e.month()));
        // The anchor day clamps in shorter target months, exactly as add()
        // does, so "Jan 31 → Feb 28" still counts as one whole month.
        let anchor_day = e.day().min(days_in_month(l.year(), l.month()));
        if l.day() < anchor_day || (l.day() == anchor_day && l.time() < e.time()) {
            months -= 1;
        }
        months.max(0)
    }

    /// Map a local wall-clock time back to an instant. Ambiguous (fold)
    /// times take the earlier offset; nonexistent (gap) times slide forward
    /// one hour.
    fn resolve_local(&self, naive: NaiveDateTime) -> Result<DateTime<Utc>, PeriodError> {
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
            LocalResult::None => {
                let slid = naive
                    .checked_add_signed(Duration::hours(1))
                    .ok_or_else(|| PeriodError::UnresolvableLocalTime(naive.to_string()))?;
                match self.tz.from_local_datetime(&slid) {
                    LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
                    LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
                    LocalResult::None => {
                        Err(PeriodError::UnresolvableLocalTime(naive.to_string()))
                    }
                }
            }
        }
    }
}

/// Elapsed time from `from` to `to` in fractional seconds (negative when
/// `to` is earlier).
pub(crate) fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1_000.0
}

fn checked_mul(amount: i64, factor: i64, at: DateTime<Utc>) -> Result<i64, PeriodError> {
    amount.checked_mul(factor).ok_or_else(|| overflow(at))
}

fn overflow(at: DateTime<Utc>) -> PeriodError {
    PeriodError::ArithmeticOverflow(format!("component arithmetic out of range near {at}"))
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        2 => {
            if PeriodCalendar::is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
