//! Elapsed-seconds constants for the supported granularities.
//!
//! Month values cover the four possible month lengths; `SECONDS_IN_YEAR` is
//! the mean civil year. These are elapsed-time conversion factors only —
//! calendar-aware month/year computations go through
//! [`PeriodCalendar`](crate::PeriodCalendar) instead.

pub const SECONDS_IN_MINUTE: i64 = 60;
pub const SECONDS_IN_HOUR: i64 = 3_600;
pub const SECONDS_IN_DAY: i64 = 86_400;
pub const SECONDS_IN_WEEK: i64 = 604_800;
pub const SECONDS_IN_MONTH_28: i64 = 2_419_200;
pub const SECONDS_IN_MONTH_29: i64 = 2_505_600;
pub const SECONDS_IN_MONTH_30: i64 = 2_592_000;
pub const SECONDS_IN_MONTH_31: i64 = 2_678_400;
pub const SECONDS_IN_YEAR: i64 = 31_556_900;
