//! # period-engine
//!
//! Calendar-aware time period algebra.
//!
//! A [`TimePeriod`] is a mutable interval between two UTC instants that can
//! classify its relationship to other periods, report calendar-aware
//! durations, and be shifted, lengthened, or shortened around an anchor.
//! Periods compose into a [`TimePeriodCollection`] (ordered, free-form, with
//! sorting and relationship queries) or a [`TimePeriodChain`] (end-to-end
//! links that stay contiguous through every edit).
//!
//! ## Modules
//!
//! - [`calendar`] — Timezone-aware component arithmetic and whole-unit deltas
//! - [`period`] — The core interval type and its 14-way relation classification
//! - [`group`] — Span, duration, and bulk-shift behavior shared by containers
//! - [`collection`] — Ordered multiset of periods with sorts and queries
//! - [`chain`] — Contiguous sequence of periods with rippling edits
//! - [`consts`] — Elapsed-seconds conversion factors
//! - [`error`] — Error types

pub mod calendar;
pub mod chain;
pub mod collection;
pub mod consts;
pub mod error;
pub mod group;
pub mod period;

pub use calendar::{distant_future, distant_past, PeriodCalendar, TimeUnit};
pub use chain::TimePeriodChain;
pub use collection::TimePeriodCollection;
pub use error::PeriodError;
pub use group::TimePeriodGroup;
pub use period::{Anchor, IntervalBounds, Relation, TimePeriod};
