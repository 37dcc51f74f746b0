//! Ordered closed ranges of Clocks.
//!
//! An [`Interval`] is a `(start, end)` pair with `start ≤ end` enforced at
//! construction. Ranges are closed at both ends unless an operation
//! explicitly asks for exclusive bounds. Day enumeration and the fixed
//! 6-row week matrix used by month grids live here.

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::clock::{resolve_local, Clock, Unit, WeekStart};
use crate::error::{ClockError, Result};

/// A closed range of time, `start ≤ end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: Clock,
    end: Clock,
}

impl Interval {
    /// Build an interval. Fails with [`ClockError::Ordering`] iff `start` is
    /// strictly after `end`; `start == end` is a valid single-point range.
    pub fn new(start: Clock, end: Clock) -> Result<Self> {
        if start > end {
            return Err(ClockError::Ordering {
                start: start.to_iso_string(),
                end: end.to_iso_string(),
            });
        }
        Ok(Interval { start, end })
    }

    pub fn start(&self) -> &Clock {
        &self.start
    }

    pub fn end(&self) -> &Clock {
        &self.end
    }

    /// Lazily enumerate the calendar days covered by this range, as one
    /// local-midnight Clock per day, start's date through end's date
    /// inclusive. The iterator is `Clone` and therefore restartable; its
    /// exact length is `diff_days + 1`, minimum 1.
    pub fn days(&self) -> Days {
        Days {
            cursor: self.start.local_date(),
            tz: self.start.timezone(),
            remaining: (self.start.diff_days(&self.end) + 1).max(1) as usize,
        }
    }

    /// Materialize [`Interval::days`] into a vector.
    pub fn to_vec(&self) -> Vec<Clock> {
        self.days().collect()
    }

    /// Whether two closed ranges intersect. Inclusive treats touching
    /// endpoints (one ends exactly where the other starts) as overlapping;
    /// exclusive requires a strict interior intersection.
    pub fn is_overlap(&self, other: &Interval, inclusive: bool) -> bool {
        if inclusive {
            self.start <= other.end && other.start <= self.end
        } else {
            self.start < other.end && other.start < self.end
        }
    }

    /// Whether a point lies inside this range.
    pub fn contains(&self, clock: &Clock, inclusive: bool) -> bool {
        if inclusive {
            self.start <= *clock && *clock <= self.end
        } else {
            self.start < *clock && *clock < self.end
        }
    }

    /// Exactly 6 consecutive week-long sub-intervals, the first aligned to
    /// the week (per `week_start`) containing this interval's start. This is
    /// the fixed 6-row grid a month view renders into regardless of how many
    /// weeks the month actually spans.
    pub fn to_week_matrix(&self, week_start: WeekStart) -> Result<[Interval; 6]> {
        let first = self.start.start_of(Unit::Week, Some(week_start))?;
        let row = |i: i64| -> Result<Interval> {
            let row_start = first.add(i, Unit::Week);
            let row_end = row_start.end_of(Unit::Week, Some(week_start))?;
            Interval::new(row_start, row_end)
        };
        Ok([row(0)?, row(1)?, row(2)?, row(3)?, row(4)?, row(5)?])
    }
}

/// Day-granular iterator over an [`Interval`]. See [`Interval::days`].
///
/// Steps over plain calendar dates so a DST gap at one midnight cannot skew
/// the wall time of later days.
#[derive(Debug, Clone)]
pub struct Days {
    cursor: NaiveDate,
    tz: Tz,
    remaining: usize,
}

impl Iterator for Days {
    type Item = Clock;

    fn next(&mut self) -> Option<Clock> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = day_clock(self.cursor, self.tz);
        self.cursor = self.cursor.succ_opt().unwrap_or(self.cursor);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Days {}

/// Argument for between-style predicates: either an already-ordered
/// interval or a raw start/end pair. One function over this sum type
/// replaces call-site overloading.
#[derive(Debug, Clone, Copy)]
pub enum Bounds {
    Span(Interval),
    Points { start: Clock, end: Clock },
}

impl Bounds {
    pub(crate) fn endpoints(&self) -> (Clock, Clock) {
        match self {
            Bounds::Span(interval) => (interval.start, interval.end),
            Bounds::Points { start, end } => (*start, *end),
        }
    }
}

/// Midnight Clock for a plain local date in the given timezone, resolving
/// DST the same way Clock transforms do. Handy for tests and callers that
/// build windows from dates rather than instants.
pub fn day_clock(date: NaiveDate, tz: Tz) -> Clock {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    Clock::new(resolve_local(tz, naive).timestamp_millis(), tz)
}
