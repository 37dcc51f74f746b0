//! # grid-clock
//!
//! Timezone-aware, immutable calendar clock and intervals for rendering
//! calendar grids.
//!
//! A [`Clock`] is one absolute instant (epoch milliseconds, quantized down to
//! a 5-minute boundary) plus an IANA timezone from `chrono-tz`. Its calendar
//! fields are a *local view* derived from the offset in effect at that
//! instant, so arithmetic and boundary operations are DST-correct. Equality
//! and ordering always use the absolute instant, never local fields.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono_tz::Tz;
//! use grid_clock::{Clock, Interval, Unit, WeekStart};
//!
//! let start = Clock::from_utc_string("2026-03-04T09:04:00Z", Tz::UTC).unwrap();
//! // Instants are quantized down to 5 minutes.
//! assert_eq!(start.to_iso_string(), "2026-03-04T09:00:00Z");
//!
//! // A Wednesday's week, Monday-aligned.
//! let monday = start.start_of(Unit::Week, Some(WeekStart::Mon)).unwrap();
//! assert_eq!(monday.to_iso_string(), "2026-03-02T00:00:00Z");
//!
//! let window = Interval::new(monday, monday.add(6, Unit::Day)).unwrap();
//! assert_eq!(window.days().count(), 7);
//! ```
//!
//! ## Modules
//!
//! - [`clock`] — the quantized Clock value, arithmetic, comparisons, boundaries
//! - [`interval`] — ordered closed ranges, day enumeration, week matrix
//! - [`format`] — token-template rendering of the local view
//! - [`error`] — the Parse / Ordering / Config / NotSupported taxonomy

pub mod clock;
pub mod error;
pub mod format;
pub mod interval;

pub use clock::{quantize, Clock, Unit, WeekStart, QUANTUM_MS};
pub use error::{ClockError, Result};
pub use interval::{day_clock, Bounds, Days, Interval};
