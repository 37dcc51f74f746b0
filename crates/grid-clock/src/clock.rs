//! Timezone-aware quantized calendar clock.
//!
//! A [`Clock`] is one immutable absolute instant (epoch milliseconds, quantized
//! down to a 5-minute boundary) paired with an IANA timezone. The calendar
//! fields (year, month, day, weekday, hour, minute) are a *local view* computed
//! from the timezone offset **at that instant**, so DST transitions are handled
//! correctly. Equality and ordering always operate on the absolute instant —
//! never on local-view fields — so two Clocks built from the same instant in
//! different timezones compare equal while reporting different local getters.
//!
//! Every transform returns a new Clock; nothing is mutated in place.

use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ClockError, Result};
use crate::format;
use crate::interval::Bounds;

/// Quantization step: all instants are floored to a 5-minute boundary.
pub const QUANTUM_MS: i64 = 5 * 60 * 1000;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Supported instant range: years 0000..=9999. Instants outside are clamped
/// at construction so local-view conversion can never fail.
const MIN_INSTANT_MS: i64 = -62_167_219_200_000;
const MAX_INSTANT_MS: i64 = 253_402_300_500_000;

/// Floor an instant to the nearest 5-minute boundary.
///
/// Uses euclidean division so pre-epoch (negative) instants floor toward
/// negative infinity, not toward zero.
pub fn quantize(ms: i64) -> i64 {
    ms.div_euclid(QUANTUM_MS) * QUANTUM_MS
}

/// Calendar unit accepted by arithmetic, diff, and comparison operations.
///
/// Not every operation supports every unit; unsupported combinations fail
/// with [`ClockError::NotSupported`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Year => "year",
        }
    }
}

/// First day of the week for week-aligned operations.
///
/// There is no default — operations that need a week boundary take this
/// explicitly and fail with [`ClockError::Config`] when it is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sun,
    Mon,
}

/// An immutable timezone-aware point in time, quantized to 5 minutes.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    utc: DateTime<Utc>,
    tz: Tz,
}

// Equality and ordering are on the absolute instant only. The timezone is a
// presentation concern and must never influence comparison.
impl PartialEq for Clock {
    fn eq(&self, other: &Self) -> bool {
        self.utc == other.utc
    }
}

impl Eq for Clock {}

impl PartialOrd for Clock {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Clock {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.utc.cmp(&other.utc)
    }
}

impl Clock {
    /// Build a Clock from epoch milliseconds, quantized down to the nearest
    /// 5-minute boundary. Instants outside years 0000..=9999 are clamped.
    pub fn new(instant_ms: i64, tz: Tz) -> Self {
        let ms = quantize(instant_ms).clamp(MIN_INSTANT_MS, MAX_INSTANT_MS);
        let utc = DateTime::from_timestamp_millis(ms)
            .unwrap_or(DateTime::UNIX_EPOCH);
        Clock { utc, tz }
    }

    /// The current instant. The timezone is always an explicit parameter;
    /// there is no ambient platform default.
    pub fn now(tz: Tz) -> Self {
        Clock::new(Utc::now().timestamp_millis(), tz)
    }

    /// Parse a strict UTC literal: exactly `YYYY-MM-DDTHH:mm:ssZ`, with an
    /// optional `.SSS` fraction. Any other separator, missing `Z`, or
    /// out-of-range field fails with [`ClockError::Parse`].
    pub fn from_utc_string(iso: &str, tz: Tz) -> Result<Self> {
        let ms = parse_utc_literal(iso)?;
        Ok(Clock::new(ms, tz))
    }

    /// Render the quantized instant as a UTC `YYYY-MM-DDTHH:mm:ssZ` literal.
    pub fn to_iso_string(&self) -> String {
        self.utc.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// The quantized absolute instant in epoch milliseconds.
    pub fn get_time(&self) -> i64 {
        self.utc.timestamp_millis()
    }

    /// The timezone this Clock presents its local view in.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// The local view: the instant converted through the timezone offset in
    /// effect *at that instant*.
    pub(crate) fn local(&self) -> DateTime<Tz> {
        self.utc.with_timezone(&self.tz)
    }

    // ── Local-view getters ──────────────────────────────────────────────

    pub fn year(&self) -> i32 {
        self.local().year()
    }

    /// Month of year, 1..=12.
    pub fn month(&self) -> u32 {
        self.local().month()
    }

    pub fn day_of_month(&self) -> u32 {
        self.local().day()
    }

    /// Day of week, 0=Sunday .. 6=Saturday.
    pub fn day_of_week(&self) -> u32 {
        self.local().weekday().num_days_from_sunday()
    }

    pub fn hour(&self) -> u32 {
        self.local().hour()
    }

    pub fn minute(&self) -> u32 {
        self.local().minute()
    }

    /// The full local calendar date.
    pub fn local_date(&self) -> NaiveDate {
        self.local().date_naive()
    }

    // ── Transforms ──────────────────────────────────────────────────────

    /// Same local calendar date with the wall time replaced, re-quantized,
    /// same timezone. Out-of-range hour/minute is a Parse error. A wall time
    /// falling in a DST gap is shifted forward to the next valid time; an
    /// ambiguous wall time resolves to the earlier offset.
    pub fn set_time(&self, hour: u32, minute: u32) -> Result<Self> {
        let naive = self
            .local()
            .date_naive()
            .and_hms_opt(hour, minute, 0)
            .ok_or_else(|| ClockError::Parse(format!("invalid wall time {hour:02}:{minute:02}")))?;
        Ok(self.from_local(naive))
    }

    /// Add `amount` of `unit` (negative amounts subtract). Minute and hour
    /// are duration arithmetic on the instant; day, week, month, and year
    /// are local-calendar arithmetic that preserves the wall time. Month and
    /// year clamp the day-of-month to the last valid day of the target month
    /// (Jan 31 + 1 month lands on the last day of February).
    pub fn add(&self, amount: i64, unit: Unit) -> Self {
        match unit {
            Unit::Minute => self.shift_ms(amount.saturating_mul(MINUTE_MS)),
            Unit::Hour => self.shift_ms(amount.saturating_mul(HOUR_MS)),
            Unit::Day => self.shift_days(amount),
            Unit::Week => self.shift_days(amount.saturating_mul(7)),
            Unit::Month => self.shift_months(amount),
            Unit::Year => self.shift_months(amount.saturating_mul(12)),
        }
    }

    fn shift_ms(&self, delta_ms: i64) -> Self {
        Clock::new(self.get_time().saturating_add(delta_ms), self.tz)
    }

    fn shift_days(&self, days: i64) -> Self {
        // Bounded so Duration::days cannot overflow; the supported year
        // range is far narrower anyway.
        let days = days.clamp(-4_000_000, 4_000_000);
        let local = self.local();
        let date = local
            .date_naive()
            .checked_add_signed(Duration::days(days))
            .unwrap_or(local.date_naive());
        self.from_local(date.and_time(local.time()))
    }

    fn shift_months(&self, months: i64) -> Self {
        let local = self.local();
        let total = i64::from(local.year()) * 12 + i64::from(local.month0()) + months;
        let year = total.div_euclid(12).clamp(0, 9999) as i32;
        let month = total.rem_euclid(12) as u32 + 1;
        let day = local.day().min(last_day_of_month(year, month));
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap_or(local.date_naive());
        self.from_local(date.and_time(local.time()))
    }

    /// Calendar-day difference, sign convention `other - self`: both sides
    /// are truncated to their own local calendar date, then whole days
    /// between the dates are counted. DST transitions never perturb the
    /// result because no elapsed-hours division is involved.
    pub fn diff_days(&self, other: &Clock) -> i64 {
        (other.local().date_naive() - self.local().date_naive()).num_days()
    }

    /// Difference `other - self` in the given unit (other later ⇒ positive).
    ///
    /// Day, month, and year are *calendar-unit* differences: both sides are
    /// normalized to the start of the unit in their own local view before
    /// subtracting, so month/year-length variation never perturbs the
    /// result. Minute and hour are *duration* differences: raw elapsed time
    /// divided by the unit, truncated toward zero. Week has no defined
    /// convention and fails with NotSupported.
    pub fn diff(&self, other: &Clock, unit: Unit) -> Result<i64> {
        match unit {
            Unit::Minute => Ok((other.get_time() - self.get_time()) / MINUTE_MS),
            Unit::Hour => Ok((other.get_time() - self.get_time()) / HOUR_MS),
            Unit::Day => Ok(self.diff_days(other)),
            Unit::Month => {
                let (a, b) = (self.local(), other.local());
                Ok((i64::from(b.year()) * 12 + i64::from(b.month0()))
                    - (i64::from(a.year()) * 12 + i64::from(a.month0())))
            }
            Unit::Year => Ok(i64::from(other.local().year()) - i64::from(self.local().year())),
            Unit::Week => Err(ClockError::NotSupported {
                unit: unit.name(),
                operation: "diff",
            }),
        }
    }

    // ── Comparisons ─────────────────────────────────────────────────────

    /// Comparison key: the absolute instant truncated to the unit's
    /// precision. Month and year truncate the instant's UTC calendar fields
    /// so the key stays a function of the instant alone. Week has no
    /// instant-aligned boundary and is NotSupported.
    fn precision_key(&self, unit: Unit) -> Result<i64> {
        let ms = self.get_time();
        match unit {
            Unit::Minute => Ok(ms.div_euclid(MINUTE_MS)),
            Unit::Hour => Ok(ms.div_euclid(HOUR_MS)),
            Unit::Day => Ok(ms.div_euclid(DAY_MS)),
            Unit::Month => Ok(i64::from(self.utc.year()) * 12 + i64::from(self.utc.month0())),
            Unit::Year => Ok(i64::from(self.utc.year())),
            Unit::Week => Err(ClockError::NotSupported {
                unit: unit.name(),
                operation: "compare",
            }),
        }
    }

    /// Equal at the given precision.
    pub fn is_equal(&self, other: &Clock, unit: Unit) -> Result<bool> {
        Ok(self.precision_key(unit)? == other.precision_key(unit)?)
    }

    /// Strictly before at the given precision; equality counts as false.
    pub fn is_before(&self, other: &Clock, unit: Unit) -> Result<bool> {
        Ok(self.precision_key(unit)? < other.precision_key(unit)?)
    }

    /// Strictly after at the given precision; equality counts as false.
    pub fn is_after(&self, other: &Clock, unit: Unit) -> Result<bool> {
        Ok(self.precision_key(unit)? > other.precision_key(unit)?)
    }

    /// Before or equal at the given precision.
    pub fn is_on_or_before(&self, other: &Clock, unit: Unit) -> Result<bool> {
        Ok(self.precision_key(unit)? <= other.precision_key(unit)?)
    }

    /// After or equal at the given precision.
    pub fn is_on_or_after(&self, other: &Clock, unit: Unit) -> Result<bool> {
        Ok(self.precision_key(unit)? >= other.precision_key(unit)?)
    }

    /// True when both Clocks fall on the same local calendar date, each in
    /// its own timezone.
    pub fn is_same_date(&self, other: &Clock) -> bool {
        self.local().date_naive() == other.local().date_naive()
    }

    /// True when this Clock's local date equals the current date in the same
    /// timezone. Impure: reads the system clock at call time. Tests should
    /// compare against a controlled Clock via [`Clock::is_same_date`].
    pub fn is_today(&self) -> bool {
        self.is_same_date(&Clock::now(self.tz))
    }

    /// True when this Clock lies within the given bounds. Accepts either a
    /// constructed interval or a raw start/end pair via the [`Bounds`] sum
    /// type. Inclusive treats the endpoints as inside; exclusive requires
    /// strict interior membership.
    pub fn is_between(&self, bounds: &Bounds, inclusive: bool) -> bool {
        let (start, end) = bounds.endpoints();
        if inclusive {
            start <= *self && *self <= end
        } else {
            start < *self && *self < end
        }
    }

    // ── Unit boundaries ─────────────────────────────────────────────────

    /// First quantized instant of the containing unit: 00:00 of the day,
    /// the week's first day (requires an explicit `week_start` — omitting
    /// it is a Config error, never a silent default), day 1 of the month,
    /// or Jan 1 of the year. Minute and hour are NotSupported.
    pub fn start_of(&self, unit: Unit, week_start: Option<WeekStart>) -> Result<Self> {
        let date = self.local().date_naive();
        let start_date = match unit {
            Unit::Day => date,
            Unit::Week => back_to_week_start(date, require_week_start(week_start)?),
            Unit::Month => first_of_month(date.year(), date.month()),
            Unit::Year => first_of_month(date.year(), 1),
            Unit::Minute | Unit::Hour => {
                return Err(ClockError::NotSupported {
                    unit: unit.name(),
                    operation: "start_of",
                })
            }
        };
        Ok(self.from_local(start_date.and_hms_opt(0, 0, 0).unwrap_or_default()))
    }

    /// Last quantized instant of the containing unit: 23:55 of the day, of
    /// the week's last day, or of the month's/year's last calendar day.
    /// Week requires an explicit `week_start` like [`Clock::start_of`].
    pub fn end_of(&self, unit: Unit, week_start: Option<WeekStart>) -> Result<Self> {
        let date = self.local().date_naive();
        let end_date = match unit {
            Unit::Day => date,
            Unit::Week => back_to_week_start(date, require_week_start(week_start)?)
                .checked_add_signed(Duration::days(6))
                .unwrap_or(date),
            Unit::Month => {
                let last = last_day_of_month(date.year(), date.month());
                NaiveDate::from_ymd_opt(date.year(), date.month(), last).unwrap_or(date)
            }
            Unit::Year => NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date),
            Unit::Minute | Unit::Hour => {
                return Err(ClockError::NotSupported {
                    unit: unit.name(),
                    operation: "end_of",
                })
            }
        };
        Ok(self.from_local(end_date.and_hms_opt(23, 55, 0).unwrap_or_default()))
    }

    /// Render the local view through a token template. See [`format::render`].
    pub fn format(&self, template: &str) -> String {
        format::render(self, template)
    }

    /// Rebuild a Clock at the given local wall time in this Clock's
    /// timezone, resolving DST gaps and ambiguities.
    fn from_local(&self, naive: NaiveDateTime) -> Self {
        Clock::new(resolve_local(self.tz, naive).timestamp_millis(), self.tz)
    }
}

/// Map a local wall time to an absolute instant. Ambiguous wall times
/// (fall-back hour) take the earlier offset; wall times in a spring-forward
/// gap are shifted forward to the next instant that exists.
pub(crate) fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earlier, _) => earlier,
        LocalResult::None => (1..=288)
            .find_map(|i| {
                naive
                    .checked_add_signed(Duration::minutes(5 * i))
                    .and_then(|probe| tz.from_local_datetime(&probe).earliest())
            })
            .unwrap_or_else(|| tz.from_utc_datetime(&naive)),
    }
}

fn require_week_start(week_start: Option<WeekStart>) -> Result<WeekStart> {
    week_start.ok_or(ClockError::Config("week_start"))
}

/// Walk a date back to the first day of its week.
fn back_to_week_start(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let from_sunday = date.weekday().num_days_from_sunday() as i64;
    let offset = match week_start {
        WeekStart::Sun => from_sunday,
        WeekStart::Mon => (from_sunday + 6) % 7,
    };
    date.checked_sub_signed(Duration::days(offset)).unwrap_or(date)
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

/// Last calendar day of the given month (handles leap February).
fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}

/// Strict structural parse of `YYYY-MM-DDTHH:mm:ssZ` (optional `.SSS`).
/// Returns epoch milliseconds.
fn parse_utc_literal(s: &str) -> Result<i64> {
    let err = || ClockError::Parse(format!("expected YYYY-MM-DDTHH:mm:ssZ, got {s:?}"));

    let bytes = s.as_bytes();
    if bytes.len() != 20 && bytes.len() != 24 {
        return Err(err());
    }
    // Fixed separator positions; everything else must be an ASCII digit.
    for (i, &b) in bytes.iter().enumerate() {
        let ok = match i {
            4 | 7 => b == b'-',
            10 => b == b'T',
            13 | 16 => b == b':',
            19 if bytes.len() == 24 => b == b'.',
            i if i == bytes.len() - 1 => b == b'Z',
            _ => b.is_ascii_digit(),
        };
        if !ok {
            return Err(err());
        }
    }

    let field = |range: std::ops::Range<usize>| -> u32 {
        s[range].parse().unwrap_or(0)
    };
    let year: i32 = s[0..4].parse().unwrap_or(0);
    let (month, day) = (field(5..7), field(8..10));
    let (hour, minute, second) = (field(11..13), field(14..16), field(17..19));
    let millis = if bytes.len() == 24 { field(20..23) } else { 0 };

    let naive = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_milli_opt(hour, minute, second, millis))
        .ok_or_else(|| ClockError::Parse(format!("out-of-range calendar field in {s:?}")))?;
    Ok(naive.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_floors_negative_instants() {
        assert_eq!(quantize(-1), -QUANTUM_MS);
        assert_eq!(quantize(-QUANTUM_MS), -QUANTUM_MS);
        assert_eq!(quantize(-QUANTUM_MS - 1), -2 * QUANTUM_MS);
    }

    #[test]
    fn last_day_handles_leap_years() {
        assert_eq!(last_day_of_month(2024, 2), 29);
        assert_eq!(last_day_of_month(2025, 2), 28);
        assert_eq!(last_day_of_month(2025, 12), 31);
    }
}
