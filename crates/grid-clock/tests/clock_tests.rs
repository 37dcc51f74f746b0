//! Tests for the quantized timezone-aware Clock.

use chrono_tz::Tz;
use grid_clock::{Bounds, Clock, ClockError, Interval, Unit, WeekStart, QUANTUM_MS};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn utc(iso: &str) -> Clock {
    Clock::from_utc_string(iso, Tz::UTC).unwrap()
}

fn in_tz(iso: &str, tz: &str) -> Clock {
    Clock::from_utc_string(iso, tz.parse().unwrap()).unwrap()
}

// ── Quantization ────────────────────────────────────────────────────────────

#[test]
fn construction_floors_to_five_minute_boundary() {
    let clock = Clock::new(QUANTUM_MS + 1, Tz::UTC);
    assert_eq!(clock.get_time(), QUANTUM_MS);

    // Floor semantics for pre-epoch instants: -1ms lands on -5min, not 0.
    let before_epoch = Clock::new(-1, Tz::UTC);
    assert_eq!(before_epoch.get_time(), -QUANTUM_MS);
}

#[test]
fn parse_then_render_shows_truncation() {
    let clock = utc("2025-01-02T03:04:00Z");
    assert_eq!(clock.to_iso_string(), "2025-01-02T03:00:00Z");
}

// ── Strict UTC literal parsing ──────────────────────────────────────────────

#[test]
fn accepts_exact_shape_with_optional_millis() {
    assert!(Clock::from_utc_string("2026-03-04T09:05:00Z", Tz::UTC).is_ok());
    assert!(Clock::from_utc_string("2026-03-04T09:05:00.123Z", Tz::UTC).is_ok());
}

#[test]
fn rejects_any_other_shape() {
    let bad = [
        "2026-03-04 09:05:00Z",      // space separator
        "2026-03-04T09:05:00",       // missing Z
        "2026/03/04T09:05:00Z",      // wrong date separator
        "2026-03-04T09:05:00+00:00", // offset instead of Z
        "2026-03-04T09:05:00.12Z",   // short fraction
        "2026-3-04T09:05:00Z",       // unpadded month
        "not a timestamp",
    ];
    for input in bad {
        let result = Clock::from_utc_string(input, Tz::UTC);
        assert!(
            matches!(result, Err(ClockError::Parse(_))),
            "expected Parse error for {input:?}, got {result:?}"
        );
    }
}

#[test]
fn rejects_out_of_range_calendar_fields() {
    assert!(matches!(
        Clock::from_utc_string("2026-13-01T00:00:00Z", Tz::UTC),
        Err(ClockError::Parse(_))
    ));
    assert!(matches!(
        Clock::from_utc_string("2026-02-30T00:00:00Z", Tz::UTC),
        Err(ClockError::Parse(_))
    ));
    assert!(matches!(
        Clock::from_utc_string("2026-02-01T24:00:00Z", Tz::UTC),
        Err(ClockError::Parse(_))
    ));
}

// ── Instant identity across timezones ───────────────────────────────────────

#[test]
fn same_instant_in_different_zones_is_equal_but_views_differ() {
    let london = in_tz("2026-03-16T00:00:00Z", "Europe/London");
    let tokyo = in_tz("2026-03-16T00:00:00Z", "Asia/Tokyo");

    assert!(london.is_equal(&tokyo, Unit::Minute).unwrap());
    assert_eq!(london.get_time(), tokyo.get_time());
    assert_eq!(london, tokyo);

    // Local views disagree: midnight in London is already the 16th's morning
    // in Tokyo.
    assert_eq!(london.hour(), 0);
    assert_eq!(tokyo.hour(), 9);
    assert_eq!(london.day_of_month(), 16);
    assert_eq!(tokyo.day_of_month(), 16);
}

#[test]
fn local_view_uses_offset_at_that_instant_not_now() {
    // New York is UTC-5 in January and UTC-4 in July. Both of these must be
    // local noon regardless of when the test runs.
    let winter = in_tz("2026-01-15T17:00:00Z", "America/New_York");
    let summer = in_tz("2026-07-15T16:00:00Z", "America/New_York");
    assert_eq!(winter.hour(), 12);
    assert_eq!(summer.hour(), 12);
}

#[test]
fn day_of_week_is_sunday_zero() {
    // 2026-01-15 is a Thursday, 2026-03-01 a Sunday.
    assert_eq!(utc("2026-01-15T12:00:00Z").day_of_week(), 4);
    assert_eq!(utc("2026-03-01T12:00:00Z").day_of_week(), 0);
}

// ── set_time ────────────────────────────────────────────────────────────────

#[test]
fn set_time_replaces_wall_time_and_requantizes() {
    let clock = utc("2026-03-04T09:00:00Z");
    let moved = clock.set_time(14, 32).unwrap();
    assert_eq!(moved.to_iso_string(), "2026-03-04T14:30:00Z");
    // Original untouched.
    assert_eq!(clock.to_iso_string(), "2026-03-04T09:00:00Z");
}

#[test]
fn set_time_rejects_out_of_range_wall_time() {
    let clock = utc("2026-03-04T09:00:00Z");
    assert!(matches!(clock.set_time(24, 0), Err(ClockError::Parse(_))));
    assert!(matches!(clock.set_time(12, 60), Err(ClockError::Parse(_))));
}

#[test]
fn set_time_shifts_forward_through_dst_gap() {
    // 2026-03-08 02:30 does not exist in New York (spring forward skips
    // 02:00-03:00). The result shifts to the first valid wall time.
    let clock = in_tz("2026-03-08T12:00:00Z", "America/New_York");
    let moved = clock.set_time(2, 30).unwrap();
    assert_eq!(moved.hour(), 3);
    assert_eq!(moved.day_of_month(), 8);
}

// ── Calendar arithmetic ─────────────────────────────────────────────────────

#[test]
fn add_minutes_and_hours_are_duration_arithmetic() {
    let clock = utc("2026-03-04T09:00:00Z");
    assert_eq!(clock.add(90, Unit::Minute).to_iso_string(), "2026-03-04T10:30:00Z");
    assert_eq!(clock.add(-2, Unit::Hour).to_iso_string(), "2026-03-04T07:00:00Z");
}

#[test]
fn add_month_clamps_to_last_valid_day() {
    let jan31 = utc("2026-01-31T12:00:00Z");
    let feb = jan31.add(1, Unit::Month);
    assert_eq!((feb.year(), feb.month(), feb.day_of_month()), (2026, 2, 28));

    // Leap year keeps the 29th.
    let leap = utc("2024-01-31T12:00:00Z").add(1, Unit::Month);
    assert_eq!((leap.month(), leap.day_of_month()), (2, 29));
}

#[test]
fn add_year_clamps_leap_day() {
    let feb29 = utc("2024-02-29T12:00:00Z");
    let next = feb29.add(1, Unit::Year);
    assert_eq!((next.year(), next.month(), next.day_of_month()), (2025, 2, 28));
}

#[test]
fn add_negative_months_walks_backward() {
    let mar31 = utc("2026-03-31T12:00:00Z");
    let feb = mar31.add(-1, Unit::Month);
    assert_eq!((feb.month(), feb.day_of_month()), (2, 28));
}

#[test]
fn add_day_preserves_wall_time_across_dst() {
    // Local 07:00 the day before New York springs forward; one calendar day
    // later is still local 07:00 even though only 23 hours elapsed.
    let before = in_tz("2026-03-07T12:00:00Z", "America/New_York");
    assert_eq!(before.hour(), 7);

    let after = before.add(1, Unit::Day);
    assert_eq!(after.hour(), 7);
    assert_eq!(after.day_of_month(), 8);
    assert_eq!(after.get_time() - before.get_time(), 23 * 60 * 60 * 1000);
}

// ── diff ────────────────────────────────────────────────────────────────────

#[test]
fn diff_sign_is_other_minus_self() {
    let early = utc("2026-03-04T09:00:00Z");
    let late = utc("2026-03-04T10:30:00Z");
    assert_eq!(early.diff(&late, Unit::Minute).unwrap(), 90);
    assert_eq!(late.diff(&early, Unit::Minute).unwrap(), -90);
    assert_eq!(early.diff(&late, Unit::Hour).unwrap(), 1);
}

#[test]
fn day_diff_counts_calendar_boundaries_not_elapsed_hours() {
    // Five minutes of elapsed time, but one day boundary crossed.
    let night = utc("2026-03-04T23:55:00Z");
    let morning = utc("2026-03-05T00:00:00Z");
    assert_eq!(night.diff(&morning, Unit::Day).unwrap(), 1);
    // And 23 hours elapsed within one date is zero days.
    let dawn = utc("2026-03-04T00:30:00Z");
    let dusk = utc("2026-03-04T23:30:00Z");
    assert_eq!(dawn.diff(&dusk, Unit::Day).unwrap(), 0);
}

#[test]
fn month_and_year_diff_count_boundaries() {
    let jan31 = utc("2026-01-31T12:00:00Z");
    let feb1 = utc("2026-02-01T12:00:00Z");
    assert_eq!(jan31.diff(&feb1, Unit::Month).unwrap(), 1);

    let nye = utc("2025-12-31T23:55:00Z");
    let nyd = utc("2026-01-01T00:00:00Z");
    assert_eq!(nye.diff(&nyd, Unit::Year).unwrap(), 1);
    assert_eq!(nye.diff(&nyd, Unit::Month).unwrap(), 1);
}

#[test]
fn week_diff_is_not_supported() {
    let a = utc("2026-03-04T09:00:00Z");
    let b = utc("2026-03-11T09:00:00Z");
    assert!(matches!(
        a.diff(&b, Unit::Week),
        Err(ClockError::NotSupported { unit: "week", .. })
    ));
}

// ── Precision comparisons ───────────────────────────────────────────────────

#[test]
fn comparisons_respect_precision() {
    let a = utc("2026-03-04T03:00:00Z");
    let b = utc("2026-03-04T03:09:00Z"); // quantized to 03:05

    assert!(!a.is_equal(&b, Unit::Minute).unwrap());
    assert!(a.is_equal(&b, Unit::Hour).unwrap());
    assert!(a.is_equal(&b, Unit::Day).unwrap());

    assert!(a.is_before(&b, Unit::Minute).unwrap());
    // Strict variants treat equality-at-precision as false.
    assert!(!a.is_before(&b, Unit::Hour).unwrap());
    assert!(!b.is_after(&a, Unit::Hour).unwrap());
    // Inclusive variants treat it as true.
    assert!(a.is_on_or_before(&b, Unit::Hour).unwrap());
    assert!(b.is_on_or_after(&a, Unit::Hour).unwrap());
}

#[test]
fn comparison_precision_is_a_function_of_the_instant() {
    // Same instant, different zones: equal at every precision even when the
    // local dates disagree (23:00 in London is already the 17th in Tokyo).
    let london = in_tz("2026-03-16T23:00:00Z", "Europe/London");
    let tokyo = in_tz("2026-03-16T23:00:00Z", "Asia/Tokyo");
    assert_ne!(london.day_of_month(), tokyo.day_of_month());
    assert!(london.is_equal(&tokyo, Unit::Day).unwrap());
    assert!(london.is_equal(&tokyo, Unit::Month).unwrap());
}

#[test]
fn is_same_date_uses_each_side_local_view() {
    let a = utc("2026-03-04T00:00:00Z");
    let b = utc("2026-03-04T23:55:00Z");
    assert!(a.is_same_date(&b));
    assert!(!a.is_same_date(&utc("2026-03-05T00:00:00Z")));
}

// ── Unit boundaries ─────────────────────────────────────────────────────────

#[test]
fn start_and_end_of_day() {
    let clock = utc("2026-03-04T09:35:00Z");
    assert_eq!(
        clock.start_of(Unit::Day, None).unwrap().to_iso_string(),
        "2026-03-04T00:00:00Z"
    );
    assert_eq!(
        clock.end_of(Unit::Day, None).unwrap().to_iso_string(),
        "2026-03-04T23:55:00Z"
    );
}

#[test]
fn week_boundaries_for_a_wednesday() {
    // 2026-03-04 is a Wednesday.
    let wed = utc("2026-03-04T12:00:00Z");

    let mon = wed.start_of(Unit::Week, Some(WeekStart::Mon)).unwrap();
    assert_eq!(mon.to_iso_string(), "2026-03-02T00:00:00Z");
    let sun_end = wed.end_of(Unit::Week, Some(WeekStart::Mon)).unwrap();
    assert_eq!(sun_end.to_iso_string(), "2026-03-08T23:55:00Z");

    // Sunday alignment shifts the pair back by one day.
    let sun = wed.start_of(Unit::Week, Some(WeekStart::Sun)).unwrap();
    assert_eq!(sun.to_iso_string(), "2026-03-01T00:00:00Z");
    let sat_end = wed.end_of(Unit::Week, Some(WeekStart::Sun)).unwrap();
    assert_eq!(sat_end.to_iso_string(), "2026-03-07T23:55:00Z");
}

#[test]
fn week_boundaries_require_explicit_week_start() {
    let clock = utc("2026-03-04T12:00:00Z");
    assert!(matches!(
        clock.start_of(Unit::Week, None),
        Err(ClockError::Config("week_start"))
    ));
    assert!(matches!(
        clock.end_of(Unit::Week, None),
        Err(ClockError::Config("week_start"))
    ));
}

#[test]
fn month_and_year_boundaries() {
    let clock = utc("2026-03-15T12:00:00Z");
    assert_eq!(
        clock.start_of(Unit::Month, None).unwrap().to_iso_string(),
        "2026-03-01T00:00:00Z"
    );
    assert_eq!(
        clock.end_of(Unit::Month, None).unwrap().to_iso_string(),
        "2026-03-31T23:55:00Z"
    );
    assert_eq!(
        clock.start_of(Unit::Year, None).unwrap().to_iso_string(),
        "2026-01-01T00:00:00Z"
    );
    assert_eq!(
        clock.end_of(Unit::Year, None).unwrap().to_iso_string(),
        "2026-12-31T23:55:00Z"
    );

    // February end respects leap years.
    let feb = utc("2024-02-10T12:00:00Z");
    assert_eq!(
        feb.end_of(Unit::Month, None).unwrap().to_iso_string(),
        "2024-02-29T23:55:00Z"
    );
}

#[test]
fn sub_day_units_are_not_supported_for_boundaries() {
    let clock = utc("2026-03-04T12:00:00Z");
    for unit in [Unit::Minute, Unit::Hour] {
        assert!(matches!(
            clock.start_of(unit, None),
            Err(ClockError::NotSupported { .. })
        ));
        assert!(matches!(
            clock.end_of(unit, None),
            Err(ClockError::NotSupported { .. })
        ));
    }
}

// ── Serialization ───────────────────────────────────────────────────────────

#[test]
fn unit_and_week_start_serialize_as_lowercase_tokens() {
    assert_eq!(serde_json::to_value(Unit::Minute).unwrap(), "minute");
    assert_eq!(serde_json::to_value(Unit::Week).unwrap(), "week");
    assert_eq!(serde_json::to_value(WeekStart::Mon).unwrap(), "mon");

    let parsed: Unit = serde_json::from_str("\"month\"").unwrap();
    assert_eq!(parsed, Unit::Month);
}

// ── is_between ──────────────────────────────────────────────────────────────

#[test]
fn is_between_accepts_span_or_points() {
    let start = utc("2026-03-01T00:00:00Z");
    let end = utc("2026-03-07T23:55:00Z");
    let inside = utc("2026-03-04T12:00:00Z");

    let span = Bounds::Span(Interval::new(start, end).unwrap());
    let points = Bounds::Points { start, end };

    assert!(inside.is_between(&span, true));
    assert!(inside.is_between(&points, true));
    assert!(inside.is_between(&points, false));

    // Endpoints count only for the inclusive variant.
    assert!(start.is_between(&span, true));
    assert!(!start.is_between(&span, false));
}
