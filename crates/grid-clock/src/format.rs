//! Token-template rendering of a Clock's local view.
//!
//! Templates are scanned longest-token-first; anything that is not a known
//! token passes through literally, so `"DD/MM"` renders the day, a literal
//! slash, then a literal `MM` (month numbers are not a token — month *names*
//! are, per the grid header's needs).
//!
//! | Token  | Meaning                    | Example     |
//! |--------|----------------------------|-------------|
//! | `dddd` | full weekday name          | `Wednesday` |
//! | `ddd`  | abbreviated weekday name   | `Wed`       |
//! | `MMMM` | full month name            | `January`   |
//! | `MMM`  | abbreviated month name     | `Jan`       |
//! | `DD`   | zero-padded day of month   | `05`        |
//! | `D`    | unpadded day of month      | `5`         |
//! | `YYYY` | 4-digit year               | `2026`      |
//! | `YY`   | 2-digit year               | `26`        |
//! | `HH`   | zero-padded hour (local)   | `09`        |
//! | `mm`   | zero-padded minute (local) | `35`        |

use crate::clock::Clock;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Substitute the known tokens in `template` with the Clock's local view.
/// Unknown text passes through unchanged.
pub fn render(clock: &Clock, template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while !rest.is_empty() {
        let (rendered, consumed) = match rest {
            r if r.starts_with("dddd") => (weekday_name(clock).to_string(), 4),
            r if r.starts_with("ddd") => (weekday_name(clock)[..3].to_string(), 3),
            r if r.starts_with("MMMM") => (month_name(clock).to_string(), 4),
            r if r.starts_with("MMM") => (month_name(clock)[..3].to_string(), 3),
            r if r.starts_with("DD") => (format!("{:02}", clock.day_of_month()), 2),
            r if r.starts_with('D') => (clock.day_of_month().to_string(), 1),
            r if r.starts_with("YYYY") => (format!("{:04}", clock.year()), 4),
            r if r.starts_with("YY") => (format!("{:02}", clock.year().rem_euclid(100)), 2),
            r if r.starts_with("HH") => (format!("{:02}", clock.hour()), 2),
            r if r.starts_with("mm") => (format!("{:02}", clock.minute()), 2),
            r => match r.chars().next() {
                // Not a token: emit one literal character.
                Some(ch) => (ch.to_string(), ch.len_utf8()),
                None => break,
            },
        };
        out.push_str(&rendered);
        rest = &rest[consumed..];
    }

    out
}

fn weekday_name(clock: &Clock) -> &'static str {
    WEEKDAYS[clock.day_of_week() as usize % 7]
}

fn month_name(clock: &Clock) -> &'static str {
    MONTHS[(clock.month() as usize - 1) % 12]
}
