//! Date formatting with day-first display patterns.
//!
//! Patterns use the tokens `YYYY`, `YY`, `MM`, `DD`, `HH` (24h), `hh` (12h), `mm`
//! and `ss`; anything else is copied literally.

use chrono::{DateTime, FixedOffset, TimeZone};
use std::fmt;

/// Pattern used when none is given.
pub const DEFAULT_DATE_FORMAT: &str = "DD/MM/YYYY";

/// Shown in place of a missing date.
pub const NO_DATE: &str = "no date";

/// Shown for a timestamp that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid date";

const TOKENS: [(&str, &str); 8] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MM", "%m"),
    ("DD", "%d"),
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
];

/// Format `date` with a display pattern, or [`NO_DATE`] when absent.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use viewkit::format::format_date;
///
/// let paid_at = Utc.with_ymd_and_hms(2017, 10, 26, 20, 8, 34).unwrap();
/// assert_eq!(format_date(Some(&paid_at), None), "26/10/2017");
/// assert_eq!(format_date(Some(&paid_at), Some("DD/MM/YYYY HH:mm")), "26/10/2017 20:08");
/// assert_eq!(format_date::<Utc>(None, None), "no date");
/// ```
pub fn format_date<Tz>(date: Option<&DateTime<Tz>>, pattern: Option<&str>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match date {
        Some(date) => date
            .format(&to_strftime(pattern.unwrap_or(DEFAULT_DATE_FORMAT)))
            .to_string(),
        None => NO_DATE.to_string(),
    }
}

/// Parse an RFC 3339 timestamp and format it like [`format_date`].
///
/// Returns [`INVALID_DATE`] when `raw` is present but unparseable.
pub fn format_timestamp(raw: Option<&str>, pattern: Option<&str>) -> String {
    match raw.filter(|raw| !raw.is_empty()) {
        Some(raw) => match DateTime::<FixedOffset>::parse_from_rfc3339(raw) {
            Ok(date) => format_date(Some(&date), pattern),
            Err(_) => INVALID_DATE.to_string(),
        },
        None => NO_DATE.to_string(),
    }
}

fn to_strftime(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'scan: while let Some(ch) = rest.chars().next() {
        for (token, spec) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = after;
                continue 'scan;
            }
        }
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}
