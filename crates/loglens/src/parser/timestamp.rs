//! Calendar-validated instant construction.
//!
//! Every constructor returns `None` when the captured parts do not describe a
//! real point in time (month 13, February 30th, hour 25, offset beyond a day,
//! epoch outside the representable range). Callers route `None` to the
//! fallback path instead of emitting a malformed timestamp.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Number of digits in an epoch value that marks it as whole seconds.
/// Any other digit count is read as milliseconds.
pub const EPOCH_SECONDS_DIGITS: usize = 10;

const NANOS_DIGITS: usize = 9;

/// Build an instant from `YYYY-MM-DD`, `HH:MM:SS`, optional fractional-second
/// digits and an optional `Z` / `+HH:MM` / `+HHMM` offset.
///
/// A missing offset is read as UTC.
pub fn from_parts(
    date: &str,
    time: &str,
    fraction: Option<&str>,
    offset: Option<&str>,
) -> Option<DateTime<Utc>> {
    let date = parse_date(date)?;
    let time = parse_time(time, fraction)?;
    let offset = match offset {
        Some(raw) => parse_offset(raw)?,
        None => FixedOffset::east_opt(0)?,
    };

    NaiveDateTime::new(date, time)
        .and_local_timezone(offset)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Build an instant from a 10–13 digit epoch value.
///
/// Ten integer digits are seconds; anything else is milliseconds. The
/// optional fraction subdivides whichever unit applies.
pub fn from_epoch(digits: &str, fraction: Option<&str>) -> Option<DateTime<Utc>> {
    let value: i64 = digits.parse().ok()?;

    if digits.len() == EPOCH_SECONDS_DIGITS {
        let nanos = fraction.map(fraction_nanos).unwrap_or(0);
        DateTime::from_timestamp(value, nanos)
    } else {
        // Sub-millisecond fraction: at most six meaningful digits.
        let sub_milli = fraction.map(|f| truncated_pad(f, 6)).unwrap_or(0);
        let secs = value.div_euclid(1000);
        let millis = u32::try_from(value.rem_euclid(1000)).ok()?;
        DateTime::from_timestamp(secs, millis * 1_000_000 + sub_milli)
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_time(raw: &str, fraction: Option<&str>) -> Option<NaiveTime> {
    let mut parts = raw.splitn(3, ':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next()?.parse().ok()?;
    let second: u32 = parts.next()?.parse().ok()?;
    // chrono represents leap seconds as second 59 + >1s of nanos; a literal
    // `:60` is not a valid wall-clock reading here.
    if second > 59 {
        return None;
    }
    let nanos = fraction.map(fraction_nanos).unwrap_or(0);
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    if raw == "Z" {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Fractional-second digits as nanoseconds; digits past the ninth are dropped.
fn fraction_nanos(fraction: &str) -> u32 {
    truncated_pad(fraction, NANOS_DIGITS)
}

/// Read the first `width` digits of `fraction`, right-padding with zeros.
fn truncated_pad(fraction: &str, width: usize) -> u32 {
    let mut value: u32 = 0;
    let mut taken = 0;
    for digit in fraction.bytes().filter(u8::is_ascii_digit).take(width) {
        value = value * 10 + u32::from(digit - b'0');
        taken += 1;
    }
    value * 10u32.pow((width - taken) as u32)
}
