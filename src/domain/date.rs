/// Calendar-date model
///
/// A calendar date is a `YYYY-MM-DD` string with no time-of-day and no
/// timezone. Every date that flows into the streak engine comes from this
/// module, so parsing is strict about structure but accepts unpadded
/// components, while output is always zero-padded.
///
/// Arithmetic is done on `chrono::NaiveDate`, which has no offset at all.
/// That is equivalent to anchoring each day at UTC midnight: a DST change or
/// a local offset can never move a date by one.

use std::cmp::Ordering;

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::domain::DomainError;

/// Largest year that still serializes to a four-digit, lexicographically
/// ordered string
const MAX_YEAR: i32 = 9999;

/// Source of the reference "today" date
///
/// The streak engine never reads the clock; callers ask a `Clock` and pass
/// the result in, which keeps tests deterministic.
pub trait Clock {
    /// Canonical `YYYY-MM-DD` string for the current calendar date
    fn today(&self) -> String;
}

/// Clock backed by the device's local calendar date
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> String {
        today()
    }
}

/// Clock pinned to a single date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock {
    today: String,
}

impl FixedClock {
    /// Pin the clock to `date`, normalizing it to canonical form
    pub fn new(date: &str) -> Result<Self, DomainError> {
        Ok(Self { today: normalize(date)? })
    }
}

impl Clock for FixedClock {
    fn today(&self) -> String {
        self.today.clone()
    }
}

/// Today's local calendar date as a canonical string
pub fn today() -> String {
    format(Local::now().date_naive())
}

/// Split a date string into `(year, month, day)`
///
/// Components must be ASCII digits separated by exactly two dashes and must
/// name a real Gregorian day ("2023-02-29" is rejected). Padding is optional.
pub fn parse(s: &str) -> Result<(i32, u32, u32), DomainError> {
    let date = to_naive(s)?;
    Ok((date.year(), date.month(), date.day()))
}

/// Parse a date string into a `NaiveDate`
pub fn to_naive(s: &str) -> Result<NaiveDate, DomainError> {
    let invalid = || DomainError::InvalidFormat { value: s.to_string() };

    let mut parts = s.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };

    let year: i32 = numeric(year).ok_or_else(invalid)?;
    let month: u32 = numeric(month).ok_or_else(invalid)?;
    let day: u32 = numeric(day).ok_or_else(invalid)?;

    if year > MAX_YEAR {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Canonical zero-padded form of a date
pub fn format(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Re-emit any accepted date string in canonical form
pub fn normalize(s: &str) -> Result<String, DomainError> {
    Ok(format(to_naive(s)?))
}

/// The date `delta` days after `s` (before it, when `delta` is negative)
pub fn add_days(s: &str, delta: i64) -> Result<String, DomainError> {
    let date = to_naive(s)?;
    shift(date, delta).map(format)
}

/// Move a date by `delta` days, staying inside the four-digit-year range
pub fn shift(date: NaiveDate, delta: i64) -> Result<NaiveDate, DomainError> {
    let days = Days::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };

    shifted
        .filter(|d| (0..=MAX_YEAR).contains(&d.year()))
        .ok_or_else(|| DomainError::DateOutOfRange {
            date: format(date),
            delta,
        })
}

/// Order two canonical date strings
///
/// Lexicographic order on the canonical form is chronological order.
pub fn compare(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Long human-readable form, e.g. "Sunday, March 10, 2024"
pub fn format_friendly(s: &str) -> Result<String, DomainError> {
    Ok(to_naive(s)?.format("%A, %B %-d, %Y").to_string())
}

fn numeric<T: std::str::FromStr>(part: &str) -> Option<T> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}
