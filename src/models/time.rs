//! Clock, weekday, and calendar-date primitives.
//!
//! All clock times are minutes from midnight. Weekdays use the
//! two-letter tokens found in catalog data (`Mo Tu We Th Fr Sa Su`).
//! Dates exist only to scope partial-term meetings; they carry no
//! timezone and compare as plain (year, month, day) triples.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mo,
    Tu,
    We,
    Th,
    Fr,
    Sa,
    Su,
}

/// All weekdays in order. Index agrees with [`Weekday::index`].
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mo,
    Weekday::Tu,
    Weekday::We,
    Weekday::Th,
    Weekday::Fr,
    Weekday::Sa,
    Weekday::Su,
];

impl Weekday {
    /// Zero-based index, Monday = 0.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Weekday from a zero-based index.
    pub fn from_index(idx: usize) -> Option<Self> {
        WEEKDAYS.get(idx).copied()
    }

    /// Two-letter token, e.g. `"Mo"`.
    pub fn token(self) -> &'static str {
        match self {
            Self::Mo => "Mo",
            Self::Tu => "Tu",
            Self::We => "We",
            Self::Th => "Th",
            Self::Fr => "Fr",
            Self::Sa => "Sa",
            Self::Su => "Su",
        }
    }

    /// Parses a two-letter token.
    pub fn from_token(token: &str) -> Result<Self> {
        match token {
            "Mo" => Ok(Self::Mo),
            "Tu" => Ok(Self::Tu),
            "We" => Ok(Self::We),
            "Th" => Ok(Self::Th),
            "Fr" => Ok(Self::Fr),
            "Sa" => Ok(Self::Sa),
            "Su" => Ok(Self::Su),
            other => Err(Error::parse(format!("unknown weekday token '{other}'"))),
        }
    }
}

/// Parses a concatenated weekday string such as `"MoWeFr"`.
///
/// Returns days in the order given; duplicates are rejected.
pub fn parse_days(days: &str) -> Result<Vec<Weekday>> {
    if days.is_empty() || days.len() % 2 != 0 {
        return Err(Error::parse(format!("invalid weekday string '{days}'")));
    }
    let mut out = Vec::with_capacity(days.len() / 2);
    let mut i = 0;
    while i < days.len() {
        let token = days
            .get(i..i + 2)
            .ok_or_else(|| Error::parse(format!("invalid weekday string '{days}'")))?;
        let day = Weekday::from_token(token)?;
        if out.contains(&day) {
            return Err(Error::parse(format!("duplicate weekday '{token}'")));
        }
        out.push(day);
        i += 2;
    }
    Ok(out)
}

/// Parses a 24-hour `"HH:MM"` clock time to minutes from midnight.
pub fn parse_hm(time: &str) -> Result<u16> {
    let (h, m) = time
        .split_once(':')
        .ok_or_else(|| Error::parse(format!("invalid clock time '{time}'")))?;
    let hour: u16 = h
        .trim()
        .parse()
        .map_err(|_| Error::parse(format!("invalid hour in '{time}'")))?;
    let minute: u16 = m
        .trim()
        .parse()
        .map_err(|_| Error::parse(format!("invalid minute in '{time}'")))?;
    if hour > 24 || minute > 59 || (hour == 24 && minute != 0) {
        return Err(Error::parse(format!("clock time '{time}' out of range")));
    }
    Ok(hour * 60 + minute)
}

/// Parses a 12-hour `"H:MMAM"` / `"H:MMPM"` clock time to minutes.
pub fn parse_hm12(time: &str) -> Result<u16> {
    if time.len() < 3 {
        return Err(Error::parse(format!("invalid clock time '{time}'")));
    }
    let (body, suffix) = time.split_at(time.len() - 2);
    let minutes = parse_hm(body)?;
    let hour = minutes / 60;
    if hour == 0 || hour > 12 {
        return Err(Error::parse(format!("12-hour time '{time}' out of range")));
    }
    match suffix {
        "AM" | "am" => Ok(if hour == 12 { minutes - 720 } else { minutes }),
        "PM" | "pm" => Ok(if hour == 12 { minutes } else { minutes + 720 }),
        _ => Err(Error::parse(format!("invalid meridiem in '{time}'"))),
    }
}

/// Parses either time shape: `"13:00"` or `"1:00PM"`.
pub fn parse_clock(time: &str) -> Result<u16> {
    if time.ends_with('M') || time.ends_with('m') {
        parse_hm12(time)
    } else {
        parse_hm(time)
    }
}

/// Formats minutes from midnight as `"HH:MM"`.
pub fn format_hm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// A calendar date. Compares as a plain (year, month, day) triple.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Date {
    /// Four-digit year.
    pub year: u16,
    /// Month, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day: u8,
}

impl Date {
    /// Creates a date, validating month and day bounds.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(Error::parse(format!(
                "invalid date {month:02}/{day:02}/{year}"
            )));
        }
        Ok(Self { year, month, day })
    }

    /// Parses a `"MM/DD/YYYY"` date.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('/');
        let (m, d, y) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(m), Some(d), Some(y), None) => (m, d, y),
            _ => return Err(Error::parse(format!("invalid date '{s}'"))),
        };
        let month = m
            .parse()
            .map_err(|_| Error::parse(format!("invalid month in '{s}'")))?;
        let day = d
            .parse()
            .map_err(|_| Error::parse(format!("invalid day in '{s}'")))?;
        let year = y
            .parse()
            .map_err(|_| Error::parse(format!("invalid year in '{s}'")))?;
        Self::new(year, month, day)
    }
}

/// An inclusive calendar date range for partial-term meetings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range.
    pub start: Date,
    /// Last day of the range.
    pub end: Date,
}

impl DateRange {
    /// Creates a range; start must not come after end.
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if start > end {
            return Err(Error::parse("date range start after end"));
        }
        Ok(Self { start, end })
    }

    /// Parses a `"MM/DD/YYYY - MM/DD/YYYY"` range.
    pub fn parse(s: &str) -> Result<Self> {
        let (a, b) = s
            .split_once(" - ")
            .ok_or_else(|| Error::parse(format!("invalid date range '{s}'")))?;
        Self::new(Date::parse(a)?, Date::parse(b)?)
    }

    /// Whether two ranges share at least one day.
    pub fn intersects(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_tokens_round_trip() {
        for day in WEEKDAYS {
            assert_eq!(Weekday::from_token(day.token()).unwrap(), day);
        }
        assert!(Weekday::from_token("Xx").is_err());
    }

    #[test]
    fn test_parse_days() {
        let days = parse_days("MoWeFr").unwrap();
        assert_eq!(days, vec![Weekday::Mo, Weekday::We, Weekday::Fr]);

        assert!(parse_days("").is_err());
        assert!(parse_days("MoW").is_err());
        assert!(parse_days("MoMo").is_err());
    }

    #[test]
    fn test_parse_hm() {
        assert_eq!(parse_hm("00:00").unwrap(), 0);
        assert_eq!(parse_hm("13:05").unwrap(), 785);
        assert!(parse_hm("25:00").is_err());
        assert!(parse_hm("12:60").is_err());
        assert!(parse_hm("noon").is_err());
    }

    #[test]
    fn test_parse_hm12() {
        assert_eq!(parse_hm12("12:00AM").unwrap(), 0);
        assert_eq!(parse_hm12("1:30AM").unwrap(), 90);
        assert_eq!(parse_hm12("12:00PM").unwrap(), 720);
        assert_eq!(parse_hm12("5:00PM").unwrap(), 1020);
        assert!(parse_hm12("13:00PM").is_err());
        assert!(parse_hm12("5:00XX").is_err());
    }

    #[test]
    fn test_parse_clock_both_shapes() {
        assert_eq!(parse_clock("17:00").unwrap(), parse_clock("5:00PM").unwrap());
    }

    #[test]
    fn test_format_hm() {
        assert_eq!(format_hm(0), "00:00");
        assert_eq!(format_hm(785), "13:05");
    }

    #[test]
    fn test_date_parse_and_order() {
        let a = Date::parse("08/27/2019").unwrap();
        let b = Date::parse("12/17/2019").unwrap();
        assert!(a < b);
        assert!(Date::parse("13/01/2019").is_err());
        assert!(Date::parse("2019-08-27").is_err());
    }

    #[test]
    fn test_date_range_intersects() {
        let fall = DateRange::parse("08/27/2019 - 12/17/2019").unwrap();
        let first_half = DateRange::parse("08/27/2019 - 10/10/2019").unwrap();
        let second_half = DateRange::parse("10/11/2019 - 12/17/2019").unwrap();

        assert!(fall.intersects(&first_half));
        assert!(fall.intersects(&second_half));
        assert!(!first_half.intersects(&second_half));
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        assert!(DateRange::parse("12/17/2019 - 08/27/2019").is_err());
    }
}
