//! Meeting model.
//!
//! A meeting is the raw catalog datum behind a section: a set of
//! weekdays, a start/end clock time, an optional calendar date sub-range
//! (partial-term meetings, final exams), and an optional building index
//! resolved against the external building list.

use serde::{Deserialize, Serialize};

use super::time::{self, DateRange, Weekday};
use crate::{Error, Result};

/// A recurring weekly meeting time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Weekdays on which this meeting occurs.
    pub days: Vec<Weekday>,
    /// Start time, minutes from midnight.
    pub start_min: u16,
    /// End time, minutes from midnight. Strictly greater than start.
    pub end_min: u16,
    /// Calendar sub-range for partial-term meetings. `None` = full term.
    pub dates: Option<DateRange>,
    /// Index into the external building list. `None` = unknown building.
    pub building: Option<u16>,
}

impl Meeting {
    /// Creates a meeting, validating the day set and the time range.
    pub fn new(days: Vec<Weekday>, start_min: u16, end_min: u16) -> Result<Self> {
        if days.is_empty() {
            return Err(Error::parse("meeting has no weekdays"));
        }
        if start_min >= end_min || end_min > 1440 {
            return Err(Error::parse(format!(
                "invalid meeting time range {start_min}..{end_min}"
            )));
        }
        Ok(Self {
            days,
            start_min,
            end_min,
            dates: None,
            building: None,
        })
    }

    /// Parses the catalog shape `"MoWeFr 10:00AM - 11:00AM"`.
    ///
    /// Both 12-hour and 24-hour clock times are accepted.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.split_whitespace();
        let (days, start, dash, end) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(d), Some(s), Some(dash), Some(e)) => (d, s, dash, e),
            _ => return Err(Error::parse(format!("invalid meeting spec '{spec}'"))),
        };
        if dash != "-" || parts.next().is_some() {
            return Err(Error::parse(format!("invalid meeting spec '{spec}'")));
        }
        Self::new(
            time::parse_days(days)?,
            time::parse_clock(start)?,
            time::parse_clock(end)?,
        )
    }

    /// Sets the calendar date sub-range.
    pub fn with_dates(mut self, dates: DateRange) -> Self {
        self.dates = Some(dates);
        self
    }

    /// Sets the building index.
    pub fn with_building(mut self, building: u16) -> Self {
        self.building = Some(building);
        self
    }

    /// Duration in minutes.
    #[inline]
    pub fn duration_min(&self) -> u16 {
        self.end_min - self.start_min
    }

    /// Whether this meeting occurs on the given weekday.
    pub fn occurs_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }
}
