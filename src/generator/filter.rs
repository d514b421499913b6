//! User-declared forbidden time windows.
//!
//! A forbidden window marks a clock-time range on a set of weekdays as
//! off-limits; any candidate section occupying it is pruned before the
//! search descends. Windows with no active day or an empty time range
//! are inert and skipped by the generator.

use serde::{Deserialize, Serialize};

use crate::models::{TimePattern, Weekday, WEEKDAYS};

/// A per-weekday time range that invalidates overlapping candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForbiddenWindow {
    /// Active flags for Monday through Sunday.
    pub days: [bool; 7],
    /// Start of the forbidden range, minutes from midnight.
    pub start_min: u16,
    /// End of the forbidden range, minutes from midnight.
    pub end_min: u16,
}

impl ForbiddenWindow {
    /// Creates a window active on the given weekdays.
    pub fn new(days: &[Weekday], start_min: u16, end_min: u16) -> Self {
        let mut flags = [false; 7];
        for &day in days {
            flags[day.index()] = true;
        }
        Self {
            days: flags,
            start_min,
            end_min,
        }
    }

    /// Whether the window can ever exclude anything.
    pub fn is_effective(&self) -> bool {
        self.start_min < self.end_min && self.days.iter().any(|&d| d)
    }

    /// Active weekdays in order.
    pub fn active_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        WEEKDAYS
            .iter()
            .copied()
            .filter(move |d| self.days[d.index()])
    }

    /// Whether a pattern occupies this window on any active weekday.
    ///
    /// Loose-mode semantics: touching the boundary is allowed.
    pub fn excludes(&self, pattern: &TimePattern) -> bool {
        if !self.is_effective() {
            return false;
        }
        self.active_days().any(|day| {
            pattern
                .ranges_on(day)
                .any(|(start, end)| start < self.end_min && self.start_min < end)
        })
    }
}
