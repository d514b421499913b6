//! Temporal pattern: compact encoding of a recurring weekly meeting time.
//!
//! A pattern is a canonical sequence of [`TimeTriple`]s, where each
//! triple covers a maximal run of consecutive weekdays sharing an
//! identical start/end time. Merging keeps the representation small and
//! makes pairwise conflict checks cheap.
//!
//! # Invariants
//!
//! - Triples are sorted by (first day, start, end).
//! - No two triples in one pattern overlap each other.
//!
//! # Hashing
//!
//! [`TimePattern::hash32`] is a deterministic FNV-1a digest of the
//! canonical triple sequence: structurally equal patterns always hash
//! equal, and the value is stable across runs, so it is usable as a
//! cache or dedup key. Collisions are tolerated by callers.

use serde::{Deserialize, Serialize};

use super::meeting::Meeting;
use super::time::{DateRange, Weekday, WEEKDAYS};
use crate::{Error, Result};

/// A maximal run of consecutive weekdays sharing one time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeTriple {
    /// First weekday of the run (inclusive).
    pub day_first: Weekday,
    /// Last weekday of the run (inclusive).
    pub day_last: Weekday,
    /// Start time, minutes from midnight.
    pub start_min: u16,
    /// End time, minutes from midnight.
    pub end_min: u16,
}

impl TimeTriple {
    /// Whether the run covers the given weekday.
    #[inline]
    pub fn covers(&self, day: Weekday) -> bool {
        self.day_first <= day && day <= self.day_last
    }

    /// Whether two triples share at least one weekday.
    #[inline]
    fn shares_day(&self, other: &Self) -> bool {
        self.day_first <= other.day_last && other.day_first <= self.day_last
    }

    /// Whether two triples conflict.
    ///
    /// With `strict = false`, ranges that merely touch at a boundary do
    /// not conflict; with `strict = true`, they do.
    pub fn conflicts_with(&self, other: &Self, strict: bool) -> bool {
        if !self.shares_day(other) {
            return false;
        }
        if strict {
            self.start_min <= other.end_min && other.start_min <= self.end_min
        } else {
            self.start_min < other.end_min && other.start_min < self.end_min
        }
    }
}

/// Compact, comparable encoding of a recurring weekly meeting time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePattern {
    triples: Vec<TimeTriple>,
    /// Calendar scope of the pattern: union of the source meetings'
    /// date ranges, or `None` when any meeting spans the full term.
    pub dates: Option<DateRange>,
}

impl TimePattern {
    /// Encodes a set of meetings into a canonical pattern.
    ///
    /// Meetings are exploded per weekday, grouped by identical time, and
    /// maximal runs of consecutive weekdays are merged into one triple.
    /// Exact duplicates collapse; partially overlapping entries are
    /// malformed input and fail with a parse error.
    pub fn encode(meetings: &[Meeting]) -> Result<Self> {
        if meetings.is_empty() {
            return Err(Error::parse("cannot encode an empty meeting list"));
        }

        // (day index, start, end), deduplicated and sorted
        let mut entries: Vec<(usize, u16, u16)> = Vec::new();
        for meeting in meetings {
            for &day in &meeting.days {
                let entry = (day.index(), meeting.start_min, meeting.end_min);
                if !entries.contains(&entry) {
                    entries.push(entry);
                }
            }
        }
        entries.sort_unstable();

        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                if a.0 == b.0 && a.1 < b.2 && b.1 < a.2 {
                    return Err(Error::parse(format!(
                        "self-overlapping meeting times on {}",
                        WEEKDAYS[a.0].token()
                    )));
                }
            }
        }

        // Merge runs of consecutive days sharing identical times.
        let mut triples: Vec<TimeTriple> = Vec::new();
        for (day_idx, start, end) in entries {
            match triples.last_mut() {
                Some(last)
                    if last.start_min == start
                        && last.end_min == end
                        && last.day_last.index() + 1 == day_idx =>
                {
                    last.day_last = WEEKDAYS[day_idx];
                }
                _ => triples.push(TimeTriple {
                    day_first: WEEKDAYS[day_idx],
                    day_last: WEEKDAYS[day_idx],
                    start_min: start,
                    end_min: end,
                }),
            }
        }
        triples.sort_unstable_by_key(|t| (t.day_first, t.start_min, t.end_min));

        let mut dates: Option<DateRange> = None;
        for (i, meeting) in meetings.iter().enumerate() {
            match (&mut dates, meeting.dates) {
                (d, Some(range)) if i == 0 => *d = Some(range),
                (Some(d), Some(range)) => {
                    d.start = d.start.min(range.start);
                    d.end = d.end.max(range.end);
                }
                // one full-term meeting widens the scope to the full term
                _ => {
                    dates = None;
                    break;
                }
            }
        }

        Ok(Self { triples, dates })
    }

    /// The canonical triple sequence.
    pub fn triples(&self) -> &[TimeTriple] {
        &self.triples
    }

    /// Time ranges occupied on the given weekday.
    pub fn ranges_on(&self, day: Weekday) -> impl Iterator<Item = (u16, u16)> + '_ {
        self.triples
            .iter()
            .filter(move |t| t.covers(day))
            .map(|t| (t.start_min, t.end_min))
    }

    /// Whether two patterns conflict.
    ///
    /// Patterns scoped to disjoint calendar ranges never conflict; a
    /// full-term pattern conflicts with anything sharing a time slot.
    pub fn conflicts_with(&self, other: &Self, strict: bool) -> bool {
        if let (Some(a), Some(b)) = (&self.dates, &other.dates) {
            if !a.intersects(b) {
                return false;
            }
        }
        self.triples
            .iter()
            .any(|a| other.triples.iter().any(|b| a.conflicts_with(b, strict)))
    }

    /// Deterministic 32-bit FNV-1a digest of the canonical triples.
    pub fn hash32(&self) -> u32 {
        const OFFSET: u32 = 0x811c_9dc5;
        const PRIME: u32 = 0x0100_0193;
        let mut hash = OFFSET;
        let mut eat = |byte: u8| {
            hash ^= u32::from(byte);
            hash = hash.wrapping_mul(PRIME);
        };
        for t in &self.triples {
            eat(t.day_first.index() as u8);
            eat(t.day_last.index() as u8);
            for v in [t.start_min, t.end_min] {
                eat((v & 0xff) as u8);
                eat((v >> 8) as u8);
            }
        }
        hash
    }
}
