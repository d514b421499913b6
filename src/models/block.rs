//! Placed block: one rendered occurrence of a temporal pattern.
//!
//! A block pins a pattern to a concrete weekday and time range and
//! carries an owning reference back to the section or event it
//! represents, so a grid layer can label it and a distance-aware
//! criterion can read its building.

use serde::{Deserialize, Serialize};

use super::time::{format_hm, Weekday};
use crate::{Error, Result};

/// Fallback label for blocks whose source has no descriptive text.
///
/// Exported artifacts of the predecessor system carry this literal, so
/// it is preserved; use [`PlacedBlock::label`] for the honest optional.
pub const NULL_LABEL: &str = "null";

/// What a placed block stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockSource {
    /// A course section: course key plus section index.
    Section {
        /// Course key, e.g. `"cs2102lec"`.
        course: String,
        /// Index of the section within the course.
        section: usize,
    },
    /// A standalone user event.
    Event {
        /// Event title, when the user gave one.
        title: Option<String>,
    },
}

/// A pattern occurrence materialized at a concrete weekday position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBlock {
    /// Weekday this block occupies.
    pub day: Weekday,
    /// Start time, minutes from midnight.
    pub start_min: u16,
    /// End time, minutes from midnight.
    pub end_min: u16,
    /// Building index, when known.
    pub building: Option<u16>,
    /// What this block represents.
    pub source: BlockSource,
}

impl PlacedBlock {
    /// Creates a block, validating the time range.
    pub fn new(day: Weekday, start_min: u16, end_min: u16, source: BlockSource) -> Result<Self> {
        if start_min >= end_min || end_min > 1440 {
            return Err(Error::parse(format!(
                "invalid block time range {start_min}..{end_min}"
            )));
        }
        Ok(Self {
            day,
            start_min,
            end_min,
            building: None,
            source,
        })
    }

    /// Sets the building index.
    pub fn with_building(mut self, building: u16) -> Self {
        self.building = Some(building);
        self
    }

    /// Duration in minutes (end − start).
    #[inline]
    pub fn duration_minutes(&self) -> u16 {
        self.end_min - self.start_min
    }

    /// Descriptive text of the underlying item, if it has one.
    pub fn label(&self) -> Option<String> {
        match &self.source {
            BlockSource::Section { course, section } => {
                Some(format!("{course}-{section}"))
            }
            BlockSource::Event { title } => title.clone(),
        }
    }

    /// Human label, or the literal [`NULL_LABEL`] sentinel.
    pub fn display_label(&self) -> String {
        self.label().unwrap_or_else(|| NULL_LABEL.to_string())
    }

    /// Time range as `"HH:MM - HH:MM"`.
    pub fn time_range(&self) -> String {
        format!("{} - {}", format_hm(self.start_min), format_hm(self.end_min))
    }

    /// Whether two blocks conflict.
    ///
    /// Blocks on different weekdays never conflict. With
    /// `strict = false`, a shared boundary instant does not conflict;
    /// with `strict = true`, it does (used by buffer-aware criteria).
    pub fn conflicts_with(&self, other: &Self, strict: bool) -> bool {
        if self.day != other.day {
            return false;
        }
        if strict {
            self.start_min <= other.end_min && other.start_min <= self.end_min
        } else {
            self.start_min < other.end_min && other.start_min < self.end_min
        }
    }
}
