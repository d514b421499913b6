//! Course, section, and selection models.
//!
//! A `Course` entry represents one type-group of a catalog course
//! (lecture, discussion, lab — each group has its own key, as in
//! `"cs2102lec"`), so choosing one section per `Course` chooses one
//! section per type-group. A `Selection` records the user's intent per
//! course: a fixed section, any section, or none.

use serde::{Deserialize, Serialize};

use super::block::{BlockSource, PlacedBlock};
use super::meeting::Meeting;
use super::pattern::TimePattern;
use crate::Result;

/// One offered section of a course type-group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section identifier as recorded by the registrar, e.g. `"001"`.
    pub id: String,
    /// Meeting times of this section.
    pub meetings: Vec<Meeting>,
}

impl Section {
    /// Creates a section.
    pub fn new(id: impl Into<String>, meetings: Vec<Meeting>) -> Self {
        Self {
            id: id.into(),
            meetings,
        }
    }

    /// Encodes this section's meetings into a temporal pattern.
    ///
    /// Fails with a parse error when the meeting data is malformed
    /// (empty or self-overlapping).
    pub fn pattern(&self) -> Result<TimePattern> {
        TimePattern::encode(&self.meetings)
    }

    /// Expands this section's meetings into placed blocks.
    ///
    /// One block per (meeting, weekday) pair, carrying the meeting's
    /// building index and a source reference back to the section.
    pub fn placed_blocks(&self, course: &str, section_idx: usize) -> Result<Vec<PlacedBlock>> {
        let mut blocks = Vec::new();
        for meeting in &self.meetings {
            for &day in &meeting.days {
                let mut block = PlacedBlock::new(
                    day,
                    meeting.start_min,
                    meeting.end_min,
                    BlockSource::Section {
                        course: course.to_string(),
                        section: section_idx,
                    },
                )?;
                block.building = meeting.building;
                blocks.push(block);
            }
        }
        Ok(blocks)
    }
}

/// A course type-group: a key and its ordered sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Catalog key, unique per type-group.
    pub key: String,
    /// Display title.
    pub title: String,
    /// Sections in catalog order; combination indices refer into this.
    pub sections: Vec<Section>,
}

impl Course {
    /// Creates a course.
    pub fn new(key: impl Into<String>, title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sections,
        }
    }
}

/// The user's choice for one course.
///
/// A tagged variant instead of numeric sentinels: `Fixed` pins one
/// section, `Any` expands to every section during generation, `None`
/// excludes the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionChoice {
    /// Exactly this section index.
    Fixed(usize),
    /// Any section of the course.
    Any,
    /// Course excluded from generation.
    None,
}

/// An ordered course → choice mapping; the generator's input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    entries: Vec<(String, SectionChoice)>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins one section of a course.
    pub fn fixed(mut self, course: impl Into<String>, section: usize) -> Self {
        self.entries.push((course.into(), SectionChoice::Fixed(section)));
        self
    }

    /// Lets generation try every section of a course.
    pub fn any(mut self, course: impl Into<String>) -> Self {
        self.entries.push((course.into(), SectionChoice::Any));
        self
    }

    /// Excludes a course.
    pub fn none(mut self, course: impl Into<String>) -> Self {
        self.entries.push((course.into(), SectionChoice::None));
        self
    }

    /// Courses in selection order.
    pub fn entries(&self) -> &[(String, SectionChoice)] {
        &self.entries
    }

    /// Course keys that participate in generation (choice is not `None`).
    pub fn active_courses(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, c)| !matches!(c, SectionChoice::None))
            .map(|(k, _)| k.as_str())
    }

    /// Number of entries, including excluded courses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the selection has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::Weekday;

    fn section(id: &str, specs: &[&str]) -> Section {
        Section::new(
            id,
            specs.iter().map(|s| Meeting::parse(s).unwrap()).collect(),
        )
    }

    #[test]
    fn test_section_pattern() {
        let s = section("001", &["MoWeFr 10:00 - 11:00"]);
        let p = s.pattern().unwrap();
        assert_eq!(p.triples().len(), 3);
    }

    #[test]
    fn test_section_pattern_malformed() {
        let s = Section::new("001", vec![]);
        assert!(s.pattern().is_err());
    }

    #[test]
    fn test_placed_blocks() {
        let mut s = section("001", &["MoWe 10:00 - 11:00"]);
        s.meetings[0].building = Some(4);
        let blocks = s.placed_blocks("cs2102lec", 0).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].day, Weekday::Mo);
        assert_eq!(blocks[0].building, Some(4));
        assert_eq!(blocks[0].display_label(), "cs2102lec-0");
    }

    #[test]
    fn test_selection_builder() {
        let sel = Selection::new()
            .fixed("a", 2)
            .any("b")
            .none("c");
        assert_eq!(sel.len(), 3);
        assert_eq!(
            sel.entries()[0],
            ("a".to_string(), SectionChoice::Fixed(2))
        );
        let active: Vec<_> = sel.active_courses().collect();
        assert_eq!(active, vec!["a", "b"]);
    }

    #[test]
    fn test_selection_serde_round_trip() {
        let sel = Selection::new().fixed("a", 1).any("b");
        let json = serde_json::to_string(&sel).unwrap();
        let back: Selection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sel);
    }
}
