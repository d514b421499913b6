//! External collaborators: the course catalog and the building
//! distance matrix.
//!
//! The engine consumes catalog data through the [`Catalog`] trait, so
//! the calling layer decides where sections come from. A worker-side
//! caller hands the engine an [`InMemoryCatalog`] replica built from the
//! request payload; nothing here mutates catalog data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Course, Section};
use crate::{Error, Result};

/// Read-only access to per-course section lists.
pub trait Catalog {
    /// Ordered sections of a course, or `None` for an unknown key.
    fn course_sections(&self, course: &str) -> Option<&[Section]>;

    /// Resolves one section by index.
    ///
    /// Fails with a lookup error for an unknown course or an
    /// out-of-range index.
    fn resolve_section(&self, course: &str, index: usize) -> Result<&Section> {
        let sections = self
            .course_sections(course)
            .ok_or_else(|| Error::UnknownCourse(course.to_string()))?;
        sections.get(index).ok_or_else(|| Error::Lookup {
            course: course.to_string(),
            index,
        })
    }
}

/// A catalog snapshot held in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryCatalog {
    courses: HashMap<String, Course>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course, replacing any existing entry with the same key.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.insert(course.key.clone(), course);
        self
    }

    /// Adds a course in place.
    pub fn insert(&mut self, course: Course) {
        self.courses.insert(course.key.clone(), course);
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog has no courses.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl Catalog for InMemoryCatalog {
    fn course_sections(&self, course: &str) -> Option<&[Section]> {
        self.courses.get(course).map(|c| c.sections.as_slice())
    }
}

/// Symmetric walking-time matrix over building indices, in minutes.
///
/// Stored flattened (`minutes[a * size + b]`), matching the external
/// data format. The data is assumed pre-validated: symmetric with a
/// zero diagonal. Unknown pairs fall back to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    size: usize,
    minutes: Vec<u32>,
}

impl DistanceMatrix {
    /// Creates a matrix from flattened row-major minute data.
    ///
    /// `minutes.len()` must equal `size * size`.
    pub fn new(size: usize, minutes: Vec<u32>) -> Result<Self> {
        if minutes.len() != size * size {
            return Err(Error::parse(format!(
                "distance matrix length {} does not match size {size}",
                minutes.len()
            )));
        }
        Ok(Self { size, minutes })
    }

    /// Number of buildings covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Travel time between two buildings, in minutes.
    ///
    /// Zero for equal buildings or indices outside the matrix.
    pub fn travel_time(&self, a: u16, b: u16) -> u32 {
        let (a, b) = (a as usize, b as usize);
        if a == b || a >= self.size || b >= self.size {
            return 0;
        }
        self.minutes[a * self.size + b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Meeting;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new().with_course(Course::new(
            "cs2102lec",
            "Discrete Math",
            vec![
                Section::new("001", vec![Meeting::parse("MoWe 10:00 - 11:15").unwrap()]),
                Section::new("002", vec![Meeting::parse("TuTh 10:00 - 11:15").unwrap()]),
            ],
        ))
    }

    #[test]
    fn test_course_sections() {
        let cat = catalog();
        assert_eq!(cat.course_sections("cs2102lec").unwrap().len(), 2);
        assert!(cat.course_sections("nope").is_none());
    }

    #[test]
    fn test_resolve_section() {
        let cat = catalog();
        assert_eq!(cat.resolve_section("cs2102lec", 1).unwrap().id, "002");

        let err = cat.resolve_section("cs2102lec", 9).unwrap_err();
        assert!(matches!(err, Error::Lookup { index: 9, .. }));

        let err = cat.resolve_section("nope", 0).unwrap_err();
        assert!(matches!(err, Error::UnknownCourse(_)));
    }

    #[test]
    fn test_distance_matrix() {
        let m = DistanceMatrix::new(3, vec![0, 5, 9, 5, 0, 4, 9, 4, 0]).unwrap();
        assert_eq!(m.travel_time(0, 1), 5);
        assert_eq!(m.travel_time(1, 0), 5);
        assert_eq!(m.travel_time(2, 2), 0);
        // out-of-range indices degrade to zero
        assert_eq!(m.travel_time(0, 7), 0);
    }

    #[test]
    fn test_distance_matrix_bad_shape() {
        assert!(DistanceMatrix::new(2, vec![0, 1, 2]).is_err());
    }
}
