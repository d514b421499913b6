//! Combination: one fully-resolved, conflict-free section assignment.
//!
//! Combinations are immutable once produced by the generator and are
//! identified by their tuple of section indices. The compact
//! array-of-indices encoding matches the persisted form of generated
//! schedules.

use serde::{Deserialize, Serialize};

use super::course::Selection;
use crate::{Error, Result};

/// An ordered mapping from course key to the chosen section index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Combination {
    picks: Vec<(String, usize)>,
}

impl Combination {
    /// Creates a combination from ordered (course, section index) picks.
    pub fn new(picks: Vec<(String, usize)>) -> Self {
        Self { picks }
    }

    /// Ordered picks.
    pub fn picks(&self) -> &[(String, usize)] {
        &self.picks
    }

    /// The chosen section index for a course, if the course is present.
    pub fn section_of(&self, course: &str) -> Option<usize> {
        self.picks
            .iter()
            .find(|(k, _)| k == course)
            .map(|&(_, idx)| idx)
    }

    /// Number of courses in the combination.
    pub fn len(&self) -> usize {
        self.picks.len()
    }

    /// Whether the combination covers no courses.
    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Compact encoding: section indices in pick order.
    pub fn to_indices(&self) -> Vec<usize> {
        self.picks.iter().map(|&(_, idx)| idx).collect()
    }

    /// Rebuilds a combination from a compact index array and the
    /// selection it was generated from.
    ///
    /// Courses excluded (`None`) in the selection consume no index.
    /// Fails with a parse error when the index count does not match
    /// the selection's active courses.
    pub fn from_indices(selection: &Selection, indices: &[usize]) -> Result<Self> {
        let active: Vec<&str> = selection.active_courses().collect();
        if active.len() != indices.len() {
            return Err(Error::parse(format!(
                "expected {} indices, got {}",
                active.len(),
                indices.len()
            )));
        }
        Ok(Self {
            picks: active
                .into_iter()
                .map(str::to_string)
                .zip(indices.iter().copied())
                .collect(),
        })
    }
}
