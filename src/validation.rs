//! Pre-flight validation of a ranking request.
//!
//! Generation and ranking tolerate degenerate inputs by degrading
//! (empty results, inert windows, criteria that carry no signal), so
//! these checks exist for the calling layer: run them before a request
//! is accepted and surface the issues to the user instead of silently
//! producing a meaningless order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::engine::GenerateRequest;
use crate::ranking::SortKey;

/// What a validation issue is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// No enabled sort criterion; the order would be generation order.
    NoEnabledCriteria,
    /// Distance criterion enabled without a distance matrix.
    MissingDistanceMatrix,
    /// The same criterion appears more than once.
    DuplicateCriterion,
    /// Two criteria share a cascade priority position.
    DuplicatePriority,
    /// A forbidden window whose start is not before its end.
    InvertedWindow,
    /// A negative criterion weight.
    NegativeWeight,
}

/// One human-reportable problem with a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Machine-matchable category.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The outcome of validating a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Issues found, in detection order.
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// Whether the request passed every check.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// The report as a `Result`, for callers that reject on any issue.
    pub fn into_result(self) -> std::result::Result<(), Vec<Issue>> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(self.issues)
        }
    }

    fn push(&mut self, kind: IssueKind, message: impl Into<String>) {
        self.issues.push(Issue::new(kind, message));
    }
}

/// Checks a request for configuration problems.
///
/// `has_distance_matrix` tells the checker whether the caller can back
/// the distance criterion with travel-time data.
pub fn validate_request(request: &GenerateRequest, has_distance_matrix: bool) -> ValidationReport {
    let mut report = ValidationReport::default();

    let sort = &request.sort;
    if !sort.sort_by.iter().any(|o| o.enabled) {
        report.push(
            IssueKind::NoEnabledCriteria,
            "no sort criterion is enabled",
        );
    }

    let mut seen_names = HashSet::new();
    let mut seen_idx = HashSet::new();
    for option in &sort.sort_by {
        if !seen_names.insert(option.name) {
            report.push(
                IssueKind::DuplicateCriterion,
                format!("criterion {:?} appears more than once", option.name),
            );
        }
        if option.enabled && !seen_idx.insert(option.idx) {
            report.push(
                IssueKind::DuplicatePriority,
                format!("priority position {} is used twice", option.idx),
            );
        }
        if option.enabled && option.weight < 0.0 {
            report.push(
                IssueKind::NegativeWeight,
                format!("criterion {:?} has a negative weight", option.name),
            );
        }
        if option.enabled && option.name == SortKey::Distance && !has_distance_matrix {
            report.push(
                IssueKind::MissingDistanceMatrix,
                "distance criterion enabled without a distance matrix",
            );
        }
    }

    for window in &request.forbidden {
        if window.start_min >= window.end_min {
            report.push(
                IssueKind::InvertedWindow,
                format!(
                    "forbidden window {}..{} is empty or inverted",
                    window.start_min, window.end_min
                ),
            );
        }
    }

    report
}
