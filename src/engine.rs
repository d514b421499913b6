//! The exposed surface: one call from request to ranked order.
//!
//! The engine is built to sit behind a worker boundary. A
//! [`GenerateRequest`] is a self-contained, serializable payload; the
//! caller ships it together with a catalog snapshot and an optional
//! distance matrix, and gets back a [`Ranked`] holding the evaluator
//! and the truncation flag.

use log::info;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, DistanceMatrix};
use crate::generator::{self, ForbiddenWindow, GeneratorOptions, DEFAULT_CAP};
use crate::models::Selection;
use crate::ranking::{Evaluator, SortConfig};
use crate::Result;

/// A complete generation-and-ranking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Course choices to enumerate over.
    pub selection: Selection,
    /// Ranking configuration.
    #[serde(default)]
    pub sort: SortConfig,
    /// Forbidden time windows.
    #[serde(default)]
    pub forbidden: Vec<ForbiddenWindow>,
    /// Enumeration cap.
    #[serde(default = "default_cap")]
    pub cap: usize,
}

fn default_cap() -> usize {
    DEFAULT_CAP
}

impl GenerateRequest {
    /// Creates a request with default sort, no windows, default cap.
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            sort: SortConfig::default(),
            forbidden: Vec::new(),
            cap: DEFAULT_CAP,
        }
    }

    /// Sets the ranking configuration.
    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = sort;
        self
    }

    /// Adds a forbidden window.
    pub fn forbid(mut self, window: ForbiddenWindow) -> Self {
        self.forbidden.push(window);
        self
    }

    /// Sets the enumeration cap.
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }
}

/// The outcome of a request: a sorted evaluator plus the generator's
/// truncation flag.
pub struct Ranked {
    /// Evaluator over every generated combination, already sorted.
    pub evaluator: Evaluator,
    /// Whether enumeration stopped at the cap with work remaining.
    pub truncated: bool,
}

impl Ranked {
    /// Number of ranked combinations.
    pub fn len(&self) -> usize {
        self.evaluator.len()
    }

    /// Whether no combination was produced.
    pub fn is_empty(&self) -> bool {
        self.evaluator.is_empty()
    }
}

/// Runs a request end to end.
///
/// An empty result set is `Ok` with an empty evaluator; only broken
/// references (unknown course, out-of-range fixed section) are errors.
pub fn generate_and_rank(
    catalog: &dyn Catalog,
    distance: Option<DistanceMatrix>,
    request: &GenerateRequest,
) -> Result<Ranked> {
    let options = GeneratorOptions {
        cap: request.cap,
        forbidden: request.forbidden.clone(),
    };
    let generated = generator::generate(catalog, &request.selection, &options)?;
    info!(
        "ranking {} combinations (truncated: {})",
        generated.len(),
        generated.truncated
    );
    let truncated = generated.truncated;
    let evaluator = Evaluator::build(generated.combinations, request.sort.clone(), distance);
    Ok(Ranked {
        evaluator,
        truncated,
    })
}
