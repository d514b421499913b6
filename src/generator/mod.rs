//! Constrained enumeration of valid section combinations.
//!
//! # Algorithm
//!
//! Depth-first backtracking over the selection's courses in order. At
//! each course the branch set is one section (`Fixed`), every section
//! (`Any`), or nothing (`None` — the course is skipped). A candidate is
//! screened against the forbidden windows before the search ever
//! descends into it, and against every earlier placement (loose-mode
//! conflict test) when the path is extended; the first conflict prunes
//! the whole subtree, so the remaining suffix of the combination is
//! never materialized. Enumeration stops at the configured cap and
//! reports whether it stopped early.
//!
//! Malformed meeting data excludes only the sections carrying it
//! (logged, not fatal); a course whose every alternative is excluded
//! yields an ordinary empty result rather than an error.
//!
//! # Complexity
//!
//! Worst case is the product of section counts, but conflict density
//! prunes most prefixes long before a full path is built. For identical
//! inputs the output order is identical run to run.

mod filter;

pub use filter::ForbiddenWindow;

use log::{debug, warn};

use crate::catalog::Catalog;
use crate::models::{
    Combination, PlacedBlock, SectionChoice, Selection, TimePattern,
};
use crate::Result;

/// Default enumeration cap.
pub const DEFAULT_CAP: usize = 100_000;

/// Knobs for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Maximum number of combinations to emit.
    pub cap: usize,
    /// User-declared forbidden time windows.
    pub forbidden: Vec<ForbiddenWindow>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            cap: DEFAULT_CAP,
            forbidden: Vec::new(),
        }
    }
}

/// One emitted combination plus the placed blocks backing it.
///
/// Blocks are the concatenation of every chosen section's occurrences;
/// the evaluator merges them into per-day order on ingest.
#[derive(Debug, Clone)]
pub struct GeneratedCombination {
    /// The resolved course → section picks.
    pub combination: Combination,
    blocks: Vec<PlacedBlock>,
}

impl GeneratedCombination {
    /// Creates a record from externally assembled parts.
    pub fn new(combination: Combination, blocks: Vec<PlacedBlock>) -> Self {
        Self { combination, blocks }
    }

    /// Placed blocks of every pick, in course order.
    pub fn blocks(&self) -> &[PlacedBlock] {
        &self.blocks
    }
}

/// The outcome of one generation run.
///
/// Zero combinations is a valid, reportable outcome — it means no
/// conflict-free combination exists for the input, not that generation
/// failed.
#[derive(Debug, Clone, Default)]
pub struct Generated {
    /// Valid combinations in discovery order.
    pub combinations: Vec<GeneratedCombination>,
    /// Whether enumeration stopped at the cap with work remaining.
    pub truncated: bool,
}

impl Generated {
    /// Whether no combination was produced.
    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Number of combinations produced.
    pub fn len(&self) -> usize {
        self.combinations.len()
    }
}

/// One branchable choice: a section that survived pre-screening.
struct Candidate {
    section_idx: usize,
    pattern: TimePattern,
    blocks: Vec<PlacedBlock>,
}

/// A course with its surviving candidates.
struct CourseBranches {
    key: String,
    candidates: Vec<Candidate>,
}

/// Enumerates every valid combination for the selection.
///
/// Fails with a lookup error when the selection references an unknown
/// course or a `Fixed` index outside the course's section list. All
/// other per-section problems degrade to skipping that section.
pub fn generate(
    catalog: &dyn Catalog,
    selection: &Selection,
    options: &GeneratorOptions,
) -> Result<Generated> {
    let forbidden: Vec<&ForbiddenWindow> = options
        .forbidden
        .iter()
        .filter(|w| w.is_effective())
        .collect();

    let mut courses: Vec<CourseBranches> = Vec::new();
    for (key, choice) in selection.entries() {
        let section_indices: Vec<usize> = match choice {
            SectionChoice::None => continue,
            SectionChoice::Fixed(idx) => {
                // surface bad references instead of silently skipping
                catalog.resolve_section(key, *idx)?;
                vec![*idx]
            }
            SectionChoice::Any => {
                let sections = catalog
                    .course_sections(key)
                    .ok_or_else(|| crate::Error::UnknownCourse(key.clone()))?;
                (0..sections.len()).collect()
            }
        };

        let mut candidates = Vec::with_capacity(section_indices.len());
        for idx in section_indices {
            let section = catalog.resolve_section(key, idx)?;
            let pattern = match section.pattern() {
                Ok(p) => p,
                Err(err) => {
                    warn!("skipping section {idx} of {key}: {err}");
                    continue;
                }
            };
            if forbidden.iter().any(|w| w.excludes(&pattern)) {
                continue;
            }
            let blocks = section.placed_blocks(key, idx)?;
            candidates.push(Candidate {
                section_idx: idx,
                pattern,
                blocks,
            });
        }

        if candidates.is_empty() {
            // Every alternative of a required course was excluded; no
            // combination can exist, which is an empty result, not an
            // error.
            debug!("no viable sections remain for {key}");
            return Ok(Generated::default());
        }
        courses.push(CourseBranches {
            key: key.clone(),
            candidates,
        });
    }

    if courses.is_empty() {
        return Ok(Generated::default());
    }

    let mut out = Generated::default();
    let mut path: Vec<&Candidate> = Vec::with_capacity(courses.len());
    descend(&courses, options.cap, &mut path, &mut out);
    debug!(
        "generated {} combinations (truncated: {})",
        out.len(),
        out.truncated
    );
    Ok(out)
}

/// Recursive depth-first extension of the current path.
///
/// Returns `false` once the cap is hit so callers unwind immediately.
fn descend<'a>(
    courses: &'a [CourseBranches],
    cap: usize,
    path: &mut Vec<&'a Candidate>,
    out: &mut Generated,
) -> bool {
    let depth = path.len();
    if depth == courses.len() {
        if out.combinations.len() >= cap {
            out.truncated = true;
            return false;
        }
        out.combinations.push(emit(courses, path));
        return true;
    }

    for candidate in &courses[depth].candidates {
        let conflict = path
            .iter()
            .any(|placed| candidate.pattern.conflicts_with(&placed.pattern, false));
        if conflict {
            continue;
        }
        path.push(candidate);
        let keep_going = descend(courses, cap, path, out);
        path.pop();
        if !keep_going {
            return false;
        }
    }
    true
}

/// Materializes the current path into an emitted combination.
fn emit(courses: &[CourseBranches], path: &[&Candidate]) -> GeneratedCombination {
    let picks = courses
        .iter()
        .zip(path)
        .map(|(course, c)| (course.key.clone(), c.section_idx))
        .collect();
    let blocks = path
        .iter()
        .flat_map(|c| c.blocks.iter().cloned())
        .collect();
    GeneratedCombination {
        combination: Combination::new(picks),
        blocks,
    }
}
