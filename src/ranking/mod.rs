//! Multi-criteria ranking of generated combinations.
//!
//! The [`Evaluator`] scores every combination under the enabled
//! criteria and serves pages of the resulting order. Two composition
//! modes exist:
//!
//! - **Cascade** compares criteria one at a time in priority order,
//!   falling through to the next criterion on a tie.
//! - **Weighted** collapses all enabled criteria into one number per
//!   combination: the weight-scaled sum of min-max normalized scores.
//!
//! Raw per-criterion scores are cached, so flipping direction, weight,
//! or mode re-sorts without re-scoring.
//!
//! # Determinism
//!
//! Equal-scoring combinations fall back to generation order, and the
//! shuffle pseudo-criterion draws from a seeded generator, so a given
//! input and configuration always produce the same order.

mod criteria;
mod evaluator;
mod select;

use serde::{Deserialize, Serialize};

pub use evaluator::Evaluator;

/// A ranking criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Variance of daily class minutes; prefers balanced weeks.
    Variance,
    /// Total idle time between classes; prefers tight days.
    Compactness,
    /// Class time inside the lunch window; prefers a free lunch.
    LunchTime,
    /// Squared earliness before noon; prefers late starts.
    NoEarly,
    /// Walking minutes between back-to-back classes.
    Distance,
    /// Seeded random order; overrides every other criterion.
    Shuffle,
}

/// All criteria, in default priority order.
pub const SORT_KEYS: [SortKey; 6] = [
    SortKey::Variance,
    SortKey::Compactness,
    SortKey::LunchTime,
    SortKey::NoEarly,
    SortKey::Distance,
    SortKey::Shuffle,
];

/// One criterion's slot in a sort configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortOption {
    /// Which criterion this option controls.
    pub name: SortKey,
    /// Whether the criterion participates in the order.
    pub enabled: bool,
    /// Flips the criterion's direction (higher scores first).
    pub reverse: bool,
    /// Relative weight in weighted mode. Ignored in cascade mode.
    pub weight: f64,
    /// Priority position in cascade mode; lower compares first.
    pub idx: usize,
}

impl SortOption {
    /// A disabled option for `name` with neutral settings.
    pub fn new(name: SortKey, idx: usize) -> Self {
        Self {
            name,
            enabled: false,
            reverse: false,
            weight: 1.0,
            idx,
        }
    }

    /// Enables the criterion.
    pub fn enabled(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// Reverses the criterion's direction.
    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Sets the weighted-mode weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// How enabled criteria combine into one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// Lexicographic comparison in `idx` order.
    #[default]
    Cascade,
    /// Weight-scaled sum of normalized scores.
    Weighted,
}

/// Complete ranking configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig {
    /// One option per criterion.
    pub sort_by: Vec<SortOption>,
    /// Composition mode for multiple enabled criteria.
    pub mode: SortMode,
    /// Seed for the shuffle pseudo-criterion.
    #[serde(default)]
    pub shuffle_seed: u64,
}

impl Default for SortConfig {
    /// Every criterion present in default priority order, with only
    /// variance and compactness enabled.
    fn default() -> Self {
        let sort_by = SORT_KEYS
            .iter()
            .enumerate()
            .map(|(idx, &name)| {
                let opt = SortOption::new(name, idx);
                match name {
                    SortKey::Variance | SortKey::Compactness => opt.enabled(),
                    _ => opt,
                }
            })
            .collect();
        Self {
            sort_by,
            mode: SortMode::Cascade,
            shuffle_seed: 0,
        }
    }
}

impl SortConfig {
    /// Enabled options in cascade priority order.
    pub fn enabled_options(&self) -> Vec<SortOption> {
        let mut opts: Vec<SortOption> =
            self.sort_by.iter().copied().filter(|o| o.enabled).collect();
        opts.sort_by_key(|o| o.idx);
        opts
    }

    /// Whether the shuffle pseudo-criterion is enabled.
    pub fn shuffle_enabled(&self) -> bool {
        self.sort_by
            .iter()
            .any(|o| o.enabled && o.name == SortKey::Shuffle)
    }

    /// Returns the option controlling `name`, if present.
    pub fn option(&self, name: SortKey) -> Option<&SortOption> {
        self.sort_by.iter().find(|o| o.name == name)
    }

    /// Mutable access to the option controlling `name`.
    pub fn option_mut(&mut self, name: SortKey) -> Option<&mut SortOption> {
        self.sort_by.iter_mut().find(|o| o.name == name)
    }
}
