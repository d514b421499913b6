//! The evaluator: scoring, ordering, and paging of combinations.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::catalog::DistanceMatrix;
use crate::generator::GeneratedCombination;
use crate::models::Combination;
use crate::{Error, Result};

use super::criteria::WeekSlots;
use super::select::partial_sort_by;
use super::{SortConfig, SortKey, SortMode, SortOption};

/// Score differences within this tolerance count as ties.
const EPSILON: f64 = 1e-9;

/// How far into the order `sort` materializes eagerly. Paging past the
/// window extends it on demand.
const SORT_WINDOW: usize = 1000;

struct EvalItem {
    combination: Combination,
    week: WeekSlots,
}

/// Ranks generated combinations under a [`SortConfig`].
///
/// Construction ingests each combination's blocks into a per-day
/// sorted week view and sorts under the initial configuration. Raw
/// criterion scores are cached across [`Evaluator::change_sort`] calls;
/// only criteria never scored before are recomputed.
///
/// The order is materialized lazily: `sort` places the first
/// [`SORT_WINDOW`] combinations, and [`Evaluator::get`] or
/// [`Evaluator::page`] extend the sorted prefix when asked for more.
pub struct Evaluator {
    items: Vec<EvalItem>,
    /// Current permutation of item indices; `order[..sorted_upto]` is
    /// the finished prefix.
    order: Vec<u32>,
    sorted_upto: usize,
    cache: HashMap<SortKey, Vec<f64>>,
    /// Per-item collapsed score, valid in weighted multi-criteria mode.
    combined: Vec<f64>,
    config: SortConfig,
    distance: Option<DistanceMatrix>,
}

impl Evaluator {
    /// Ingests combinations and sorts them under `config`.
    pub fn build(
        combinations: Vec<GeneratedCombination>,
        config: SortConfig,
        distance: Option<DistanceMatrix>,
    ) -> Self {
        let items = combinations
            .into_iter()
            .map(|g| {
                let week = WeekSlots::from_blocks(g.blocks());
                EvalItem {
                    combination: g.combination,
                    week,
                }
            })
            .collect();
        let mut evaluator = Self {
            items,
            order: Vec::new(),
            sorted_upto: 0,
            cache: HashMap::new(),
            combined: Vec::new(),
            config,
            distance,
        };
        evaluator.sort();
        evaluator
    }

    /// Number of ranked combinations.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there is nothing to rank.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The active configuration.
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Swaps in a new configuration and re-sorts.
    ///
    /// Criterion scores computed under the old configuration are kept;
    /// direction, weight, priority, and mode changes cost only the
    /// re-sort.
    pub fn change_sort(&mut self, config: SortConfig) {
        self.config = config;
        self.sort();
    }

    /// Rebuilds the order under the current configuration.
    pub fn sort(&mut self) {
        let n = self.items.len();
        self.order = (0..n as u32).collect();
        self.sorted_upto = 0;
        if n == 0 {
            return;
        }

        if self.config.shuffle_enabled() {
            let mut rng = StdRng::seed_from_u64(self.config.shuffle_seed);
            self.order.shuffle(&mut rng);
            self.sorted_upto = n;
            return;
        }

        self.refresh_scores();
        let enabled = self.config.enabled_options();
        if self.config.mode == SortMode::Weighted && enabled.len() > 1 {
            self.combine(&enabled);
        }
        self.extend_sorted(SORT_WINDOW.min(n));
    }

    /// The combination at `index` in the current order.
    pub fn get(&mut self, index: usize) -> Result<&Combination> {
        let len = self.items.len();
        if index >= len {
            return Err(Error::Index { index, len });
        }
        self.extend_sorted(index + 1);
        Ok(&self.items[self.order[index] as usize].combination)
    }

    /// Combinations `offset..offset + limit` of the current order.
    ///
    /// The page is clipped at the end of the order; an `offset` past
    /// the end (including any offset when empty) is an index error.
    pub fn page(&mut self, offset: usize, limit: usize) -> Result<Vec<&Combination>> {
        let len = self.items.len();
        if offset >= len {
            return Err(Error::Index { index: offset, len });
        }
        let end = offset.saturating_add(limit).min(len);
        self.extend_sorted(end);
        Ok(self.order[offset..end]
            .iter()
            .map(|&i| &self.items[i as usize].combination)
            .collect())
    }

    /// Raw score of the combination at `index` under one criterion.
    ///
    /// Scores the whole set on first use of a criterion and caches it.
    pub fn score(&mut self, key: SortKey, index: usize) -> Result<f64> {
        let len = self.items.len();
        if index >= len {
            return Err(Error::Index { index, len });
        }
        self.extend_sorted(index + 1);
        let item = self.order[index] as usize;
        if !self.cache.contains_key(&key) {
            let distance = self.distance.as_ref();
            let scores = self
                .items
                .iter()
                .map(|it| key.score(&it.week, distance))
                .collect();
            self.cache.insert(key, scores);
        }
        Ok(self.cache[&key][item])
    }

    /// Scores every enabled criterion not yet in the cache.
    fn refresh_scores(&mut self) {
        let distance = self.distance.as_ref();
        for option in self.config.enabled_options() {
            if option.name == SortKey::Shuffle || self.cache.contains_key(&option.name) {
                continue;
            }
            let scores: Vec<f64> = self
                .items
                .iter()
                .map(|it| option.name.score(&it.week, distance))
                .collect();
            self.cache.insert(option.name, scores);
        }
    }

    /// Collapses the enabled criteria into one score per item:
    /// weight × min-max normalized, summed. A criterion whose scores
    /// are all equal carries no signal and is skipped.
    fn combine(&mut self, enabled: &[SortOption]) {
        self.combined = vec![0.0; self.items.len()];
        for option in enabled {
            if option.name == SortKey::Shuffle {
                continue;
            }
            let scores = &self.cache[&option.name];
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for &s in scores {
                min = min.min(s);
                max = max.max(s);
            }
            let range = max - min;
            if range <= EPSILON {
                debug!("flat score range for {:?}, skipped in weighted mode", option.name);
                continue;
            }
            for (acc, &s) in self.combined.iter_mut().zip(scores) {
                let normalized = if option.reverse {
                    (max - s) / range
                } else {
                    (s - min) / range
                };
                *acc += option.weight * normalized;
            }
        }
    }

    /// Grows the finished prefix of `order` to at least `upto`.
    fn extend_sorted(&mut self, upto: usize) {
        let upto = upto.min(self.order.len());
        if upto <= self.sorted_upto {
            return;
        }
        let mut order = std::mem::take(&mut self.order);
        let lanes = self.lanes();
        let done = self.sorted_upto;
        partial_sort_by(&mut order[done..], upto - done, |&a, &b| {
            compare(&lanes, a, b)
        });
        self.order = order;
        self.sorted_upto = upto;
    }

    /// The comparison lanes for the current configuration: cascade
    /// walks one lane per criterion in priority order; weighted
    /// multi-criteria mode walks the single combined lane.
    fn lanes(&self) -> Vec<(&[f64], bool)> {
        let enabled = self.config.enabled_options();
        if self.config.mode == SortMode::Weighted && enabled.len() > 1 {
            return vec![(self.combined.as_slice(), false)];
        }
        enabled
            .iter()
            .filter(|o| o.name != SortKey::Shuffle)
            .map(|o| (self.cache[&o.name].as_slice(), o.reverse))
            .collect()
    }
}

/// Lexicographic comparison across lanes; exhausted lanes fall back to
/// generation order, making the order total and deterministic.
fn compare(lanes: &[(&[f64], bool)], a: u32, b: u32) -> Ordering {
    for &(lane, reverse) in lanes {
        let (x, y) = (lane[a as usize], lane[b as usize]);
        let diff = if reverse { y - x } else { x - y };
        if diff.abs() > EPSILON {
            return if diff < 0.0 {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
    }
    a.cmp(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::generator::{generate, GeneratorOptions};
    use crate::models::{Course, Meeting, Section, Selection, WEEKDAYS};

    /// One course with one section per spec list; `Any` selection, so
    /// combination `i` carries section `i`'s meetings.
    fn combinations(specs: &[&[&str]]) -> Vec<GeneratedCombination> {
        let sections = specs
            .iter()
            .enumerate()
            .map(|(i, meetings)| {
                Section::new(
                    format!("{i:03}"),
                    meetings.iter().map(|m| Meeting::parse(m).unwrap()).collect(),
                )
            })
            .collect();
        let catalog =
            InMemoryCatalog::new().with_course(Course::new("a", "Course A", sections));
        let selection = Selection::new().any("a");
        generate(&catalog, &selection, &GeneratorOptions::default())
            .unwrap()
            .combinations
    }

    fn config_with(mode: SortMode, keys: &[(SortKey, bool)]) -> SortConfig {
        let mut config = SortConfig::default();
        for option in &mut config.sort_by {
            option.enabled = false;
        }
        for (pos, &(key, reverse)) in keys.iter().enumerate() {
            let option = config.option_mut(key).unwrap();
            option.enabled = true;
            option.reverse = reverse;
            option.idx = pos;
        }
        config.mode = mode;
        config
    }

    fn section_order(evaluator: &mut Evaluator) -> Vec<usize> {
        let len = evaluator.len();
        evaluator
            .page(0, len)
            .unwrap()
            .iter()
            .map(|c| c.section_of("a").unwrap())
            .collect()
    }

    /// Sections with compactness 120, 0, and 30.
    fn gapped_specs() -> Vec<&'static [&'static str]> {
        vec![
            &["Mo 10:00 - 11:00", "Mo 13:00 - 14:00"],
            &["Mo 10:00 - 11:00", "Mo 11:00 - 12:00"],
            &["Mo 10:00 - 11:00", "Mo 11:30 - 12:30"],
        ]
    }

    #[test]
    fn test_single_criterion_orders_by_score() {
        let config = config_with(SortMode::Cascade, &[(SortKey::Compactness, false)]);
        let mut evaluator = Evaluator::build(combinations(&gapped_specs()), config, None);
        assert_eq!(section_order(&mut evaluator), vec![1, 2, 0]);
    }

    #[test]
    fn test_cascade_ignores_weight() {
        let mut config = config_with(SortMode::Cascade, &[(SortKey::Compactness, false)]);
        config.option_mut(SortKey::Compactness).unwrap().weight = 123.0;
        let mut evaluator = Evaluator::build(combinations(&gapped_specs()), config, None);
        assert_eq!(section_order(&mut evaluator), vec![1, 2, 0]);
    }

    #[test]
    fn test_reverse_flips_order() {
        let config = config_with(SortMode::Cascade, &[(SortKey::Compactness, true)]);
        let mut evaluator = Evaluator::build(combinations(&gapped_specs()), config, None);
        assert_eq!(section_order(&mut evaluator), vec![0, 2, 1]);
    }

    #[test]
    fn test_tie_breaks_by_generation_order() {
        let specs: Vec<&[&str]> = vec![&["Mo 10:00 - 11:00"], &["Tu 10:00 - 11:00"]];
        let config = config_with(SortMode::Cascade, &[(SortKey::Compactness, false)]);
        let mut evaluator = Evaluator::build(combinations(&specs), config, None);
        assert_eq!(section_order(&mut evaluator), vec![0, 1]);
    }

    #[test]
    fn test_cascade_falls_through_on_tie() {
        // Both sections are gapless; the later-starting day wins the
        // second criterion.
        let specs: Vec<&[&str]> = vec![
            &["Mo 08:00 - 09:00", "Mo 09:00 - 10:00"],
            &["Mo 11:00 - 12:00", "Mo 12:00 - 13:00"],
        ];
        let config = config_with(
            SortMode::Cascade,
            &[(SortKey::Compactness, false), (SortKey::NoEarly, false)],
        );
        let mut evaluator = Evaluator::build(combinations(&specs), config, None);
        assert_eq!(section_order(&mut evaluator), vec![1, 0]);
    }

    #[test]
    fn test_weighted_single_criterion_matches_cascade() {
        let cascade = config_with(SortMode::Cascade, &[(SortKey::Compactness, false)]);
        let mut weighted = config_with(SortMode::Weighted, &[(SortKey::Compactness, false)]);
        weighted.option_mut(SortKey::Compactness).unwrap().weight = 1.0;

        let mut a = Evaluator::build(combinations(&gapped_specs()), cascade, None);
        let mut b = Evaluator::build(combinations(&gapped_specs()), weighted, None);
        assert_eq!(section_order(&mut a), section_order(&mut b));
    }

    #[test]
    fn test_weighted_skips_flat_criterion() {
        // Every section has zero lunch overlap, so lunchTime carries no
        // signal and compactness alone decides.
        let config = config_with(
            SortMode::Weighted,
            &[(SortKey::LunchTime, false), (SortKey::Compactness, false)],
        );
        let mut evaluator = Evaluator::build(combinations(&gapped_specs()), config, None);
        assert_eq!(section_order(&mut evaluator), vec![1, 2, 0]);
    }

    #[test]
    fn test_weighted_weight_dominates() {
        // Section 0: best noEarly, worst compactness. Section 1: the
        // opposite. A heavy weight on noEarly must pick section 0 first.
        let specs: Vec<&[&str]> = vec![
            &["Mo 13:00 - 14:00", "Mo 16:00 - 17:00"],
            &["Mo 08:00 - 09:00", "Mo 09:00 - 10:00"],
        ];
        let mut config = config_with(
            SortMode::Weighted,
            &[(SortKey::Compactness, false), (SortKey::NoEarly, false)],
        );
        config.option_mut(SortKey::NoEarly).unwrap().weight = 10.0;
        let mut evaluator = Evaluator::build(combinations(&specs), config, None);
        assert_eq!(section_order(&mut evaluator), vec![0, 1]);

        let mut config = config_with(
            SortMode::Weighted,
            &[(SortKey::Compactness, false), (SortKey::NoEarly, false)],
        );
        config.option_mut(SortKey::Compactness).unwrap().weight = 10.0;
        let mut evaluator = Evaluator::build(combinations(&specs), config, None);
        assert_eq!(section_order(&mut evaluator), vec![1, 0]);
    }

    #[test]
    fn test_distance_criterion_uses_matrix() {
        let matrix = DistanceMatrix::new(2, vec![0, 10, 10, 0]).unwrap();
        let far = Section::new(
            "000",
            vec![
                Meeting::parse("Mo 10:00 - 11:00").unwrap().with_building(0),
                Meeting::parse("Mo 11:00 - 12:00").unwrap().with_building(1),
            ],
        );
        let near = Section::new(
            "001",
            vec![
                Meeting::parse("Mo 10:00 - 11:00").unwrap().with_building(0),
                Meeting::parse("Mo 11:00 - 12:00").unwrap().with_building(0),
            ],
        );
        let catalog = InMemoryCatalog::new()
            .with_course(Course::new("a", "Course A", vec![far, near]));
        let generated = generate(
            &catalog,
            &Selection::new().any("a"),
            &GeneratorOptions::default(),
        )
        .unwrap();

        let config = config_with(SortMode::Cascade, &[(SortKey::Distance, false)]);
        let mut evaluator =
            Evaluator::build(generated.combinations, config, Some(matrix));
        assert_eq!(section_order(&mut evaluator), vec![1, 0]);
        assert_eq!(evaluator.score(SortKey::Distance, 0).unwrap(), 0.0);
        assert_eq!(evaluator.score(SortKey::Distance, 1).unwrap(), 10.0);
    }

    #[test]
    fn test_shuffle_is_seeded_and_complete() {
        let specs = gapped_specs();
        let mut config = config_with(SortMode::Cascade, &[(SortKey::Shuffle, false)]);
        config.shuffle_seed = 7;

        let mut a = Evaluator::build(combinations(&specs), config.clone(), None);
        let mut b = Evaluator::build(combinations(&specs), config, None);
        let order_a = section_order(&mut a);
        assert_eq!(order_a, section_order(&mut b));

        // still a permutation of everything
        let mut sorted = order_a;
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn test_change_sort_reorders_in_place() {
        let config = config_with(SortMode::Cascade, &[(SortKey::Compactness, false)]);
        let mut evaluator = Evaluator::build(combinations(&gapped_specs()), config, None);
        assert_eq!(section_order(&mut evaluator), vec![1, 2, 0]);

        evaluator.change_sort(config_with(
            SortMode::Cascade,
            &[(SortKey::Compactness, true)],
        ));
        assert_eq!(section_order(&mut evaluator), vec![0, 2, 1]);
    }

    #[test]
    fn test_get_and_page_bounds() {
        let config = config_with(SortMode::Cascade, &[(SortKey::Compactness, false)]);
        let mut evaluator = Evaluator::build(combinations(&gapped_specs()), config, None);

        assert_eq!(evaluator.get(0).unwrap().section_of("a"), Some(1));
        assert!(matches!(
            evaluator.get(3),
            Err(Error::Index { index: 3, len: 3 })
        ));

        // page clips at the end
        let tail = evaluator.page(2, 10).unwrap();
        assert_eq!(tail.len(), 1);
        assert!(matches!(evaluator.page(3, 1), Err(Error::Index { .. })));
    }

    #[test]
    fn test_paging_past_window_preserves_order() {
        // Four courses in disjoint hour bands, six weekday variants
        // each: 6^4 = 1296 conflict-free combinations, more than the
        // eager sort window, so paging must extend it incrementally.
        let mut catalog = InMemoryCatalog::new();
        let mut selection = Selection::new();
        for c in 0..4u16 {
            let start = 480 + c * 60;
            let sections = (0..6)
                .map(|j| {
                    Section::new(
                        format!("{j:03}"),
                        vec![Meeting::new(vec![WEEKDAYS[j]], start, start + 50).unwrap()],
                    )
                })
                .collect();
            let key = format!("c{c}");
            catalog.insert(Course::new(key.clone(), key.clone(), sections));
            selection = selection.any(key);
        }
        let generated =
            generate(&catalog, &selection, &GeneratorOptions::default()).unwrap();
        assert_eq!(generated.len(), 1296);

        let config = config_with(
            SortMode::Cascade,
            &[(SortKey::Compactness, false), (SortKey::NoEarly, false)],
        );
        let mut stepped =
            Evaluator::build(generated.combinations.clone(), config.clone(), None);
        let mut full = Evaluator::build(generated.combinations, config, None);

        let len = full.len();
        let expected: Vec<Vec<usize>> = full
            .page(0, len)
            .unwrap()
            .iter()
            .map(|c| c.to_indices())
            .collect();

        let mut collected: Vec<Vec<usize>> = Vec::with_capacity(len);
        let mut offset = 0;
        while offset < len {
            let page = stepped.page(offset, 100).unwrap();
            collected.extend(page.iter().map(|c| c.to_indices()));
            offset += 100;
        }
        assert_eq!(collected, expected);
    }

    #[test]
    fn test_empty_evaluator() {
        let mut evaluator = Evaluator::build(Vec::new(), SortConfig::default(), None);
        assert!(evaluator.is_empty());
        assert!(matches!(
            evaluator.get(0),
            Err(Error::Index { index: 0, len: 0 })
        ));
        assert!(matches!(evaluator.page(0, 5), Err(Error::Index { .. })));
    }
}
