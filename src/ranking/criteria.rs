//! Per-criterion scoring of a combination's weekly layout.
//!
//! Every criterion maps a combination to one `f64` where **lower is
//! better** in the default (non-reversed) direction. Scores are
//! computed against [`WeekSlots`], the per-day, start-sorted view of a
//! combination's placed blocks.

use crate::catalog::DistanceMatrix;
use crate::models::PlacedBlock;

use super::SortKey;

/// Lunch window: 11:00 to 14:00.
const LUNCH_START: u16 = 660;
const LUNCH_END: u16 = 840;
/// Daily lunch overlap below this many minutes is tolerated.
const LUNCH_SLACK: u32 = 60;
/// Reference time for the early-class penalty: noon.
const EARLY_REF: f64 = 720.0;
/// Gaps at least this long are not walked back-to-back.
const WALK_GAP_MAX: u16 = 45;

/// One occupied time range on a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    pub start: u16,
    pub end: u16,
    pub building: Option<u16>,
}

/// Per-day, start-sorted view of a combination's blocks.
#[derive(Debug, Clone, Default)]
pub(crate) struct WeekSlots {
    days: [Vec<Slot>; 7],
}

impl WeekSlots {
    /// Merges placed blocks into per-day sorted order.
    pub(crate) fn from_blocks(blocks: &[PlacedBlock]) -> Self {
        let mut week = Self::default();
        for block in blocks {
            let day = &mut week.days[block.day.index()];
            let slot = Slot {
                start: block.start_min,
                end: block.end_min,
                building: block.building,
            };
            // insertion sort: day lists are short
            let pos = day
                .iter()
                .position(|s| (s.start, s.end) > (slot.start, slot.end))
                .unwrap_or(day.len());
            day.insert(pos, slot);
        }
        week
    }

    pub(crate) fn day(&self, idx: usize) -> &[Slot] {
        &self.days[idx]
    }
}

impl SortKey {
    /// Scores one combination under this criterion. Lower is better.
    ///
    /// `Shuffle` carries no score; ordering under it is handled by the
    /// evaluator directly.
    pub(crate) fn score(self, week: &WeekSlots, distance: Option<&DistanceMatrix>) -> f64 {
        match self {
            Self::Variance => variance(week),
            Self::Compactness => compactness(week),
            Self::LunchTime => lunch_overlap(week),
            Self::NoEarly => early_penalty(week),
            Self::Distance => walk_time(week, distance),
            Self::Shuffle => 0.0,
        }
    }
}

/// Variance of daily class minutes across the week.
///
/// Higher when the weekly load is unbalanced. The divisor is the five
/// teaching days even though all seven are summed, preserving the
/// established scale of the metric.
fn variance(week: &WeekSlots) -> f64 {
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for day in 0..7 {
        let minutes: f64 = week
            .day(day)
            .iter()
            .map(|s| f64::from(s.end - s.start))
            .sum();
        sum += minutes;
        sum_sq += minutes * minutes;
    }
    sum_sq / 5.0 - (sum / 5.0).powi(2)
}

/// Total idle time between consecutive blocks, summed over days.
fn compactness(week: &WeekSlots) -> f64 {
    let mut gap_total = 0.0;
    for day in 0..7 {
        for pair in week.day(day).windows(2) {
            gap_total += f64::from(pair[1].start.saturating_sub(pair[0].end));
        }
    }
    gap_total
}

/// Class time overlapping the lunch window, counting only days whose
/// overlap exceeds the slack.
fn lunch_overlap(week: &WeekSlots) -> f64 {
    let mut total: u32 = 0;
    for day in 0..7 {
        let day_overlap: u32 = week
            .day(day)
            .iter()
            .map(|s| {
                let lo = s.start.max(LUNCH_START);
                let hi = s.end.min(LUNCH_END);
                u32::from(hi.saturating_sub(lo))
            })
            .sum();
        if day_overlap > LUNCH_SLACK {
            total += day_overlap;
        }
    }
    f64::from(total)
}

/// Squared earliness of each day's first class relative to noon.
fn early_penalty(week: &WeekSlots) -> f64 {
    let mut total = 0.0;
    for day in 0..7 {
        if let Some(first) = week.day(day).first() {
            let early = (EARLY_REF - f64::from(first.start)).max(0.0);
            total += early * early;
        }
    }
    total
}

/// Walking minutes between consecutive same-day blocks.
///
/// Pairs separated by a long gap are skipped (nobody walks straight
/// over), as are blocks in unknown buildings. Zero without a matrix.
fn walk_time(week: &WeekSlots, distance: Option<&DistanceMatrix>) -> f64 {
    let Some(matrix) = distance else {
        return 0.0;
    };
    let mut total: u64 = 0;
    for day in 0..7 {
        for pair in week.day(day).windows(2) {
            if pair[1].start.saturating_sub(pair[0].end) >= WALK_GAP_MAX {
                continue;
            }
            if let (Some(a), Some(b)) = (pair[0].building, pair[1].building) {
                total += u64::from(matrix.travel_time(a, b));
            }
        }
    }
    total as f64
}
