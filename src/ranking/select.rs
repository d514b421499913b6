//! Partial sort via quickselect.
//!
//! Ranking rarely needs the full order of a hundred thousand
//! combinations; callers page through a small prefix. A deterministic
//! median-of-three quickselect moves the `count` smallest elements to
//! the front, then only that prefix is sorted.

use std::cmp::Ordering;

/// Sorts the `count` smallest elements (under `cmp`) into the front of
/// `items`, leaving the rest in unspecified order.
///
/// `cmp` must be a total order for the result to be deterministic.
pub(crate) fn partial_sort_by<T, F>(items: &mut [T], count: usize, mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len == 0 || count == 0 {
        return;
    }
    if count >= len {
        items.sort_by(&mut cmp);
        return;
    }
    select_nth_by(items, count - 1, &mut cmp);
    items[..count].sort_by(&mut cmp);
}

/// Partitions `items` so that the element at `nth` is in its sorted
/// position, everything before it compares `<=`, everything after `>=`.
fn select_nth_by<T, F>(items: &mut [T], nth: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    debug_assert!(nth < items.len());
    let mut lo = 0;
    let mut hi = items.len() - 1;
    while lo < hi {
        let store = partition(items, lo, hi, cmp);
        match nth.cmp(&store) {
            Ordering::Equal => return,
            Ordering::Less => hi = store - 1,
            Ordering::Greater => lo = store + 1,
        }
    }
}

/// Lomuto partition with a median-of-three pivot. Returns the final
/// pivot position.
fn partition<T, F>(items: &mut [T], lo: usize, hi: usize, cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mid = lo + (hi - lo) / 2;
    if cmp(&items[mid], &items[lo]) == Ordering::Less {
        items.swap(mid, lo);
    }
    if cmp(&items[hi], &items[lo]) == Ordering::Less {
        items.swap(hi, lo);
    }
    if cmp(&items[hi], &items[mid]) == Ordering::Less {
        items.swap(hi, mid);
    }
    items.swap(mid, hi);

    let mut store = lo;
    for i in lo..hi {
        if cmp(&items[i], &items[hi]) == Ordering::Less {
            items.swap(i, store);
            store += 1;
        }
    }
    items.swap(store, hi);
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matches_full_sort() {
        let mut items: Vec<u32> = (0..200).map(|i| (i * 7919) % 211).collect();
        let mut full = items.clone();
        full.sort_unstable();

        partial_sort_by(&mut items, 10, |a, b| a.cmp(b));
        assert_eq!(&items[..10], &full[..10]);
    }

    #[test]
    fn test_count_at_least_len_sorts_everything() {
        let mut items = vec![5u32, 1, 4, 2, 3];
        partial_sort_by(&mut items, 99, |a, b| a.cmp(b));
        assert_eq!(items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_count_zero_is_noop() {
        let mut items = vec![3u32, 1, 2];
        partial_sort_by(&mut items, 0, |a, b| a.cmp(b));
        assert_eq!(items, vec![3, 1, 2]);
    }

    #[test]
    fn test_duplicates() {
        let mut items = vec![2u32, 2, 1, 1, 3, 3, 0];
        partial_sort_by(&mut items, 3, |a, b| a.cmp(b));
        assert_eq!(&items[..3], &[0, 1, 1]);
    }

    #[test]
    fn test_reverse_order() {
        let mut items: Vec<u32> = (0..50).rev().collect();
        partial_sort_by(&mut items, 5, |a, b| a.cmp(b));
        assert_eq!(&items[..5], &[0, 1, 2, 3, 4]);
    }
}
