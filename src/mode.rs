//! Frequency counting on top of the public `SeparateChainingMap` API.

use crate::separate_chaining::SeparateChainingMap;

/// Most frequent values in `values` and their frequency.
///
/// Counts with one `get`/`put` pass, then collects every key whose count
/// equals the maximum, in the table's enumeration order. An empty input
/// yields `(vec![], 0)`.
pub fn find_mode<T: AsRef<str>>(values: &[T]) -> (Vec<String>, usize) {
    let mut counts: SeparateChainingMap<usize> = SeparateChainingMap::default();
    let mut highest = 0;

    for value in values {
        let key = value.as_ref();
        let count = counts.get(key).copied().unwrap_or(0) + 1;
        counts.put(key, count);
        highest = highest.max(count);
    }

    let modes = counts
        .iter()
        .filter(|&(_, &count)| count == highest)
        .map(|(key, _)| key.to_string())
        .collect();
    (modes, highest)
}
