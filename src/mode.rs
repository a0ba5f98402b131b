//! Most frequent values of a sequence, counted with a [`ChainedTable`]

use crate::ChainedTable;

/// Returns every value that occurs most often in `values`, together with that count.
///
/// Ties are all reported. The modes come back in the counting table's bucket order,
/// not in input order. An empty input yields `(vec![], 0)`.
///
/// ```rust
/// use primehash::find_mode;
///
/// let (modes, frequency) = find_mode(&["a", "a", "b", "c", "c", "c"]);
/// assert_eq!(modes, vec!["c".to_string()]);
/// assert_eq!(frequency, 3);
/// ```
pub fn find_mode<S: AsRef<str>>(values: &[S]) -> (Vec<String>, usize) {
    let mut counts: ChainedTable<usize> = ChainedTable::default();
    for value in values {
        let value = value.as_ref();
        let count = if counts.contains_key(value) {
            counts.get(value).copied().unwrap_or_default().saturating_add(1)
        } else {
            1
        };
        counts.put(value, count);
    }

    let tallies = counts.keys_and_values();
    let frequency = tallies.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let modes = tallies
        .into_iter()
        .filter(|(_, count)| *count == frequency)
        .map(|(value, _)| value)
        .collect();
    (modes, frequency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode() {
        assert_eq!(find_mode(&["a", "a", "b", "c", "c", "c"]), (vec!["c".to_string()], 3));
    }

    #[test]
    fn test_ties_are_all_reported() {
        let (mut modes, frequency) =
            find_mode(&["grape", "apple", "apple", "melon", "grape", "peach", "melon"]);
        modes.sort();
        assert_eq!(modes, vec!["apple", "grape", "melon"]);
        assert_eq!(frequency, 2);
    }

    #[test]
    fn test_all_distinct() {
        let values: Vec<String> = (0..30).map(|i| format!("value{i}")).collect();
        let (modes, frequency) = find_mode(&values);
        assert_eq!(modes.len(), 30);
        assert_eq!(frequency, 1);
    }

    #[test]
    fn test_empty_input() {
        let values: [&str; 0] = [];
        assert_eq!(find_mode(&values), (Vec::new(), 0));
    }
}
