//! Per-row and per-column aggregation helpers.
//!
//! A "group" is one row or one column of a grid, yielded as a sequence of
//! optional occupants. Empty cells contribute nothing to a minimum and never
//! make a group flexible.

/// What to do with free space when every weight in a split is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroWeightPolicy {
    /// Divide the space equally across all groups
    SplitEvenly,
    /// Hand out nothing; the space stays free
    Withhold,
}

/// Largest minimum across a group, treating empty cells as 0.
pub fn aggregate_minimum<T, I, F>(group: I, minimum: F) -> f64
where
    I: IntoIterator<Item = Option<T>>,
    F: FnMut(T) -> f64,
{
    group
        .into_iter()
        .flatten()
        .map(minimum)
        .fold(0.0_f64, f64::max)
}

/// Whether every occupant of a group is fixed, treating empty cells as fixed.
pub fn aggregate_fixedness<T, I, F>(group: I, fixed: F) -> bool
where
    I: IntoIterator<Item = Option<T>>,
    F: FnMut(T) -> bool,
{
    group.into_iter().flatten().all(fixed)
}

/// Resolve the effective weight of every group.
///
/// An explicit weight always wins. Otherwise all-fixed groups weigh 0 and
/// groups with at least one flexible occupant weigh 1.
pub fn resolve_weights(explicit: &[Option<f64>], fixed: &[bool]) -> Vec<f64> {
    explicit
        .iter()
        .zip(fixed)
        .map(|(weight, &fixed)| match weight {
            Some(w) => *w,
            None if fixed => 0.0,
            None => 1.0,
        })
        .collect()
}

/// Split `free` space across groups in proportion to `weights`.
///
/// Negative free space is treated as none.
pub fn proportional_space(weights: &[f64], free: f64, policy: ZeroWeightPolicy) -> Vec<f64> {
    let free = free.max(0.0);
    let total: f64 = weights.iter().sum();

    if total > 0.0 {
        return weights.iter().map(|w| free * w / total).collect();
    }

    match policy {
        ZeroWeightPolicy::SplitEvenly if !weights.is_empty() => {
            let share = free / weights.len() as f64;
            vec![share; weights.len()]
        }
        _ => vec![0.0; weights.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_ignores_empty_cells() {
        let group = [Some(20.0), None, Some(35.0), None];
        assert_eq!(aggregate_minimum(group, |m| m), 35.0);

        let empty: [Option<f64>; 3] = [None, None, None];
        assert_eq!(aggregate_minimum(empty, |m| m), 0.0);
    }

    #[test]
    fn test_fixedness_is_conjunction() {
        assert!(aggregate_fixedness([Some(true), None, Some(true)], |f| f));
        assert!(!aggregate_fixedness([Some(true), Some(false)], |f| f));
        // A group with no occupants counts as fixed
        assert!(aggregate_fixedness([None::<bool>, None], |f| f));
    }

    #[test]
    fn test_resolve_weights() {
        let explicit = [None, None, Some(3.0), Some(0.0)];
        let fixed = [true, false, true, false];
        assert_eq!(resolve_weights(&explicit, &fixed), vec![0.0, 1.0, 3.0, 0.0]);
    }

    #[test]
    fn test_proportional_space() {
        let split = proportional_space(&[1.0, 3.0], 100.0, ZeroWeightPolicy::SplitEvenly);
        assert_eq!(split, vec![25.0, 75.0]);

        let even = proportional_space(&[0.0, 0.0], 100.0, ZeroWeightPolicy::SplitEvenly);
        assert_eq!(even, vec![50.0, 50.0]);

        let withheld = proportional_space(&[0.0, 0.0], 100.0, ZeroWeightPolicy::Withhold);
        assert_eq!(withheld, vec![0.0, 0.0]);

        let negative = proportional_space(&[1.0, 1.0], -20.0, ZeroWeightPolicy::SplitEvenly);
        assert_eq!(negative, vec![0.0, 0.0]);

        assert!(proportional_space(&[], 10.0, ZeroWeightPolicy::SplitEvenly).is_empty());
    }
}
