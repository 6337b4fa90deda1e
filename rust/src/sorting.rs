//! Deterministic task ordering shared by the critical path and the machine scheduler.
//!
//! Tasks are ordered by earliest start, ties broken by task id so the result
//! never depends on registration or hash order.

use std::cmp::Ordering;

/// Compare f64 values for sorting, treating NaN as equal.
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Sort key: (earliest_start, task_id).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartKey<'a> {
    pub earliest_start: f64,
    pub task_id: &'a str,
}

impl Eq for StartKey<'_> {}

impl Ord for StartKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_f64(self.earliest_start, other.earliest_start).then(self.task_id.cmp(other.task_id))
    }
}

impl PartialOrd for StartKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort items by (earliest start, task id) ascending.
pub fn sort_by_start<'k, T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> StartKey<'k>,
{
    items.sort_by(|a, b| key(a).cmp(&key(b)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_then_id() {
        let mut items = vec![("d", 7.0), ("c", 3.0), ("b", 3.0), ("a", 0.0)];
        sort_by_start(&mut items, |&(task_id, earliest_start)| StartKey {
            earliest_start,
            task_id,
        });
        let ids: Vec<&str> = items.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_cmp_f64_nan_is_equal() {
        assert_eq!(cmp_f64(f64::NAN, 1.0), Ordering::Equal);
        assert_eq!(cmp_f64(1.0, 2.0), Ordering::Less);
    }

    #[test]
    fn test_ids_compare_lexicographically() {
        let a = StartKey {
            earliest_start: 1.0,
            task_id: "T10",
        };
        let b = StartKey {
            earliest_start: 1.0,
            task_id: "T9",
        };
        assert!(a < b);
    }
}
