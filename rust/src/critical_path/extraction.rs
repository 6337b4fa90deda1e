//! Ordered sequence of zero-slack tasks.

use crate::backward_pass::Timings;
use crate::log_decision;
use crate::sorting::{sort_by_start, StartKey};

/// All critical tasks ordered by earliest start, then task id.
///
/// The result is a report order, not a path: parallel critical chains are
/// interleaved by start time.
pub fn extract_critical_path<'r>(timings: &Timings<'r>, verbosity: u8) -> Vec<&'r str> {
    let mut critical: Vec<(&'r str, f64)> = timings
        .iter()
        .filter(|(_, timing)| timing.is_critical())
        .map(|(id, timing)| (id, timing.earliest_start))
        .collect();

    sort_by_start(&mut critical, |&(task_id, earliest_start)| StartKey {
        earliest_start,
        task_id,
    });

    for (id, start) in &critical {
        log_decision!(verbosity, "  Critical {} at {}", id, start);
    }

    critical.into_iter().map(|(id, _)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backward_pass::backward_pass;
    use crate::forward_pass::forward_pass;
    use crate::network::NetworkKind;
    use crate::registry::TaskRegistry;

    fn critical_path(registry: &TaskRegistry, kind: NetworkKind) -> Vec<String> {
        let network = registry.build(kind).unwrap();
        let earliest = forward_pass(&network, 0).unwrap();
        let timings = backward_pass(&network, &earliest, 0).unwrap();
        extract_critical_path(&timings, 0)
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_diamond_critical_path() {
        let mut registry = TaskRegistry::new();
        registry.add_task("A", 3.0, &[]).unwrap();
        registry.add_task("B", 2.0, &["A"]).unwrap();
        registry.add_task("C", 4.0, &["A"]).unwrap();
        registry.add_task("D", 1.0, &["B", "C"]).unwrap();
        for kind in [NetworkKind::OnNode, NetworkKind::OnArc] {
            assert_eq!(critical_path(&registry, kind), vec!["A", "C", "D"]);
        }
    }

    #[test]
    fn test_parallel_critical_chains_interleave_by_start_then_id() {
        // Two equal chains: x1 -> x2 and y1 -> y2, registered out of id order.
        let mut registry = TaskRegistry::new();
        registry.add_task("y1", 2.0, &[]).unwrap();
        registry.add_task("x2", 3.0, &["x1"]).unwrap();
        registry.add_task("x1", 2.0, &[]).unwrap();
        registry.add_task("y2", 3.0, &["y1"]).unwrap();
        assert_eq!(
            critical_path(&registry, NetworkKind::OnNode),
            vec!["x1", "y1", "x2", "y2"]
        );
    }

    #[test]
    fn test_single_task_is_critical() {
        let mut registry = TaskRegistry::new();
        registry.add_task("only", 4.0, &[]).unwrap();
        assert_eq!(critical_path(&registry, NetworkKind::OnArc), vec!["only"]);
    }
}
