//! Connected chains of critical tasks.
//!
//! Two critical tasks are linked when one directly precedes the other and the
//! predecessor's earliest finish equals the successor's earliest start. Every
//! chain from a task with no such predecessor to a task with no such successor
//! spans the whole project: it starts at 0 and finishes at the makespan.

use crate::backward_pass::Timings;
use crate::error::CpmResult;
use crate::interner::TaskId;
use crate::models::TIME_EPSILON;
use crate::network::Network;
use crate::sorting::{sort_by_start, StartKey};

struct ChainWalk<'a, 'r> {
    network: &'a Network<'r>,
    timings: &'a Timings<'a>,
    limit: usize,
    chains: Vec<Vec<&'r str>>,
}

impl<'a, 'r> ChainWalk<'a, 'r> {
    fn linked(&self, pred: TaskId, succ: TaskId) -> bool {
        let p = self.timings.by_index(pred);
        let s = self.timings.by_index(succ);
        p.is_critical()
            && s.is_critical()
            && (p.earliest_finish - s.earliest_start).abs() < TIME_EPSILON
    }

    /// Critical successors linked to `task`, ordered by id.
    fn next(&self, task: TaskId) -> Vec<TaskId> {
        let mut next: Vec<TaskId> = self
            .network
            .task_successors(task)
            .iter()
            .copied()
            .filter(|&succ| self.linked(task, succ))
            .collect();
        self.order(&mut next);
        next
    }

    fn order(&self, tasks: &mut [TaskId]) {
        let index = self.network.index();
        sort_by_start(tasks, |&task| StartKey {
            earliest_start: self.timings.by_index(task).earliest_start,
            task_id: index.resolve(task).unwrap_or(""),
        });
    }

    fn walk(&mut self, task: TaskId, path: &mut Vec<TaskId>) {
        if self.chains.len() >= self.limit {
            return;
        }
        path.push(task);
        let next = self.next(task);
        if next.is_empty() {
            let network = self.network;
            let index = network.index();
            self.chains
                .push(path.iter().filter_map(|&t| index.resolve(t)).collect());
        } else {
            for succ in next {
                self.walk(succ, path);
            }
        }
        path.pop();
    }
}

/// Enumerate connected critical chains, at most `limit` of them.
///
/// Chains are produced depth-first from sources ordered by (start, id), so
/// the output is deterministic. The count can grow exponentially with
/// parallel critical branches, hence the limit.
///
/// # Errors
/// * `NetworkMismatch` if `timings` was computed on a different network
pub fn critical_chains<'r>(
    network: &Network<'r>,
    timings: &Timings<'_>,
    limit: usize,
) -> CpmResult<Vec<Vec<&'r str>>> {
    network.ensure_shape(timings.shape())?;

    let n = network.task_count() as TaskId;
    let mut walk = ChainWalk {
        network,
        timings,
        limit,
        chains: Vec::new(),
    };

    let mut sources: Vec<TaskId> = (0..n)
        .filter(|&task| timings.by_index(task).is_critical())
        .filter(|&task| {
            !network
                .task_predecessors(task)
                .iter()
                .any(|&pred| walk.linked(pred, task))
        })
        .collect();
    walk.order(&mut sources);

    let mut path = Vec::new();
    for source in sources {
        walk.walk(source, &mut path);
    }
    Ok(walk.chains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backward_pass::backward_pass;
    use crate::forward_pass::forward_pass;
    use crate::network::NetworkKind;
    use crate::registry::TaskRegistry;

    fn chains(registry: &TaskRegistry, kind: NetworkKind, limit: usize) -> Vec<Vec<String>> {
        let network = registry.build(kind).unwrap();
        let earliest = forward_pass(&network, 0).unwrap();
        let timings = backward_pass(&network, &earliest, 0).unwrap();
        let found = critical_chains(&network, &timings, limit).unwrap();
        for chain in &found {
            let total: f64 = chain
                .iter()
                .map(|id| registry.get(id).unwrap().duration)
                .sum();
            assert!((total - timings.makespan()).abs() < 1e-9, "{:?}", chain);
        }
        found
            .into_iter()
            .map(|c| c.into_iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_diamond_single_chain() {
        let mut registry = TaskRegistry::new();
        registry.add_task("A", 3.0, &[]).unwrap();
        registry.add_task("B", 2.0, &["A"]).unwrap();
        registry.add_task("C", 4.0, &["A"]).unwrap();
        registry.add_task("D", 1.0, &["B", "C"]).unwrap();
        for kind in [NetworkKind::OnNode, NetworkKind::OnArc] {
            assert_eq!(chains(&registry, kind, 64), vec![vec!["A", "C", "D"]]);
        }
    }

    #[test]
    fn test_branching_critical_chains() {
        // s -> {p, q} -> t with p and q equally long.
        let mut registry = TaskRegistry::new();
        registry.add_task("s", 1.0, &[]).unwrap();
        registry.add_task("q", 2.0, &["s"]).unwrap();
        registry.add_task("p", 2.0, &["s"]).unwrap();
        registry.add_task("t", 1.0, &["p", "q"]).unwrap();
        registry.add_task("u", 4.0, &[]).unwrap();
        let found = chains(&registry, NetworkKind::OnNode, 64);
        assert_eq!(
            found,
            vec![vec!["s", "p", "t"], vec!["s", "q", "t"], vec!["u"]]
        );
        assert_eq!(chains(&registry, NetworkKind::OnNode, 1).len(), 1);
    }

    #[test]
    fn test_critical_but_not_tight_link_is_split() {
        // p and s are both critical, but p finishes long before s can start.
        let mut registry = TaskRegistry::new();
        registry.add_task("p", 1.0, &[]).unwrap();
        registry.add_task("x", 4.0, &[]).unwrap();
        registry.add_task("r", 5.0, &["p"]).unwrap();
        registry.add_task("s", 2.0, &["p", "x"]).unwrap();
        let found = chains(&registry, NetworkKind::OnArc, 64);
        assert_eq!(found, vec![vec!["p", "r"], vec!["x", "s"]]);
    }

    #[test]
    fn test_timings_from_another_network_rejected() {
        let mut registry = TaskRegistry::new();
        registry.add_task("a", 1.0, &[]).unwrap();
        registry.add_task("b", 1.0, &["a"]).unwrap();
        let on_node = registry.build(NetworkKind::OnNode).unwrap();
        let on_arc = registry.build(NetworkKind::OnArc).unwrap();
        let earliest = forward_pass(&on_arc, 0).unwrap();
        let timings = backward_pass(&on_arc, &earliest, 0).unwrap();
        assert!(matches!(
            critical_chains(&on_node, &timings, 64),
            Err(crate::error::CpmError::NetworkMismatch { .. })
        ));
    }
}
