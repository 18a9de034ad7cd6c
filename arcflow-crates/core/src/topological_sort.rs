//! A stable topological sort over a dense index space.
//!
//! Both compression passes rely on this ordering being fully deterministic, so ties between
//! nodes that are ready at the same time are always broken by the smallest index first.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::arcflow_assert_simple;
use crate::containers::StorageKey;

/// Error returned by [`topological_sort`] when the precedences do not form a DAG.
#[derive(Clone, Copy, Debug, thiserror::Error, PartialEq, Eq)]
#[error("the precedences contain a cycle, {num_unordered} nodes could not be ordered")]
pub struct CyclicPrecedence {
    num_unordered: usize,
}

impl CyclicPrecedence {
    /// The number of nodes which are on, or only reachable through, a cycle.
    pub fn num_unordered(&self) -> usize {
        self.num_unordered
    }
}

/// Orders the nodes `0..num_nodes` such that for every `(predecessor, successor)` pair in
/// `precedences` the predecessor comes first.
///
/// Among the nodes whose predecessors have all been placed, the one with the smallest index is
/// placed next (Kahn's algorithm with a min-heap), so repeated runs on the same precedences
/// produce identical orderings. Duplicate precedences are allowed.
///
/// # Example
/// ```
/// # use arcflow_core::topological_sort;
/// let order = topological_sort::<usize>(4, [(3, 1), (2, 0)]).unwrap();
/// assert_eq!(order, vec![2, 0, 3, 1]);
/// ```
pub fn topological_sort<Key: StorageKey>(
    num_nodes: usize,
    precedences: impl IntoIterator<Item = (Key, Key)>,
) -> Result<Vec<Key>, CyclicPrecedence> {
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); num_nodes];
    let mut num_pending_predecessors = vec![0_usize; num_nodes];

    for (predecessor, successor) in precedences {
        let (predecessor, successor) = (predecessor.index(), successor.index());
        arcflow_assert_simple!(
            predecessor < num_nodes && successor < num_nodes,
            "precedence ({predecessor}, {successor}) is outside of the {num_nodes} nodes"
        );

        successors[predecessor].push(successor);
        num_pending_predecessors[successor] += 1;
    }

    let mut ready = num_pending_predecessors
        .iter()
        .enumerate()
        .filter(|&(_, &num_pending)| num_pending == 0)
        .map(|(node, _)| Reverse(node))
        .collect::<BinaryHeap<_>>();

    let mut order = Vec::with_capacity(num_nodes);
    while let Some(Reverse(node)) = ready.pop() {
        order.push(Key::create_from_index(node));

        for &successor in &successors[node] {
            num_pending_predecessors[successor] -= 1;
            if num_pending_predecessors[successor] == 0 {
                ready.push(Reverse(successor));
            }
        }
    }

    if order.len() < num_nodes {
        return Err(CyclicPrecedence {
            num_unordered: num_nodes - order.len(),
        });
    }

    Ok(order)
}
