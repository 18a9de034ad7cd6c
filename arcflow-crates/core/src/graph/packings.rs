use std::collections::BTreeSet;

use super::ArcFlowGraph;
use super::NodeId;
use crate::containers::KeyedVec;
use crate::topological_sort;

/// The number of copies of every item type in a bin, indexed by the index of the item type in
/// the input of the builder.
pub type Packing = Vec<usize>;

impl ArcFlowGraph {
    /// Collects the distinct packings which can be read off the source-to-sink paths of the
    /// graph and which respect the demands.
    ///
    /// Nodes are shared between states with equal usage, so some paths pick an item type more
    /// often than its demand; those paths are skipped. The result is exactly the set of packings
    /// which respect both the capacity of the bin and the demands.
    ///
    /// Every path is considered, so the running time is exponential in the worst case. This is
    /// meant for inspecting small graphs and for testing.
    pub fn enumerate_packings(&self) -> BTreeSet<Packing> {
        let order = topological_sort(
            self.num_nodes(),
            self.arcs().iter().map(|arc| (arc.source, arc.destination)),
        )
        .unwrap_or_else(|error| panic!("an arc-flow graph is acyclic: {error}"));

        let mut completions: KeyedVec<NodeId, BTreeSet<Packing>> =
            KeyedVec::filled(self.num_nodes(), BTreeSet::new());
        let _ = completions[self.sink()].insert(vec![0; self.num_item_types()]);

        for &node in order.iter().rev() {
            if node == self.sink() {
                continue;
            }

            let mut packings = BTreeSet::new();
            for arc in self.outgoing_arcs(node) {
                for completion in completions[arc.destination].iter() {
                    let mut packing = completion.clone();
                    if let Some(item) = arc.item {
                        // Counts only grow towards the source, so an exceeded demand stays so.
                        if packing[item] == self.demand_by_type()[item] {
                            continue;
                        }
                        packing[item] += 1;
                    }
                    let _ = packings.insert(packing);
                }
            }
            completions[node] = packings;
        }

        std::mem::take(&mut completions[self.source()])
    }
}
