//! The arc-flow graph produced by the [`ArcFlowBuilder`](crate::ArcFlowBuilder).
mod packings;
mod validation;

use std::collections::BTreeSet;

pub use packings::Packing;
pub use validation::MalformedGraph;

use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::statistics::BuildStatistics;

/// An identifier of a node in an [`ArcFlowGraph`].
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl StorageKey for NodeId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("the number of nodes exceeds u32::MAX"))
    }
}

/// A directed arc of the graph.
///
/// Following an arc labelled with an item adds one copy of that item to the bin; following an
/// arc without an item leaves the content unchanged. Arcs are ordered by source, then
/// destination, then item, where "no item" comes before every item.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Arc {
    pub source: NodeId,
    pub destination: NodeId,
    /// The index of the item type in the input of the builder, if any.
    pub item: Option<usize>,
}

impl Arc {
    pub fn new(source: NodeId, destination: NodeId, item: Option<usize>) -> Self {
        Arc {
            source,
            destination,
            item,
        }
    }
}

/// A directed acyclic graph whose source-to-sink paths describe the ways of filling one bin.
///
/// Every path respects the capacity of the bin, and every packing which respects both the
/// capacity and the demands has a path. Nodes are merged by usage alone, so a path may use an
/// item type more often than its demand allows; such paths are left to the model which bounds
/// the flow per item type, and are skipped by [`ArcFlowGraph::enumerate_packings`].
///
/// Node 0 is the source (the empty bin) and the last node is the sink (the closed bin). Every
/// node stores a usage vector which is only meaningful for diagnostics: it is the largest usage
/// with which the node can be reached. The arcs are sorted and contain no duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcFlowGraph {
    nodes: KeyedVec<NodeId, Box<[i32]>>,
    arcs: Vec<Arc>,
    /// The demand of every item type after clamping to the copies that fit in an empty bin.
    demand_by_type: Box<[usize]>,
    statistics: BuildStatistics,
}

impl ArcFlowGraph {
    /// Adds an arc without item from every interior node to the sink, and packages the result.
    pub(crate) fn assemble(
        nodes: KeyedVec<NodeId, Box<[i32]>>,
        mut arcs: BTreeSet<Arc>,
        demand_by_type: Box<[usize]>,
        statistics: BuildStatistics,
    ) -> ArcFlowGraph {
        let sink = NodeId::create_from_index(nodes.len() - 1);

        for node in nodes.keys().skip(1).filter(|&node| node != sink) {
            let _ = arcs.insert(Arc::new(node, sink, None));
        }

        let statistics = BuildStatistics {
            num_nodes: nodes.len(),
            num_arcs: arcs.len(),
            ..statistics
        };

        ArcFlowGraph {
            nodes,
            arcs: arcs.into_iter().collect(),
            demand_by_type,
            statistics,
        }
    }

    /// The node representing the empty bin.
    pub fn source(&self) -> NodeId {
        NodeId(0)
    }

    /// The node representing the closed bin. Equal to the source if no item fits in the bin.
    pub fn sink(&self) -> NodeId {
        NodeId::create_from_index(self.nodes.len() - 1)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes with their usage vectors, in ascending order of id.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &[i32])> + '_ {
        self.nodes
            .iter_with_keys()
            .map(|(node, usage)| (node, usage.as_ref()))
    }

    pub fn node_usage(&self, node: NodeId) -> &[i32] {
        &self.nodes[node]
    }

    /// All arcs, sorted by source, destination and item.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// The arcs leaving `node`.
    pub fn outgoing_arcs(&self, node: NodeId) -> &[Arc] {
        let start = self.arcs.partition_point(|arc| arc.source < node);
        let end = self.arcs.partition_point(|arc| arc.source <= node);
        &self.arcs[start..end]
    }

    /// The number of item types the graph was built for, including types which appear on no
    /// arc.
    pub fn num_item_types(&self) -> usize {
        self.demand_by_type.len()
    }

    /// The maximum number of copies of every item type in one bin, indexed like the input.
    ///
    /// This is the given demand, lowered to the number of copies which fit in an empty bin.
    pub fn demand_by_type(&self) -> &[usize] {
        &self.demand_by_type
    }

    /// The number of DP states which were explored before compression; at least 1.
    pub fn num_dp_states(&self) -> usize {
        self.statistics.num_dp_states
    }

    pub fn statistics(&self) -> &BuildStatistics {
        &self.statistics
    }
}
