//! Compiles a bin and its item types into an [`ArcFlowGraph`].
//!
//! The construction happens in three passes which only hand their result forward:
//! 1. the state-space explorer enumerates all DP states of "which types are decided, how many
//!    copies of the current type are used, and how much capacity is used";
//! 2. the backward compression pass relabels every DP state to the most general usage which
//!    admits the same continuations capacity-wise, and emits one node per distinct label;
//! 3. the forward compression pass relabels every node to the largest usage with which it can
//!    actually be reached, merging nodes once more.
//!
//! Finally every interior node receives an arc to the sink, since a bin may be closed at any
//! moment.
mod backward_compression;
mod forward_compression;
pub(crate) mod item_catalogue;
pub(crate) mod state_space;

use std::collections::BTreeSet;

use log::debug;

use self::item_catalogue::ItemCatalogue;
use self::state_space::StateSpace;
use crate::arcflow_assert_advanced;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::error::InvalidInstance;
use crate::graph::Arc;
use crate::graph::ArcFlowGraph;
use crate::graph::NodeId;
use crate::options::ArcFlowOptions;
use crate::statistics::BuildStatistics;

/// Builds the arc-flow graph of a single bin with the default [`ArcFlowOptions`].
///
/// - `bin_dimensions` contains the capacity of the bin in every dimension, all of which should
///   be positive.
/// - `item_dimensions_by_type` contains for every item type its non-negative usage in every
///   dimension. A type which does not fit in an empty bin is accepted; it simply does not
///   appear on any arc.
/// - `demand_by_type` contains for every item type the maximum number of copies that may be
///   packed.
///
/// Every source-to-sink path of the resulting graph fits in the bin, and every multiset of items
/// which fits in the bin and respects the demands has a path. Nodes are merged by usage only, so
/// some paths exceed a demand; [`ArcFlowGraph::enumerate_packings`] skips those.
///
/// # Example
/// ```
/// # use arcflow_core::build_arc_flow_graph;
/// let graph = build_arc_flow_graph(&[10], &[vec![3]], &[3]).unwrap();
///
/// // Zero to three copies of the item fit in the bin.
/// assert_eq!(graph.enumerate_packings().len(), 4);
/// ```
pub fn build_arc_flow_graph(
    bin_dimensions: &[i32],
    item_dimensions_by_type: &[Vec<i32>],
    demand_by_type: &[i32],
) -> Result<ArcFlowGraph, InvalidInstance> {
    Ok(ArcFlowBuilder::new(bin_dimensions, item_dimensions_by_type, demand_by_type)?.build())
}

/// A validated instance which can be turned into an [`ArcFlowGraph`].
///
/// Creating the builder performs all input validation; [`ArcFlowBuilder::build`] cannot fail
/// on a builder that was successfully created.
#[derive(Debug)]
pub struct ArcFlowBuilder {
    catalogue: ItemCatalogue,
    options: ArcFlowOptions,
}

impl ArcFlowBuilder {
    /// Validates the instance; see [`build_arc_flow_graph`] for the meaning of the arguments.
    pub fn new(
        bin_dimensions: &[i32],
        item_dimensions_by_type: &[Vec<i32>],
        demand_by_type: &[i32],
    ) -> Result<ArcFlowBuilder, InvalidInstance> {
        let catalogue =
            ItemCatalogue::new(bin_dimensions, item_dimensions_by_type, demand_by_type)?;

        Ok(ArcFlowBuilder {
            catalogue,
            options: ArcFlowOptions::default(),
        })
    }

    pub fn with_options(mut self, options: ArcFlowOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs all construction passes and returns the compressed graph.
    pub fn build(self) -> ArcFlowGraph {
        let ArcFlowBuilder {
            mut catalogue,
            options,
        } = self;
        catalogue.sort(options.item_ordering);

        let state_space = StateSpace::explore(&catalogue);
        let num_dp_states = state_space.len();
        debug!("Explored {num_dp_states} DP states");

        // The state space is consumed here, the DP states do not outlive the backward pass.
        let graph = backward_compression::compress(state_space, &catalogue);
        let num_nodes_after_backward_pass = graph.nodes.len();
        let num_arcs_after_backward_pass = graph.arcs.len();
        debug!(
            "Backward compression produced {num_nodes_after_backward_pass} nodes and \
             {num_arcs_after_backward_pass} arcs"
        );

        let graph = forward_compression::compress(graph, &catalogue);
        debug!(
            "Forward compression reduced the graph to {} nodes and {} arcs",
            graph.nodes.len(),
            graph.arcs.len()
        );

        let graph = ArcFlowGraph::assemble(
            graph.nodes,
            graph.arcs,
            catalogue.demands_by_original(),
            BuildStatistics {
                num_dp_states,
                num_nodes_after_backward_pass,
                num_arcs_after_backward_pass,
                ..Default::default()
            },
        );

        arcflow_assert_advanced!(
            graph.validate().is_ok(),
            "the built graph is malformed: {:?}",
            graph.validate()
        );

        graph
    }
}

/// The nodes and arcs which are handed from one compression pass to the next.
#[derive(Debug)]
pub(crate) struct IntermediateGraph {
    pub(crate) nodes: KeyedVec<NodeId, Box<[i32]>>,
    pub(crate) arcs: BTreeSet<Arc>,
    pub(crate) source: NodeId,
    pub(crate) sink: NodeId,
}

/// Assigns a [`NodeId`] to every distinct usage vector, in order of first appearance.
#[derive(Debug, Default)]
pub(crate) struct NodeTable {
    nodes: KeyedVec<NodeId, Box<[i32]>>,
    node_indices: HashMap<Box<[i32]>, NodeId>,
}

impl NodeTable {
    pub(crate) fn get_or_create(&mut self, usage: &[i32]) -> NodeId {
        if let Some(&node) = self.node_indices.get(usage) {
            return node;
        }

        let node = self.nodes.push(usage.into());
        let _ = self.node_indices.insert(usage.into(), node);
        node
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Drops the lookup table and returns the usage vector of every node.
    pub(crate) fn into_nodes(self) -> KeyedVec<NodeId, Box<[i32]>> {
        self.nodes
    }
}
