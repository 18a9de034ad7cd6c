use thiserror::Error;

use super::Arc;
use super::ArcFlowGraph;
use super::NodeId;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// The first structural defect found by [`ArcFlowGraph::validate`].
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum MalformedGraph {
    #[error("{arc:?} refers to a node outside of the graph")]
    NodeOutOfBounds { arc: Arc },
    #[error("{arc:?} carries an item type which does not exist")]
    ItemOutOfBounds { arc: Arc },
    #[error("{previous:?} and {next:?} are not strictly sorted")]
    UnsortedArcs { previous: Arc, next: Arc },
    #[error("{arc:?} is a self-loop")]
    SelfLoop { arc: Arc },
    #[error("the source has an incoming arc {arc:?}")]
    SourceHasIncomingArc { arc: Arc },
    #[error("the sink has an outgoing arc {arc:?}")]
    SinkHasOutgoingArc { arc: Arc },
    #[error("the arcs contain a cycle")]
    Cyclic,
    #[error("{0} cannot reach the sink")]
    DeadEnd(NodeId),
    #[error("{0} has no direct arc without item to the sink")]
    MissingSinkArc(NodeId),
}

impl ArcFlowGraph {
    /// Checks the structural properties of a graph produced by the builder.
    pub fn validate(&self) -> Result<(), MalformedGraph> {
        let source = self.source();
        let sink = self.sink();

        for &arc in self.arcs() {
            if arc.source.index() >= self.num_nodes() || arc.destination.index() >= self.num_nodes()
            {
                return Err(MalformedGraph::NodeOutOfBounds { arc });
            }
            if arc.item.is_some_and(|item| item >= self.num_item_types()) {
                return Err(MalformedGraph::ItemOutOfBounds { arc });
            }
            if arc.source == arc.destination {
                return Err(MalformedGraph::SelfLoop { arc });
            }
            if arc.destination == source {
                return Err(MalformedGraph::SourceHasIncomingArc { arc });
            }
            if arc.source == sink {
                return Err(MalformedGraph::SinkHasOutgoingArc { arc });
            }
        }

        if let Some((&previous, &next)) = self
            .arcs()
            .iter()
            .zip(self.arcs().iter().skip(1))
            .find(|(previous, next)| previous >= next)
        {
            return Err(MalformedGraph::UnsortedArcs { previous, next });
        }

        let order = crate::topological_sort(
            self.num_nodes(),
            self.arcs().iter().map(|arc| (arc.source, arc.destination)),
        )
        .map_err(|_| MalformedGraph::Cyclic)?;

        let mut reaches_sink: KeyedVec<NodeId, bool> = KeyedVec::filled(self.num_nodes(), false);
        reaches_sink[sink] = true;
        for &node in order.iter().rev() {
            if self
                .outgoing_arcs(node)
                .iter()
                .any(|arc| reaches_sink[arc.destination])
            {
                reaches_sink[node] = true;
            }
        }

        if let Some(node) = reaches_sink
            .iter_with_keys()
            .find(|&(_, &reaches)| !reaches)
            .map(|(node, _)| node)
        {
            return Err(MalformedGraph::DeadEnd(node));
        }

        if let Some(node) = self
            .nodes()
            .map(|(node, _)| node)
            .filter(|&node| node != source && node != sink)
            .find(|&node| {
                self.outgoing_arcs(node)
                    .binary_search(&Arc::new(node, sink, None))
                    .is_err()
            })
        {
            return Err(MalformedGraph::MissingSinkArc(node));
        }

        Ok(())
    }
}
