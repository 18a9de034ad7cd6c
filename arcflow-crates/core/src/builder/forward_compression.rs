use std::collections::BTreeSet;

use super::item_catalogue::ItemCatalogue;
use super::IntermediateGraph;
use super::NodeTable;
use crate::arcflow_assert_eq_simple;
use crate::arcflow_assert_moderate;
use crate::arcflow_assert_simple;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::graph::Arc;
use crate::graph::NodeId;
use crate::topological_sort;

/// Relabels every node with the largest usage, per dimension, with which it can be reached
/// from the source, and merges the nodes which end up with the same label.
///
/// The nodes are visited in topological order, so the new label of every predecessor is known
/// when a node is processed. The source is the only node without incoming arcs and receives
/// the all-zero usage; the sink keeps the bin as its label. New node ids are handed out in the
/// order of the sweep, which makes the source node 0 and the sink the last node.
///
/// Arcs which become a self-loop through the merge are dropped; only "no item" arcs can do so.
pub(super) fn compress(graph: IntermediateGraph, catalogue: &ItemCatalogue) -> IntermediateGraph {
    let IntermediateGraph {
        nodes,
        arcs,
        source,
        sink,
    } = graph;

    let arcs = arcs.into_iter().collect::<Vec<_>>();

    let mut incoming_arcs: KeyedVec<NodeId, Vec<usize>> = KeyedVec::filled(nodes.len(), vec![]);
    for (arc_index, arc) in arcs.iter().enumerate() {
        incoming_arcs[arc.destination].push(arc_index);
    }

    let order = topological_sort(
        nodes.len(),
        arcs.iter().map(|arc| (arc.source, arc.destination)),
    )
    .unwrap_or_else(|error| panic!("the backward compression produced a cycle: {error}"));

    arcflow_assert_eq_simple!(
        order.first(),
        Some(&source),
        "the source is not the first node in topological order"
    );
    arcflow_assert_eq_simple!(
        order.last(),
        Some(&sink),
        "the sink is not the last node in topological order"
    );

    let mut new_nodes = NodeTable::default();
    let mut new_labels: KeyedVec<NodeId, Box<[i32]>> =
        KeyedVec::filled(nodes.len(), Box::default());
    let mut node_remap: KeyedVec<NodeId, Option<NodeId>> = KeyedVec::filled(nodes.len(), None);

    for node in order {
        let label: Box<[i32]> = if node == sink {
            catalogue.bin_dimensions().into()
        } else {
            let mut label = vec![0; catalogue.num_dimensions()].into_boxed_slice();

            for &arc_index in &incoming_arcs[node] {
                let arc = &arcs[arc_index];
                let predecessor_label = &new_labels[arc.source];
                arcflow_assert_moderate!(
                    predecessor_label.len() == label.len(),
                    "predecessor {} of {node} has not been relabelled",
                    arc.source
                );

                match arc.item {
                    Some(item) => {
                        let usage = catalogue.usage_of_original(item);
                        for ((value, &predecessor_value), &item_value) in
                            label.iter_mut().zip(predecessor_label.iter()).zip(usage)
                        {
                            *value = (*value).max(predecessor_value + item_value);
                        }
                    }
                    None => {
                        for (value, &predecessor_value) in
                            label.iter_mut().zip(predecessor_label.iter())
                        {
                            *value = (*value).max(predecessor_value);
                        }
                    }
                }
            }

            label
        };

        // The actual usage never exceeds the most general usage of the backward pass.
        arcflow_assert_moderate!(
            label
                .iter()
                .zip(nodes[node].iter())
                .all(|(&forward, &backward)| forward <= backward),
            "forward label of {node} exceeds its backward label"
        );

        node_remap[node] = Some(new_nodes.get_or_create(&label));
        new_labels[node] = label;
    }

    let remap = |node: NodeId| -> NodeId {
        node_remap[node].unwrap_or_else(|| panic!("{node} was not visited by the forward pass"))
    };

    let mut new_arcs = BTreeSet::new();
    for arc in arcs {
        let source = remap(arc.source);
        let destination = remap(arc.destination);

        if source == destination {
            arcflow_assert_simple!(
                arc.item.is_none(),
                "an arc with item {:?} became a self-loop on {source}",
                arc.item
            );
            continue;
        }

        let _ = new_arcs.insert(Arc::new(source, destination, arc.item));
    }

    let source = remap(source);
    let sink = remap(sink);
    arcflow_assert_eq_simple!(source.index(), 0, "the source was not remapped to node 0");
    arcflow_assert_eq_simple!(
        sink.index(),
        new_nodes.len() - 1,
        "the sink was not remapped to the last node"
    );

    IntermediateGraph {
        nodes: new_nodes.into_nodes(),
        arcs: new_arcs,
        source,
        sink,
    }
}
