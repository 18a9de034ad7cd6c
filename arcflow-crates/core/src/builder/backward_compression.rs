use std::collections::BTreeSet;

use itertools::izip;

use super::item_catalogue::ItemCatalogue;
use super::state_space::DpStateId;
use super::state_space::StateSpace;
use super::IntermediateGraph;
use super::NodeTable;
use crate::arcflow_assert_moderate;
use crate::graph::Arc;
use crate::topological_sort;

/// Relabels every DP state, children before parents, with the most general usage that is
/// compatible with all of its continuations, and emits the nodes and arcs between these
/// labels.
///
/// A state without an "up" child inherits the bin itself, i.e. "anything that is left fits".
/// With a "right" child, the label is tightened to what still leaves room for one more copy of
/// the current type. Two states which end up with the same label admit the same completions as
/// far as the capacity is concerned, so they become the same node. The demands are not part of
/// the label.
///
/// The DP states are dropped when this pass returns.
pub(super) fn compress(state_space: StateSpace, catalogue: &ItemCatalogue) -> IntermediateGraph {
    let StateSpace { mut states } = state_space;

    // A state can only be relabelled once its children are.
    let precedences = states.iter_with_keys().flat_map(|(state_id, state)| {
        [state.up_child, state.right_child]
            .into_iter()
            .flatten()
            .map(move |child| (child, state_id))
    });
    let order = topological_sort(states.len(), precedences)
        .unwrap_or_else(|error| panic!("the DP states do not form a DAG: {error}"));

    let mut nodes = NodeTable::default();
    let mut arcs = BTreeSet::new();

    for state_id in order {
        let state = &states[state_id];
        let up_label: &[i32] = match state.up_child {
            Some(up_child) => &states[up_child].label,
            None => catalogue.bin_dimensions(),
        };
        arcflow_assert_moderate!(
            up_label.len() == catalogue.num_dimensions(),
            "the up child of {state_id} has not been relabelled"
        );

        let mut label: Box<[i32]> = up_label.into();

        if let Some(right_child) = state.right_child {
            let item = catalogue.item(state.item_cursor);
            let right_label: &[i32] = &states[right_child].label;

            for (value, &right_value, &usage) in
                izip!(label.iter_mut(), right_label.iter(), item.usage.iter())
            {
                *value = (*value).min(right_value - usage);
            }

            let node = nodes.get_or_create(&label);
            let right_node = nodes.get_or_create(right_label);
            let _ = arcs.insert(Arc::new(node, right_node, Some(item.original_index)));

            if *up_label != *label {
                // Stop adding copies of the current type here.
                let up_node = nodes.get_or_create(up_label);
                let _ = arcs.insert(Arc::new(node, up_node, None));
            }
        }

        arcflow_assert_moderate!(
            label
                .iter()
                .zip(state.used_dimensions.iter())
                .all(|(&label_value, &used)| label_value >= used),
            "the label of {state_id} does not admit its own usage"
        );

        states[state_id].label = label;
    }

    let source = nodes.get_or_create(&states[DpStateId::ROOT].label);
    let sink = nodes.get_or_create(catalogue.bin_dimensions());

    // Release all DP states before the next pass starts.
    drop(states);

    IntermediateGraph {
        nodes: nodes.into_nodes(),
        arcs,
        source,
        sink,
    }
}
