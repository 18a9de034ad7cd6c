#![cfg(test)]
//! Checks that the source-to-sink paths of built graphs stay within the bin, cover every packing
//! which respects the demands, and that the enumerated packings are exactly those packings.

use std::collections::BTreeSet;

use arcflow_core::build_arc_flow_graph;
use arcflow_core::ArcFlowBuilder;
use arcflow_core::ArcFlowGraph;
use arcflow_core::ArcFlowOptions;
use arcflow_core::InvalidInstance;
use arcflow_core::ItemOrdering;
use arcflow_core::NodeId;
use arcflow_core::Packing;
use proptest::prelude::*;

fn fits_in_bin(
    bin_dimensions: &[i32],
    item_dimensions_by_type: &[Vec<i32>],
    counts: &[usize],
) -> bool {
    (0..bin_dimensions.len()).all(|dimension| {
        let used: i32 = counts
            .iter()
            .zip(item_dimensions_by_type)
            .map(|(&count, usage)| count as i32 * usage[dimension])
            .sum();
        used <= bin_dimensions[dimension]
    })
}

fn respects_demands(demand_by_type: &[i32], counts: &[usize]) -> bool {
    counts
        .iter()
        .zip(demand_by_type)
        .all(|(&count, &demand)| count as i32 <= demand)
}

/// Every count vector which respects the demands and fits in the bin, by plain enumeration.
fn brute_force_packings(
    bin_dimensions: &[i32],
    item_dimensions_by_type: &[Vec<i32>],
    demand_by_type: &[i32],
) -> BTreeSet<Packing> {
    let mut packings = BTreeSet::new();
    let mut counts = vec![0usize; demand_by_type.len()];

    loop {
        if fits_in_bin(bin_dimensions, item_dimensions_by_type, &counts) {
            let _ = packings.insert(counts.clone());
        }

        // Advance the counts like an odometer.
        let mut position = 0;
        loop {
            if position == counts.len() {
                return packings;
            }
            if counts[position] < demand_by_type[position] as usize {
                counts[position] += 1;
                break;
            }
            counts[position] = 0;
            position += 1;
        }
    }
}

/// Collects the packings by walking every path from `node`, without any memoisation.
fn walk_paths(
    graph: &ArcFlowGraph,
    node: NodeId,
    packing: &mut Packing,
    found: &mut BTreeSet<Packing>,
) {
    if node == graph.sink() {
        let _ = found.insert(packing.clone());
        return;
    }

    for arc in graph.outgoing_arcs(node) {
        if let Some(item) = arc.item {
            packing[item] += 1;
        }
        walk_paths(graph, arc.destination, packing, found);
        if let Some(item) = arc.item {
            packing[item] -= 1;
        }
    }
}

/// The packings of all paths, including those which use a type more often than its demand.
fn path_packings(graph: &ArcFlowGraph) -> BTreeSet<Packing> {
    let mut found = BTreeSet::new();
    let mut packing = vec![0; graph.num_item_types()];
    walk_paths(graph, graph.source(), &mut packing, &mut found);
    found
}

/// Checks the paths and the enumerated packings of the graph against brute force.
///
/// Every path fits in the bin, every feasible packing has a path, the paths which respect the
/// demands are exactly the feasible packings, and so are the enumerated packings.
fn check_against_brute_force(
    bin_dimensions: &[i32],
    item_dimensions_by_type: &[Vec<i32>],
    demand_by_type: &[i32],
) -> Result<(), TestCaseError> {
    let graph = build_arc_flow_graph(bin_dimensions, item_dimensions_by_type, demand_by_type)
        .expect("valid instance");
    let expected = brute_force_packings(bin_dimensions, item_dimensions_by_type, demand_by_type);
    let paths = path_packings(&graph);

    for packing in paths.iter() {
        prop_assert!(
            fits_in_bin(bin_dimensions, item_dimensions_by_type, packing),
            "the path {packing:?} overflows the bin"
        );
    }
    prop_assert!(expected.is_subset(&paths));

    let within_demand = paths
        .into_iter()
        .filter(|packing| respects_demands(demand_by_type, packing))
        .collect::<BTreeSet<_>>();
    prop_assert_eq!(&within_demand, &expected);
    prop_assert_eq!(&graph.enumerate_packings(), &expected);

    Ok(())
}

#[test]
fn single_type_fits_three_times() {
    let graph = build_arc_flow_graph(&[10], &[vec![3]], &[3]).unwrap();

    let counts = path_packings(&graph)
        .into_iter()
        .map(|packing| packing[0])
        .collect::<Vec<_>>();
    assert_eq!(counts, vec![0, 1, 2, 3]);
}

#[test]
fn capacity_is_tighter_than_demand() {
    let graph = build_arc_flow_graph(&[5], &[vec![3]], &[5]).unwrap();

    let counts = path_packings(&graph)
        .into_iter()
        .map(|packing| packing[0])
        .collect::<Vec<_>>();
    assert_eq!(counts, vec![0, 1]);
}

#[test]
fn type_without_demand_contributes_nothing() {
    let with_type = build_arc_flow_graph(&[9], &[vec![2], vec![3], vec![4]], &[2, 0, 1]).unwrap();
    let without_type = build_arc_flow_graph(&[9], &[vec![2], vec![4]], &[2, 1]).unwrap();

    assert!(with_type.arcs().iter().all(|arc| arc.item != Some(1)));

    let projected = with_type
        .enumerate_packings()
        .into_iter()
        .map(|packing| {
            assert_eq!(packing[1], 0);
            vec![packing[0], packing[2]]
        })
        .collect::<BTreeSet<_>>();
    assert_eq!(projected, without_type.enumerate_packings());
}

#[test]
fn independent_dimensions_multiply() {
    let graph = build_arc_flow_graph(&[6, 4], &[vec![2, 0], vec![0, 1]], &[9, 9]).unwrap();

    let packings = graph.enumerate_packings();
    assert_eq!(packings.len(), 4 * 5);
    for first in 0..=3 {
        for second in 0..=4 {
            assert!(packings.contains(&vec![first, second]));
        }
    }
}

#[test]
fn non_positive_capacity_is_rejected() {
    assert_eq!(
        build_arc_flow_graph(&[4, -1], &[vec![1, 1]], &[1]),
        Err(InvalidInstance::NonPositiveCapacity {
            dimension: 1,
            capacity: -1
        })
    );
}

#[test]
fn mixed_instances_match_brute_force() -> Result<(), TestCaseError> {
    check_against_brute_force(
        &[10, 8],
        &[vec![3, 2], vec![2, 5], vec![4, 1], vec![1, 1]],
        &[3, 1, 2, 4],
    )?;
    check_against_brute_force(&[7], &[vec![7], vec![8], vec![1]], &[1, 3, 7])?;
    check_against_brute_force(
        &[5, 5, 5],
        &[vec![1, 2, 3], vec![3, 2, 1], vec![2, 2, 2]],
        &[2, 2, 2],
    )
}

#[test]
fn equal_types_share_nodes_but_not_demands() -> Result<(), TestCaseError> {
    let graph = build_arc_flow_graph(&[6], &[vec![1], vec![1], vec![5]], &[1, 1, 1]).unwrap();

    // After one small item the two small types lead to the same node.
    assert!(path_packings(&graph).contains(&vec![2, 0, 0]));
    assert!(!graph.enumerate_packings().contains(&vec![2, 0, 0]));

    check_against_brute_force(&[6], &[vec![1], vec![1], vec![5]], &[1, 1, 1])?;
    check_against_brute_force(&[5], &[vec![1], vec![1], vec![2]], &[2, 2, 1])
}

#[test]
fn every_node_reaches_the_sink() {
    let graph = build_arc_flow_graph(&[12, 9], &[vec![5, 2], vec![3, 3], vec![2, 4]], &[2, 3, 2])
        .unwrap();

    assert_eq!(graph.validate(), Ok(()));
    assert!(graph.num_dp_states() >= 1);
}

/// An instance with between zero and four item types, none of which has an all-zero usage.
fn instance() -> impl Strategy<Value = (Vec<i32>, Vec<Vec<i32>>, Vec<i32>)> {
    (1usize..=3).prop_flat_map(|num_dimensions| {
        (
            prop::collection::vec(1i32..=12, num_dimensions),
            prop::collection::vec(
                (prop::collection::vec(0i32..=8, num_dimensions), 0i32..=4),
                0..=4,
            ),
        )
            .prop_map(|(bin_dimensions, item_types)| {
                let (mut item_dimensions_by_type, demand_by_type): (Vec<_>, Vec<_>) =
                    item_types.into_iter().unzip();
                for usage in item_dimensions_by_type.iter_mut() {
                    if usage.iter().all(|&value| value == 0) {
                        usage[0] = 1;
                    }
                }
                (bin_dimensions, item_dimensions_by_type, demand_by_type)
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn paths_cover_exactly_the_feasible_packings((bin, items, demands) in instance()) {
        check_against_brute_force(&bin, &items, &demands)?;
    }

    #[test]
    fn builds_are_reproducible((bin, items, demands) in instance()) {
        let first = build_arc_flow_graph(&bin, &items, &demands).unwrap();
        let second = build_arc_flow_graph(&bin, &items, &demands).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn built_graphs_are_well_formed((bin, items, demands) in instance()) {
        let graph = build_arc_flow_graph(&bin, &items, &demands).unwrap();

        prop_assert_eq!(graph.validate(), Ok(()));
        prop_assert_eq!(graph.num_item_types(), items.len());
        for arc in graph.arcs() {
            if let Some(item) = arc.item {
                prop_assert!(demands[item] > 0);
            }
        }
    }

    #[test]
    fn item_ordering_preserves_the_packings((bin, items, demands) in instance()) {
        let build = |item_ordering| {
            ArcFlowBuilder::new(&bin, &items, &demands)
                .unwrap()
                .with_options(ArcFlowOptions { item_ordering })
                .build()
        };

        prop_assert_eq!(
            build(ItemOrdering::DecreasingRelativeSize).enumerate_packings(),
            build(ItemOrdering::InputOrder).enumerate_packings()
        );
    }
}
