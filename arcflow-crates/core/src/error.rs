/// The ways in which the input of [`build_arc_flow_graph`](crate::build_arc_flow_graph) can
/// violate its contract.
///
/// These are detected before a single DP state is created; no partial graph is ever produced.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidInstance {
    #[error("the bin has no dimensions")]
    NoDimensions,

    #[error("dimension {dimension} of the bin has non-positive capacity {capacity}")]
    NonPositiveCapacity { dimension: usize, capacity: i32 },

    #[error("received {num_item_types} item types but {num_demands} demands")]
    DemandCountMismatch {
        num_item_types: usize,
        num_demands: usize,
    },

    #[error("item type {item} has {actual} dimensions, but the bin has {expected}")]
    DimensionMismatch {
        item: usize,
        expected: usize,
        actual: usize,
    },

    #[error("item type {item} has negative usage {usage} in dimension {dimension}")]
    NegativeUsage {
        item: usize,
        dimension: usize,
        usage: i32,
    },

    #[error("item type {item} has negative demand {demand}")]
    NegativeDemand { item: usize, demand: i32 },

    /// A type which uses no capacity cannot be distinguished from "no item" by a usage vector.
    #[error("item type {item} uses no capacity in any dimension but has demand {demand}")]
    ZeroUsage { item: usize, demand: i32 },
}
