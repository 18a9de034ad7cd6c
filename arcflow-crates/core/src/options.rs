//! Configuration of the [`ArcFlowBuilder`](crate::ArcFlowBuilder).

/// The order in which the item types are considered by the state-space explorer.
///
/// The ordering only influences how many DP states are explored; the set of packings encoded
/// by the resulting graph is the same for every ordering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ItemOrdering {
    /// Sorts the types by decreasing `sum_d usage[d] / capacity[d]`, keeping the input order
    /// for ties. Placing large items first tends to keep the state space small.
    #[default]
    DecreasingRelativeSize,
    /// Keeps the types in the order in which they were given.
    InputOrder,
}

/// Options which influence how the arc-flow graph is built.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArcFlowOptions {
    pub item_ordering: ItemOrdering,
}
