//! # Arc-flow graphs for vector bin packing
//! Compiles a single bin with capacities in several dimensions, together with a set of item
//! types with demands, into a compact directed acyclic graph: the arc-flow graph. Every path
//! from the source to the sink of the graph spells out a way of filling the bin within its
//! capacity, and every filling which also respects the demands has at least one such path.
//! Nodes are shared by usage only, so a path may use a type more often than its demand; the
//! arc-flow formulation of (vector) bin packing and cutting-stock problems, which takes the
//! graph as input, bounds the flow of every type separately.
//!
//! # Building a graph
//! The simplest entry point is [`build_arc_flow_graph`]:
//! ```rust
//! # use arcflow_core::build_arc_flow_graph;
//! // A bin of 10 by 6, and two item types.
//! let graph = build_arc_flow_graph(&[10, 6], &[vec![4, 2], vec![3, 3]], &[2, 2]).unwrap();
//!
//! // The packings are indexed by the position of the item type in the input.
//! let packings = graph.enumerate_packings();
//! assert!(packings.contains(&vec![1, 1]));
//! assert!(packings.contains(&vec![2, 0]));
//! assert!(!packings.contains(&vec![0, 3]));
//! ```
//!
//! The [`ArcFlowBuilder`] accepts [`ArcFlowOptions`] which influence the shape of the graph,
//! but never the set of packings it represents:
//! ```rust
//! # use arcflow_core::ArcFlowBuilder;
//! # use arcflow_core::ArcFlowOptions;
//! # use arcflow_core::ItemOrdering;
//! let graph = ArcFlowBuilder::new(&[10], &[vec![3], vec![4]], &[3, 2])
//!     .unwrap()
//!     .with_options(ArcFlowOptions {
//!         item_ordering: ItemOrdering::InputOrder,
//!     })
//!     .build();
//!
//! assert_eq!(graph.source().to_string(), "NodeId(0)");
//! assert!(graph.validate().is_ok());
//! ```
//!
//! Invalid instances are reported before any work is done:
//! ```rust
//! # use arcflow_core::build_arc_flow_graph;
//! # use arcflow_core::InvalidInstance;
//! let result = build_arc_flow_graph(&[0], &[vec![1]], &[1]);
//!
//! assert_eq!(
//!     result,
//!     Err(InvalidInstance::NonPositiveCapacity {
//!         dimension: 0,
//!         capacity: 0
//!     })
//! );
//! ```
pub(crate) mod arcflow_asserts;
mod builder;
pub mod containers;
mod error;
pub mod graph;
mod options;
pub mod statistics;
mod topological_sort;

pub use convert_case;

pub use crate::builder::build_arc_flow_graph;
pub use crate::builder::ArcFlowBuilder;
pub use crate::error::InvalidInstance;
pub use crate::graph::Arc;
pub use crate::graph::ArcFlowGraph;
pub use crate::graph::MalformedGraph;
pub use crate::graph::NodeId;
pub use crate::graph::Packing;
pub use crate::options::ArcFlowOptions;
pub use crate::options::ItemOrdering;
pub use crate::statistics::BuildStatistics;
pub use crate::topological_sort::topological_sort;
pub use crate::topological_sort::CyclicPrecedence;
