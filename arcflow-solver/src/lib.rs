//! # Arc-flow solver
//! The library side of the `arcflow-solver` binary. All functionality lives in
//! [`arcflow_core`], which is re-exported here as [`core`]:
//! ```rust
//! # use arcflow_solver::core::build_arc_flow_graph;
//! let graph = build_arc_flow_graph(&[5], &[vec![3]], &[5]).unwrap();
//!
//! // The item fits at most once.
//! assert_eq!(graph.enumerate_packings().len(), 2);
//! ```
//!
//! The binary reads an instance in the VBP format, builds the arc-flow graph of its bin and
//! optionally writes the graph to a (gzipped) text file. Run `arcflow-solver --help` for the
//! available options.
pub use arcflow_core as core;
