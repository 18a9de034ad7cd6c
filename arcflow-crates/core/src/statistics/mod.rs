//! Contains structures related to the statistic logging of a graph build.
//!
//! The builder itself never writes statistics; it fills a [`BuildStatistics`] which is returned
//! as part of the [`ArcFlowGraph`]. A front end which wants the statistics printed configures
//! the output once through [`configure_statistic_logging`] and then calls [`Statistic::log`].
mod statistic_logger;
mod statistic_logging;

use std::fmt::Display;

pub use statistic_logger::StatisticLogger;
pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::log_statistic;
pub use statistic_logging::log_statistic_postfix;
pub use statistic_logging::should_log_statistics;

#[cfg(doc)]
use crate::ArcFlowGraph;

/// A simple trait for defining a loggable statistic.
///
/// See [`create_statistics_struct!`] for creating a statistic struct automatically!
pub trait Statistic {
    /// Logs the [`Statistic`] using the provided [`StatisticLogger`].
    fn log(&self, statistic_logger: StatisticLogger);
}

impl<Value: Display> Statistic for Value {
    fn log(&self, statistic_logger: StatisticLogger) {
        statistic_logger.log_statistic(self);
    }
}

/// A macro for generating a struct for storing statistics.
///
/// # Example
/// ```rust
/// # use arcflow_core::create_statistics_struct;
/// create_statistics_struct!(Statistics {
///     number_of_calls: usize
/// });
///
/// let statistics = Statistics::default();
///
/// assert_eq!(statistics.number_of_calls, 0);
/// ```
#[macro_export]
macro_rules! create_statistics_struct {
    ($(#[$struct_documentation:meta])* $name:ident { $($(#[$variable_documentation:meta])* $field:ident : $type:ident),+ $(,)? }) => {
        $(#[$struct_documentation])*
        #[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
        pub struct $name {
            $($(#[$variable_documentation])* pub $field: $type),+
        }

        impl $crate::statistics::Statistic for $name {
            fn log(&self, statistic_logger: $crate::statistics::StatisticLogger) {
                $($crate::statistics::Statistic::log(
                    &self.$field,
                    statistic_logger.attach_to_prefix(stringify!($field)),
                );)+
            }
        }
    };
}

create_statistics_struct!(
    /// The sizes of the intermediate and final results of one graph build.
    BuildStatistics {
        /// The number of DP states created by the state-space explorer.
        num_dp_states: usize,
        /// The number of nodes after the backward compression pass.
        num_nodes_after_backward_pass: usize,
        /// The number of arcs after the backward compression pass.
        num_arcs_after_backward_pass: usize,
        /// The number of nodes in the final graph.
        num_nodes: usize,
        /// The number of arcs in the final graph, including the arcs to the sink.
        num_arcs: usize,
    }
);
