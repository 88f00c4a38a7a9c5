//! Error types for fleet setup and package assignment.

use thiserror::Error;

use super::CourierClass;
use crate::{CourierId, GraphError};

/// Invalid fleet or courier parameters. Nothing is created when returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A class was configured without couriers.
    #[error("all courier counts need to be at least 1 ({class} has none)")]
    NoCouriers {
        /// Class with the empty pool.
        class: CourierClass,
    },
    /// More couriers than the class id range can number.
    #[error("{class} supports at most {max} couriers, {requested} requested")]
    TooManyCouriers {
        /// Class that overflowed.
        class: CourierClass,
        /// Requested pool size.
        requested: usize,
        /// Largest supported pool size.
        max: usize,
    },
    /// A courier that may travel zero distance per day would never move.
    #[error("courier {courier} has a daily limit of 0")]
    ZeroDailyLimit {
        /// Courier being created.
        courier: CourierId,
    },
    /// The start city is not on the map.
    #[error("courier starting city invalid: {source}")]
    UnknownStartCity {
        /// Lookup failure.
        source: GraphError,
    },
}

/// Failures while assigning packages or looking up couriers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    /// Route planning failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// No courier carries this id.
    #[error("courier {id} does not exist")]
    CourierNotFound {
        /// Requested id.
        id: CourierId,
    },
    /// Every courier of the class failed to plan the delivery.
    #[error("no {class} courier can deliver from {from} to {to}")]
    NoCourierAvailable {
        /// Requested class.
        class: CourierClass,
        /// Source city name.
        from: String,
        /// Destination city name.
        to: String,
    },
}

/// Error returned when a class name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown courier class `{name}` (expected `basic` or `firstClass`)")]
pub struct ParseCourierClassError {
    /// Rejected input.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{city, reference_map};
    use rstest::rstest;

    #[rstest]
    fn no_couriers_message_names_the_class() {
        let err = ConfigurationError::NoCouriers {
            class: CourierClass::FirstClass,
        };
        assert_eq!(
            err.to_string(),
            "all courier counts need to be at least 1 (firstClass has none)"
        );
    }

    #[rstest]
    fn graph_errors_pass_through_fleet_errors() {
        let graph = reference_map();
        let inner = GraphError::NoPathExists {
            from: city(&graph, "A"),
            to: city(&graph, "G"),
        };
        let err = FleetError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
