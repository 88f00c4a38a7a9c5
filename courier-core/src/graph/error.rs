use thiserror::Error;

use super::CityId;

/// Errors raised by [`Graph`](super::Graph) construction and queries.
///
/// The graph is static once loaded, so none of these are transient: callers
/// should surface them rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No city with the given name exists.
    #[error("city {name:?} does not exist")]
    UnknownCity {
        /// Name that failed to resolve.
        name: String,
    },
    /// The identifier does not address a city of this graph.
    #[error("{city} is not part of the graph")]
    UnknownCityId {
        /// Identifier that failed to resolve.
        city: CityId,
    },
    /// An edge was given a negative length.
    #[error("edge {from} - {to} has negative distance {distance}")]
    NegativeDistance {
        /// First endpoint.
        from: CityId,
        /// Second endpoint.
        to: CityId,
        /// Rejected distance.
        distance: i64,
    },
    /// An edge would connect a city to itself.
    #[error("{city} cannot neighbour itself")]
    SelfLoop {
        /// City named at both ends of the edge.
        city: CityId,
    },
    /// The two cities lie in different components.
    #[error("no path exists from {from} to {to}")]
    NoPathExists {
        /// Start of the query.
        from: CityId,
        /// Unreachable target.
        to: CityId,
    },
    /// Two consecutive cities of a path are not neighbours.
    #[error("{from} and {to} are not neighbours")]
    Disconnected {
        /// City preceding the gap.
        from: CityId,
        /// City following the gap.
        to: CityId,
    },
}

