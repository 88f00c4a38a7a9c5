//! Routing and scheduling engine for the courier network simulator.
//!
//! The engine has three layers:
//!
//! - [`graph`]: an immutable weighted city graph with Dijkstra shortest
//!   paths;
//! - [`courier`]: a courier's committed route, obligation ledgers and the
//!   day-stepping movement loop with distance carry-over;
//! - [`fleet`]: courier pools per class and the least-marginal-distance
//!   assignment heuristic.
//!
//! Packages are owned by the caller and updated through
//! [`PackageTracker`]. Nothing here performs I/O.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use courier_core::{
//!     ClassConfig, CourierClass, Edge, Fleet, FleetConfig, Package, PackageBook, PackageStatus,
//!     build_graph,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = Arc::new(build_graph([Edge::new("A", "B", 3), Edge::new("B", "C", 3)]));
//! let config = FleetConfig::new("A").with_basic(ClassConfig::new(1, 6));
//! let mut fleet = Fleet::new(Arc::clone(&graph), &config)?;
//!
//! let a = graph.city_id("A")?;
//! let c = graph.city_id("C")?;
//! let mut book = PackageBook::new();
//! book.insert(Package::new(101, a));
//!
//! let assignment = fleet.assign_package(101, a, c, CourierClass::Basic)?;
//! assert_eq!(assignment.distance, 6);
//!
//! let changes = fleet.shift_time(1, &mut book);
//! assert_eq!(changes.len(), 2);
//! assert_eq!(book.get(101).map(|p| p.status), Some(PackageStatus::Delivered));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod courier;
pub mod fleet;
pub mod graph;
pub mod package;
mod sequence;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use courier::{Courier, CourierId, Day, RoutePlan};
pub use fleet::{
    Assignment, ClassConfig, ConfigurationError, CourierClass, Fleet, FleetConfig, FleetError,
    ParseCourierClassError,
};
pub use graph::{City, CityId, Distance, Edge, Graph, GraphError, build_graph};
pub use package::{Package, PackageBook, PackageId, PackageStatus, PackageTracker, StatusChange};
pub use sequence::IdSequence;
