//! Fixtures shared by unit, behaviour and property tests.
//!
//! Available under `cfg(test)` and the `test-support` feature.

use std::sync::Arc;

use crate::{
    CityId, Edge, Graph, Package, PackageBook, PackageId, PackageStatus, PackageTracker,
    build_graph,
};

/// Edge list of the reference map.
///
/// Contains a duplicate `E F 2` (ignored, the first `E F 3` wins) and a
/// negative `D E -3` (rejected, `D` and `E` stay non-adjacent).
#[must_use]
pub fn reference_edges() -> Vec<Edge> {
    vec![
        Edge::new("A", "B", 4),
        Edge::new("A", "C", 4),
        Edge::new("B", "C", 2),
        Edge::new("C", "E", 1),
        Edge::new("E", "F", 3),
        Edge::new("E", "F", 2),
        Edge::new("D", "E", -3),
        Edge::new("C", "D", 2),
        Edge::new("D", "G", 3),
        Edge::new("F", "G", 7),
    ]
}

/// Seven-city graph with unique shortest paths between the tested pairs.
#[must_use]
pub fn reference_map() -> Graph {
    build_graph(reference_edges())
}

/// [`reference_map`] behind an `Arc`, ready for couriers and fleets.
#[must_use]
pub fn shared_reference_map() -> Arc<Graph> {
    Arc::new(reference_map())
}

/// Resolve a city name that is known to exist in `graph`.
///
/// # Panics
///
/// Panics when `name` is not a city of `graph`.
#[must_use]
#[expect(clippy::expect_used, reason = "fixtures fail loudly on bad input")]
pub fn city(graph: &Graph, name: &str) -> CityId {
    graph.city_id(name).expect("fixture city should exist")
}

/// Resolve several city names at once.
///
/// # Panics
///
/// Panics when any name is not a city of `graph`.
#[must_use]
pub fn cities(graph: &Graph, names: &[&str]) -> Vec<CityId> {
    names.iter().map(|name| city(graph, name)).collect()
}

/// Register packages waiting at the named cities.
///
/// # Panics
///
/// Panics when a city name is not part of `graph`.
#[must_use]
pub fn book_with(graph: &Graph, packages: &[(PackageId, &str)]) -> PackageBook {
    let mut book = PackageBook::new();
    for &(id, name) in packages {
        book.insert(Package::new(id, city(graph, name)));
    }
    book
}

/// One callback observed by [`RecordingTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCall {
    /// [`PackageTracker::relocate`] was invoked.
    Relocate(PackageId, CityId),
    /// [`PackageTracker::update_status`] was invoked.
    UpdateStatus(PackageId, PackageStatus),
}

/// Tracker that only remembers what it was told, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingTracker {
    /// Calls received so far.
    pub calls: Vec<TrackerCall>,
}

impl PackageTracker for RecordingTracker {
    fn relocate(&mut self, package: PackageId, location: CityId) {
        self.calls.push(TrackerCall::Relocate(package, location));
    }

    fn update_status(&mut self, package: PackageId, status: PackageStatus) {
        self.calls.push(TrackerCall::UpdateStatus(package, status));
    }
}
