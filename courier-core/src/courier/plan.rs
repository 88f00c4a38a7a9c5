//! Reconciling a new pickup/drop-off obligation with a committed route.

use std::collections::VecDeque;

use crate::{CityId, Distance, Graph, GraphError};

/// How a committed route must change to serve one more package.
///
/// A plan is computed without touching the courier, so callers can price a
/// candidate before committing to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    covered: usize,
    extension: Vec<CityId>,
}

impl RoutePlan {
    /// Reconcile `source -> destination` with `route`.
    ///
    /// - `source` on the route with `destination` at or after it: no change;
    /// - `source` on the route without a later `destination`: append the
    ///   shortest path from the route's end to `destination`;
    /// - `source` missing: append the shortest path to `source`, then on to
    ///   `destination`.
    ///
    /// The route's end is its last waypoint, or `location` when it is empty.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from the shortest-path queries.
    pub fn reconcile(
        graph: &Graph,
        location: CityId,
        route: &VecDeque<CityId>,
        source: CityId,
        destination: CityId,
    ) -> Result<Self, GraphError> {
        let end = route.back().copied().unwrap_or(location);
        let Some(source_at) = route.iter().position(|city| *city == source) else {
            let mut extension = without_start(graph.shortest_path(end, source)?);
            extension.extend(without_start(graph.shortest_path(source, destination)?));
            return Ok(Self {
                covered: route.len(),
                extension,
            });
        };
        if let Some(offset) = route
            .iter()
            .skip(source_at)
            .position(|city| *city == destination)
        {
            return Ok(Self {
                covered: source_at.saturating_add(offset).saturating_add(1),
                extension: Vec::new(),
            });
        }
        Ok(Self {
            covered: route.len(),
            extension: without_start(graph.shortest_path(end, destination)?),
        })
    }

    /// Waypoints to append to the route.
    #[must_use]
    pub fn extension(&self) -> &[CityId] {
        &self.extension
    }

    /// Whether the route already serves the obligation.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.extension.is_empty()
    }

    /// Cities the courier visits until the package is delivered, starting at
    /// `location`.
    #[must_use]
    pub fn projected_route(&self, location: CityId, route: &VecDeque<CityId>) -> Vec<CityId> {
        std::iter::once(location)
            .chain(route.iter().copied().take(self.covered))
            .chain(self.extension.iter().copied())
            .collect()
    }

    /// Length of [`RoutePlan::projected_route`].
    ///
    /// # Errors
    ///
    /// [`GraphError::Disconnected`] if the route is not contiguous.
    pub fn projected_distance(
        &self,
        graph: &Graph,
        location: CityId,
        route: &VecDeque<CityId>,
    ) -> Result<Distance, GraphError> {
        graph.path_distance(&self.projected_route(location, route))
    }

    pub(crate) fn into_extension(self) -> Vec<CityId> {
        self.extension
    }
}

// The first city of a path is already the route's end.
fn without_start(path: Vec<CityId>) -> Vec<CityId> {
    path.into_iter().skip(1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cities, city, reference_map};
    use rstest::{fixture, rstest};

    #[fixture]
    fn graph() -> Graph {
        reference_map()
    }

    fn route(graph: &Graph, names: &[&str]) -> VecDeque<CityId> {
        cities(graph, names).into_iter().collect()
    }

    #[rstest]
    fn empty_route_goes_to_source_then_destination(graph: Graph) {
        let plan = RoutePlan::reconcile(
            &graph,
            city(&graph, "A"),
            &VecDeque::new(),
            city(&graph, "F"),
            city(&graph, "B"),
        )
        .expect("connected");
        assert_eq!(plan.extension(), cities(&graph, &["C", "E", "F", "E", "C", "B"]));
    }

    #[rstest]
    fn ordered_obligation_keeps_route(graph: Graph) {
        let committed = route(&graph, &["C", "E", "F", "E", "C", "B"]);
        let plan = RoutePlan::reconcile(
            &graph,
            city(&graph, "A"),
            &committed,
            city(&graph, "E"),
            city(&graph, "F"),
        )
        .expect("connected");
        assert!(plan.is_unchanged());
        assert_eq!(
            plan.projected_route(city(&graph, "A"), &committed),
            cities(&graph, &["A", "C", "E", "F"])
        );
    }

    #[rstest]
    fn source_on_route_extends_to_destination(graph: Graph) {
        let committed = route(&graph, &["C", "E", "F", "E", "C", "B"]);
        let plan = RoutePlan::reconcile(
            &graph,
            city(&graph, "A"),
            &committed,
            city(&graph, "E"),
            city(&graph, "A"),
        )
        .expect("connected");
        assert_eq!(plan.extension(), cities(&graph, &["A"]));
        assert_eq!(
            plan.projected_distance(&graph, city(&graph, "A"), &committed),
            Ok(18)
        );
    }

    #[rstest]
    fn destination_before_source_is_revisited(graph: Graph) {
        let committed = route(&graph, &["C", "E", "F", "E", "C", "B", "A"]);
        let plan = RoutePlan::reconcile(
            &graph,
            city(&graph, "A"),
            &committed,
            city(&graph, "A"),
            city(&graph, "F"),
        )
        .expect("connected");
        assert_eq!(plan.extension(), cities(&graph, &["C", "E", "F"]));
    }

    #[rstest]
    fn source_equal_to_location_adds_only_the_delivery_leg(graph: Graph) {
        let plan = RoutePlan::reconcile(
            &graph,
            city(&graph, "C"),
            &VecDeque::new(),
            city(&graph, "C"),
            city(&graph, "G"),
        )
        .expect("connected");
        assert_eq!(plan.extension(), cities(&graph, &["D", "G"]));
    }
}
