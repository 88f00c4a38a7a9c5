//! Dijkstra shortest paths over the city arena.
//!
//! The frontier is a binary heap keyed by tentative distance, so every step
//! settles the globally closest unsettled city.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{CityId, Distance, Graph, GraphError};

impl Graph {
    /// Cheapest path from `from` to `to`, both endpoints included.
    ///
    /// `shortest_path(x, x)` is `[x]`.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownCityId`] for foreign ids and
    /// [`GraphError::NoPathExists`] when `to` is unreachable from `from`.
    ///
    /// # Examples
    /// ```
    /// use courier_core::{Edge, build_graph};
    ///
    /// # fn main() -> Result<(), courier_core::GraphError> {
    /// let graph = build_graph([
    ///     Edge::new("A", "B", 4),
    ///     Edge::new("B", "C", 2),
    ///     Edge::new("A", "C", 9),
    /// ]);
    /// let a = graph.city_id("A")?;
    /// let b = graph.city_id("B")?;
    /// let c = graph.city_id("C")?;
    /// assert_eq!(graph.shortest_path(a, c)?, vec![a, b, c]);
    /// assert_eq!(graph.shortest_path(a, a)?, vec![a]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn shortest_path(&self, from: CityId, to: CityId) -> Result<Vec<CityId>, GraphError> {
        self.city(from)?;
        self.city(to)?;
        if from == to {
            return Ok(vec![from]);
        }
        self.search(from, Some(to))
            .path_to(to)
            .ok_or(GraphError::NoPathExists { from, to })
    }

    /// Length of the cheapest path from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Same as [`Graph::shortest_path`].
    pub fn shortest_distance(&self, from: CityId, to: CityId) -> Result<Distance, GraphError> {
        self.city(from)?;
        self.city(to)?;
        self.search(from, Some(to))
            .distance_to(to)
            .ok_or(GraphError::NoPathExists { from, to })
    }

    fn search(&self, source: CityId, target: Option<CityId>) -> SearchTree {
        let mut tree = SearchTree::new(source, self.len());
        let mut settled = vec![false; self.len()];
        let mut frontier: BinaryHeap<Reverse<(Distance, CityId)>> = BinaryHeap::new();
        frontier.push(Reverse((0, source)));

        while let Some(Reverse((distance, city))) = frontier.pop() {
            let Some(done) = settled.get_mut(city.index()) else {
                continue;
            };
            if *done {
                continue;
            }
            *done = true;
            if target == Some(city) {
                break;
            }
            let Ok(vertex) = self.city(city) else {
                continue;
            };
            for &(neighbour, weight) in vertex.neighbours() {
                let candidate = distance.saturating_add(weight);
                if tree.relax(neighbour, city, candidate) {
                    frontier.push(Reverse((candidate, neighbour)));
                }
            }
        }
        tree
    }
}

/// Predecessor table produced by one search.
struct SearchTree {
    source: CityId,
    distances: Vec<Option<Distance>>,
    previous: Vec<Option<CityId>>,
}

impl SearchTree {
    fn new(source: CityId, size: usize) -> Self {
        let mut distances = vec![None; size];
        if let Some(slot) = distances.get_mut(source.index()) {
            *slot = Some(0);
        }
        Self {
            source,
            distances,
            previous: vec![None; size],
        }
    }

    // Strict improvement only, so the first-found predecessor survives ties.
    fn relax(&mut self, city: CityId, via: CityId, candidate: Distance) -> bool {
        let Some(best) = self.distances.get_mut(city.index()) else {
            return false;
        };
        if best.is_some_and(|current| current <= candidate) {
            return false;
        }
        *best = Some(candidate);
        if let Some(slot) = self.previous.get_mut(city.index()) {
            *slot = Some(via);
        }
        true
    }

    fn distance_to(&self, city: CityId) -> Option<Distance> {
        self.distances.get(city.index()).copied().flatten()
    }

    fn path_to(&self, target: CityId) -> Option<Vec<CityId>> {
        self.distance_to(target)?;
        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            current = self.previous.get(current.index()).copied().flatten()?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}
