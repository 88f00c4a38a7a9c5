//! Weighted undirected graph of cities.
//!
//! Cities live in an index-stable arena and are addressed by [`CityId`].
//! Adjacency is stored per city as `(CityId, Distance)` pairs. A [`Graph`] is
//! assembled once from an edge list and treated as read-only afterwards, which
//! lets couriers share it behind an `Arc`.

mod error;
mod shortest_path;

use std::collections::HashMap;
use std::fmt;

pub use error::GraphError;

/// Road length between two cities, in kilometres.
pub type Distance = u64;

/// Stable handle of a city inside its [`Graph`].
///
/// Identifiers are only meaningful for the graph that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CityId(usize);

impl CityId {
    /// Position of the city in the graph's arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city #{}", self.0)
    }
}

/// A named vertex together with its neighbours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    name: String,
    neighbours: Vec<(CityId, Distance)>,
}

impl City {
    const fn new(name: String) -> Self {
        Self {
            name,
            neighbours: Vec::new(),
        }
    }

    /// Unique name of the city.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adjacent cities in insertion order.
    #[must_use]
    pub fn neighbours(&self) -> &[(CityId, Distance)] {
        &self.neighbours
    }

    /// Whether `city` shares an edge with this one.
    #[must_use]
    pub fn is_neighbour(&self, city: CityId) -> bool {
        self.distance_to(city).is_some()
    }

    /// Length of the edge to `city`, or `None` when they are not adjacent.
    #[must_use]
    pub fn distance_to(&self, city: CityId) -> Option<Distance> {
        self.neighbours
            .iter()
            .find(|(neighbour, _)| *neighbour == city)
            .map(|(_, distance)| *distance)
    }

    // First write wins: an existing edge is never overwritten.
    fn add_neighbour(&mut self, city: CityId, distance: Distance) -> bool {
        if self.is_neighbour(city) {
            return false;
        }
        self.neighbours.push((city, distance));
        true
    }
}

/// One undirected road as delivered by a map loader.
///
/// # Examples
/// ```
/// use courier_core::Edge;
///
/// let edge = Edge::new("A", "B", 4);
/// assert_eq!(edge.from, "A");
/// assert_eq!(edge.distance, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Name of the first endpoint.
    pub from: String,
    /// Name of the second endpoint.
    pub to: String,
    /// Road length. Negative values are rejected on insertion.
    pub distance: i64,
}

impl Edge {
    /// Construct an edge between two named cities.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance: i64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            distance,
        }
    }
}

/// City arena with a name index.
///
/// # Examples
/// ```
/// use courier_core::{Edge, build_graph};
///
/// # fn main() -> Result<(), courier_core::GraphError> {
/// let graph = build_graph([Edge::new("A", "B", 4), Edge::new("B", "C", 2)]);
/// let a = graph.city_id("A")?;
/// let c = graph.city_id("C")?;
/// let path = graph.shortest_path(a, c)?;
/// assert_eq!(graph.path_distance(&path)?, 6);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    cities: Vec<City>,
    index: HashMap<String, CityId>,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a city by name, returning the existing id for known names.
    pub fn add_city(&mut self, name: &str) -> CityId {
        if let Some(id) = self.index.get(name) {
            return *id;
        }
        let id = CityId(self.cities.len());
        self.cities.push(City::new(name.to_owned()));
        self.index.insert(name.to_owned(), id);
        id
    }

    /// Join two cities with an undirected edge.
    ///
    /// Returns `Ok(false)` when the cities were already neighbours; the
    /// original distance is kept in that case.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownCityId`] for foreign ids,
    /// [`GraphError::SelfLoop`] when `a == b` and
    /// [`GraphError::NegativeDistance`] for negative lengths.
    pub fn connect(&mut self, a: CityId, b: CityId, distance: i64) -> Result<bool, GraphError> {
        self.city(a)?;
        self.city(b)?;
        if a == b {
            return Err(GraphError::SelfLoop { city: a });
        }
        let length = Distance::try_from(distance).map_err(|_| GraphError::NegativeDistance {
            from: a,
            to: b,
            distance,
        })?;
        let forward = self.city_mut(a)?.add_neighbour(b, length);
        let backward = self.city_mut(b)?.add_neighbour(a, length);
        Ok(forward && backward)
    }

    /// Add both endpoints of `edge` and connect them.
    ///
    /// Rejected edges are logged and skipped; their endpoints still become
    /// cities of the graph.
    pub fn insert_edge(&mut self, edge: &Edge) {
        let from = self.add_city(&edge.from);
        let to = self.add_city(&edge.to);
        match self.connect(from, to, edge.distance) {
            Ok(true) => {}
            Ok(false) => log::debug!(
                "ignoring duplicate edge {} - {} ({})",
                edge.from,
                edge.to,
                edge.distance
            ),
            Err(err) => log::warn!("skipping edge {} - {}: {err}", edge.from, edge.to),
        }
    }

    /// Resolve a city name.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownCity`] when no city carries `name`.
    pub fn city_id(&self, name: &str) -> Result<CityId, GraphError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::UnknownCity {
                name: name.to_owned(),
            })
    }

    /// Look up a city by id.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownCityId`] when `id` was not issued by this graph.
    pub fn city(&self, id: CityId) -> Result<&City, GraphError> {
        self.cities
            .get(id.index())
            .ok_or(GraphError::UnknownCityId { city: id })
    }

    fn city_mut(&mut self, id: CityId) -> Result<&mut City, GraphError> {
        self.cities
            .get_mut(id.index())
            .ok_or(GraphError::UnknownCityId { city: id })
    }

    /// Name of the city behind `id`.
    ///
    /// # Errors
    ///
    /// [`GraphError::UnknownCityId`] when `id` was not issued by this graph.
    pub fn name_of(&self, id: CityId) -> Result<&str, GraphError> {
        self.city(id).map(City::name)
    }

    /// Length of the direct edge between two cities, if any.
    #[must_use]
    pub fn edge_distance(&self, from: CityId, to: CityId) -> Option<Distance> {
        self.cities.get(from.index())?.distance_to(to)
    }

    /// Sum of edge lengths along `path`.
    ///
    /// Empty and single-city paths have length zero.
    ///
    /// # Errors
    ///
    /// [`GraphError::Disconnected`] when two consecutive cities are not
    /// neighbours.
    pub fn path_distance(&self, path: &[CityId]) -> Result<Distance, GraphError> {
        path.windows(2).try_fold(0, |total: Distance, pair| {
            let &[from, to] = pair else {
                return Ok(total);
            };
            let hop = self
                .edge_distance(from, to)
                .ok_or(GraphError::Disconnected { from, to })?;
            Ok(total.saturating_add(hop))
        })
    }

    /// Number of cities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether the graph has no cities.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Iterate over cities in insertion order.
    pub fn cities(&self) -> impl Iterator<Item = (CityId, &City)> {
        self.cities
            .iter()
            .enumerate()
            .map(|(index, city)| (CityId(index), city))
    }
}

impl FromIterator<Edge> for Graph {
    fn from_iter<I: IntoIterator<Item = Edge>>(edges: I) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.insert_edge(&edge);
        }
        graph
    }
}

/// Build a graph from an undirected edge list.
///
/// Each edge is inserted in both directions. Self-loops and negative lengths
/// are skipped, and the first of several edges between the same pair wins.
pub fn build_graph<I>(edges: I) -> Graph
where
    I: IntoIterator<Item = Edge>,
{
    edges.into_iter().collect()
}
