//! Courier path engine.
//!
//! A [`Courier`] owns its committed route, the pickup and drop-off ledgers
//! and a daily distance budget. New obligations are stitched onto the end of
//! the route (see [`RoutePlan`]); [`Courier::shift_time`] then walks the route
//! one day at a time, carrying unused distance into the next day.

mod ledger;
mod plan;

use std::collections::VecDeque;
use std::sync::Arc;

use crate::fleet::ConfigurationError;
use crate::{
    CityId, Distance, Graph, GraphError, PackageId, PackageStatus, PackageTracker, StatusChange,
};

use ledger::Ledger;
pub use plan::RoutePlan;

/// Courier identifier, unique across all classes.
pub type CourierId = u64;

/// Simulation day counter.
pub type Day = u32;

/// A mobile agent with a bounded daily travel distance.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use courier_core::{Courier, Edge, Package, PackageBook, PackageStatus, build_graph};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let graph = Arc::new(build_graph([Edge::new("A", "B", 5)]));
/// let a = graph.city_id("A")?;
/// let b = graph.city_id("B")?;
/// let mut courier = Courier::new(1001, a, Arc::clone(&graph), 3)?;
/// let mut book = PackageBook::new();
/// book.insert(Package::new(101, a));
///
/// courier.deliver(101, a, b)?;
/// assert_eq!(courier.route().collect::<Vec<_>>(), vec![b]);
///
/// // Three kilometres are not enough on day 0; the unused budget carries over.
/// courier.shift_time(1, &mut book);
/// assert_eq!(courier.location(), a);
/// courier.shift_time(1, &mut book);
/// assert_eq!(courier.location(), b);
/// assert_eq!(book.get(101).map(|p| p.status), Some(PackageStatus::Delivered));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Courier {
    id: CourierId,
    day: Day,
    daily_limit: Distance,
    remaining: Distance,
    location: CityId,
    graph: Arc<Graph>,
    route: VecDeque<CityId>,
    in_transit: Vec<PackageId>,
    pickups: Ledger,
    drop_offs: Ledger,
}

impl Courier {
    /// Create an idle courier at `start`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::UnknownStartCity`] when `start` is not a city of
    /// `graph` and [`ConfigurationError::ZeroDailyLimit`] when the courier
    /// could never move.
    pub fn new(
        id: CourierId,
        start: CityId,
        graph: Arc<Graph>,
        daily_limit: Distance,
    ) -> Result<Self, ConfigurationError> {
        graph
            .city(start)
            .map_err(|source| ConfigurationError::UnknownStartCity { source })?;
        if daily_limit == 0 {
            return Err(ConfigurationError::ZeroDailyLimit { courier: id });
        }
        Ok(Self {
            id,
            day: 0,
            daily_limit,
            remaining: 0,
            location: start,
            graph,
            route: VecDeque::new(),
            in_transit: Vec::new(),
            pickups: Ledger::default(),
            drop_offs: Ledger::default(),
        })
    }

    /// Identifier of the courier.
    #[must_use]
    pub const fn id(&self) -> CourierId {
        self.id
    }

    /// Number of simulated days so far.
    #[must_use]
    pub const fn day(&self) -> Day {
        self.day
    }

    /// City the courier is in.
    #[must_use]
    pub const fn location(&self) -> CityId {
        self.location
    }

    /// Distance the courier may travel per day.
    #[must_use]
    pub const fn daily_limit(&self) -> Distance {
        self.daily_limit
    }

    /// Budget carried over from earlier days.
    #[must_use]
    pub const fn remaining_distance(&self) -> Distance {
        self.remaining
    }

    /// Graph the courier travels on.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Committed waypoints in visiting order, excluding the current city.
    pub fn route(&self) -> impl ExactSizeIterator<Item = CityId> + '_ {
        self.route.iter().copied()
    }

    /// Packages currently carried.
    #[must_use]
    pub fn in_transit(&self) -> &[PackageId] {
        &self.in_transit
    }

    /// Packages still to be collected at `city`.
    #[must_use]
    pub fn pending_pickups(&self, city: CityId) -> &[PackageId] {
        self.pickups.pending(city)
    }

    /// Packages still to be dropped off at `city`.
    #[must_use]
    pub fn pending_drop_offs(&self, city: CityId) -> &[PackageId] {
        self.drop_offs.pending(city)
    }

    /// Whether the courier has neither a route nor open obligations.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.route.is_empty()
            && self.in_transit.is_empty()
            && self.pickups.is_empty()
            && self.drop_offs.is_empty()
    }

    /// Work out how the route would change for `source -> destination`
    /// without committing anything.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from the shortest-path queries.
    pub fn plan(&self, source: CityId, destination: CityId) -> Result<RoutePlan, GraphError> {
        RoutePlan::reconcile(&self.graph, self.location, &self.route, source, destination)
    }

    /// Distance this courier would travel, from its current city, until a
    /// package from `source` reaches `destination`.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] from planning.
    pub fn quote(&self, source: CityId, destination: CityId) -> Result<Distance, GraphError> {
        self.plan(source, destination)?
            .projected_distance(&self.graph, self.location, &self.route)
    }

    /// Take on a package travelling from `source` to `destination`.
    ///
    /// The route is only extended when it does not already visit `source`
    /// and, later, `destination`.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`]; the courier is unchanged on failure.
    pub fn deliver(
        &mut self,
        package: PackageId,
        source: CityId,
        destination: CityId,
    ) -> Result<(), GraphError> {
        let plan = self.plan(source, destination)?;
        self.pickups.record(source, package);
        self.drop_offs.record(destination, package);
        if !plan.is_unchanged() {
            log::debug!(
                "courier {} extends its route by {} waypoints for package {package}",
                self.id,
                plan.extension().len()
            );
        }
        self.route.extend(plan.into_extension());
        Ok(())
    }

    /// Simulate a single day and return the status changes it caused.
    pub fn advance_one_day<T>(&mut self, tracker: &mut T) -> Vec<StatusChange>
    where
        T: PackageTracker + ?Sized,
    {
        let mut changes = Vec::new();
        self.step_day(tracker, &mut changes);
        changes
    }

    /// Simulate `days` consecutive days.
    ///
    /// Changes are returned in the order they happened.
    pub fn shift_time<T>(&mut self, days: Day, tracker: &mut T) -> Vec<StatusChange>
    where
        T: PackageTracker + ?Sized,
    {
        let mut changes = Vec::new();
        for _ in 0..days {
            self.step_day(tracker, &mut changes);
        }
        changes
    }

    fn step_day<T>(&mut self, tracker: &mut T, changes: &mut Vec<StatusChange>)
    where
        T: PackageTracker + ?Sized,
    {
        // Idle couriers do not bank distance.
        if !self.route.is_empty() {
            self.remaining = self.remaining.saturating_add(self.daily_limit);
        }
        self.handle_location(tracker, changes);
        while self.hop(tracker) {
            self.handle_location(tracker, changes);
        }
        self.day = self.day.saturating_add(1);
    }

    fn handle_location<T>(&mut self, tracker: &mut T, changes: &mut Vec<StatusChange>)
    where
        T: PackageTracker + ?Sized,
    {
        let here = self.location;
        let day = self.day;
        for package in self.pickups.take(here) {
            tracker.update_status(package, PackageStatus::InDelivery);
            self.in_transit.push(package);
            changes.push(StatusChange::new(package, day, PackageStatus::InDelivery));
        }

        let in_transit = &mut self.in_transit;
        self.drop_offs.retain_at(here, |package| {
            // Not collected yet: keep it for a later visit.
            let Some(position) = in_transit.iter().position(|carried| *carried == package) else {
                return true;
            };
            in_transit.remove(position);
            tracker.update_status(package, PackageStatus::Delivered);
            changes.push(StatusChange::new(package, day, PackageStatus::Delivered));
            false
        });
    }

    fn hop<T>(&mut self, tracker: &mut T) -> bool
    where
        T: PackageTracker + ?Sized,
    {
        let Some(&next) = self.route.front() else {
            return false;
        };
        let edge = self.graph.edge_distance(self.location, next);
        debug_assert!(edge.is_some(), "route of courier {} is not contiguous", self.id);
        let Some(distance) = edge else {
            log::warn!(
                "courier {} cannot reach {next} from {}; halting on a broken route",
                self.id,
                self.location
            );
            return false;
        };
        if distance > self.remaining {
            return false;
        }
        self.remaining -= distance;
        self.route.pop_front();
        self.location = next;
        log::debug!(
            "courier {} reached {next} on day {} with {} km left",
            self.id,
            self.day,
            self.remaining
        );
        for package in &self.in_transit {
            tracker.relocate(*package, next);
        }
        true
    }
}
